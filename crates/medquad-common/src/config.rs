//! Configuration for MedQuAD evaluation runs.
//!
//! Every section is optional; a missing file or section falls back to the
//! defaults below. Files may be TOML, YAML or JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{MedquadError, Result};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "MEDQUAD_CONFIG";

/// File looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "medquad.toml";

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedquadConfig {
    /// Fixed-point iteration settings
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Upstream relations conversion
    #[serde(default)]
    pub relations: RelationsConfig,

    /// Batch evaluation
    #[serde(default)]
    pub batch: BatchConfig,

    /// Evaluation memoization
    #[serde(default)]
    pub cache: CacheConfig,

    /// Report options
    #[serde(default)]
    pub output: OutputConfig,
}

// ── Evaluation ────────────────────────────────────────────────────────────────

/// DF-QuAD iteration bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Upper bound on update rounds
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Convergence threshold on the per-round maximum change
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_max_iterations() -> usize { 10 }
fn default_epsilon() -> f64 { 1e-4 }

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            epsilon: default_epsilon(),
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(MedquadError::Config(
                "evaluation.max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(MedquadError::Config(format!(
                "evaluation.epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

// ── Relations ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationsConfig {
    /// Argument id given to the central claim
    #[serde(default = "default_claim_id")]
    pub claim_id: String,
}

fn default_claim_id() -> String { "claim".to_string() }

impl Default for RelationsConfig {
    fn default() -> Self {
        Self { claim_id: default_claim_id() }
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Batches larger than this are evaluated in parallel; 0 disables parallelism
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize { 8 }

impl Default for BatchConfig {
    fn default() -> Self {
        Self { parallel_threshold: default_parallel_threshold() }
    }
}

// ── Cache ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum memoized evaluations (number of entries); 0 disables the cache
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_cache_capacity() -> usize { 256 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: default_cache_capacity() }
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = MedquadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(MedquadError::Config(format!("unknown output format: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Include the presentation uncertainty (1 - strength) per node
    #[serde(default = "default_true")]
    pub include_uncertainty: bool,
}

fn default_true() -> bool { true }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_uncertainty: true,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl MedquadConfig {
    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load a file, picking the parser from its extension (TOML when unknown).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let config = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml(path)?,
            Some("json") => Self::from_json(path)?,
            _ => Self::from_toml(path)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Resolve and load the configuration.
    ///
    /// Order: explicit path, then `MEDQUAD_CONFIG`, then `./medquad.toml`.
    /// When none exists the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let candidate: Option<PathBuf> = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from),
        };

        if let Some(path) = candidate {
            if !path.exists() {
                return Err(MedquadError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            info!("Loading configuration from {}", path.display());
            return Self::from_path(&path);
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            info!("Loading configuration from {}", local.display());
            return Self::from_path(local);
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Save to TOML file
    pub fn to_toml(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MedquadError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.evaluation.validate()?;
        if self.relations.claim_id.trim().is_empty() {
            return Err(MedquadError::Config(
                "relations.claim_id must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

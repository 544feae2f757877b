//! Reading relation payloads and argument graphs from disk.

use anyhow::Context;
use medquad_engine::{ArgumentGraph, QuestionEvidence};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A validated input ready for evaluation.
#[derive(Debug, Clone)]
pub struct LoadedInput {
    pub source: PathBuf,
    pub graph: ArgumentGraph,
    /// Set for relation payloads
    pub claim: Option<ClaimInfo>,
}

#[derive(Debug, Clone)]
pub struct ClaimInfo {
    pub id: String,
    pub text: String,
}

/// Parse an upstream relations payload (JSON) into a claim-centred graph.
pub fn load_relations(path: &Path, claim_id: &str) -> anyhow::Result<LoadedInput> {
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let evidence = QuestionEvidence::from_json(&payload)
        .with_context(|| format!("Invalid relations payload in {}", path.display()))?;
    let graph = evidence
        .to_graph(claim_id)
        .with_context(|| format!("Could not build argument graph from {}", path.display()))?;

    debug!(
        "Loaded {}: {} supporting, {} attacking",
        path.display(),
        evidence.supporting().count(),
        evidence.attacking().count()
    );

    Ok(LoadedInput {
        source: path.to_path_buf(),
        graph,
        claim: Some(ClaimInfo {
            id: claim_id.to_string(),
            text: evidence.claim,
        }),
    })
}

/// Parse an argument graph; `.yaml`/`.yml` files as YAML, anything else as JSON.
pub fn load_graph(path: &Path) -> anyhow::Result<LoadedInput> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref(),
        Some("yaml") | Some("yml")
    );
    let graph: ArgumentGraph = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid argument graph in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid argument graph in {}", path.display()))?
    };

    debug!("Loaded {}: {} arguments", path.display(), graph.len());
    Ok(LoadedInput {
        source: path.to_path_buf(),
        graph,
        claim: None,
    })
}

//! medquad-common — Shared errors, configuration and confidence algebra
//! used across all MedQuAD crates.

pub mod error;
pub mod confidence;
pub mod config;

// Re-export commonly used types
pub use config::{BatchConfig, CacheConfig, EvaluationConfig, MedquadConfig, OutputConfig, OutputFormat, RelationsConfig};
pub use error::{MedquadError, Result};

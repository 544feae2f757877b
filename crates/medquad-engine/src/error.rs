//! Error types for graph construction and upstream parsing.

use thiserror::Error;

/// A graph rejected before any iteration took place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidGraphError {
    #[error("argument id must not be empty")]
    EmptyId,

    #[error("duplicate argument id: {0}")]
    DuplicateArgument(String),

    #[error("argument {argument} has base score {score} outside [0, 1]")]
    BaseScoreOutOfRange { argument: String, score: f64 },

    #[error("argument {argument} references missing argument {missing}")]
    DanglingReference { argument: String, missing: String },

    #[error("argument {0} attacks or supports itself")]
    SelfReference(String),

    #[error("argument {other} both attacks and supports {argument}")]
    ConflictingRelation { argument: String, other: String },

    #[error("edge names undeclared argument: {0}")]
    UnknownArgument(String),
}

/// Upstream relation payloads that fail schema validation.
#[derive(Error, Debug)]
pub enum RelationsError {
    #[error("malformed relations payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("relations payload has no claim")]
    MissingClaim,

    #[error("relations payload has no overallConfidence")]
    MissingOverallConfidence,

    #[error("evidence #{index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("{field} must lie in [0, 1], got {value}")]
    ScoreOutOfRange { field: String, value: f64 },

    #[error("evidence #{index} has unknown relation tag {tag:?}")]
    UnknownPolarity { index: usize, tag: String },

    #[error(transparent)]
    InvalidGraph(#[from] InvalidGraphError),
}

//! medquad-engine — DF-QuAD argumentation strength engine.
//!
//! Builds validated argument graphs (a central claim plus supporting and
//! attacking evidence) and computes the fixed-point strength of every
//! argument under the DF-QuAD gradual semantics.
//!
//! # Example
//! ```rust
//! use medquad_engine::{ArgumentGraph, ArgumentGraphEvaluator};
//!
//! let graph = ArgumentGraph::builder()
//!     .argument("claim", 0.5)
//!     .argument("against", 0.3)
//!     .argument("for", 0.8)
//!     .attack("against", "claim")
//!     .support("for", "claim")
//!     .build()
//!     .unwrap();
//!
//! let evaluation = ArgumentGraphEvaluator::default().evaluate(&graph);
//! let claim = evaluation.strengths().get("claim").unwrap();
//! assert!((claim - 0.75).abs() < 1e-12);
//! assert!(evaluation.converged());
//! ```

pub mod argument;
pub mod graph;
pub mod semantics;
pub mod evaluator;
pub mod relations;
pub mod error;

pub use argument::Argument;
pub use graph::{ArgumentGraph, ArgumentGraphBuilder};
pub use evaluator::{ArgumentGraphEvaluator, Evaluation, StrengthAssignment};
pub use relations::{Evidence, Polarity, QuestionEvidence};
pub use error::{InvalidGraphError, RelationsError};

//! Shared testing utilities: argument graph fixtures and seeded random
//! graph generators.

pub mod fixtures;
pub mod random;

pub use random::{seeded_rng, GraphShape, RandomGraph};

//! DF-QuAD fixed-point evaluation.
//!
//! Starting from the base scores, every round recomputes all strengths from
//! the previous round's values (Jacobi update). Iteration stops once the
//! largest per-node change drops below `epsilon` or after `max_iterations`
//! rounds.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

use medquad_common::{BatchConfig, EvaluationConfig, Result};

use crate::graph::ArgumentGraph;
use crate::semantics::{aggregate, combine};

/// Final strength σ(id) ∈ [0, 1] per argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrengthAssignment {
    strengths: BTreeMap<String, f64>,
}

impl StrengthAssignment {
    pub fn get(&self, id: &str) -> Option<f64> {
        self.strengths.get(id).copied()
    }

    /// (id, strength) pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.strengths.iter().map(|(id, s)| (id.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.strengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
    }
}

/// Strengths together with how the iteration ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    strengths: StrengthAssignment,
    rounds: usize,
    delta: f64,
    delta_history: Vec<f64>,
    converged: bool,
}

impl Evaluation {
    pub fn strengths(&self) -> &StrengthAssignment {
        &self.strengths
    }

    pub fn into_strengths(self) -> StrengthAssignment {
        self.strengths
    }

    /// Rounds executed.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Largest change in the last round.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Per-round deltas, oldest first.
    pub fn delta_history(&self) -> &[f64] {
        &self.delta_history
    }

    /// False when the run was truncated at `max_iterations`.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Computes DF-QuAD strengths for validated argument graphs.
///
/// Holds nothing but its configuration; calls are independent and the
/// evaluator may be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ArgumentGraphEvaluator {
    config: EvaluationConfig,
    batch: BatchConfig,
}

impl ArgumentGraphEvaluator {
    pub fn new(config: EvaluationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            batch: BatchConfig::default(),
        })
    }

    /// Override the batch parallelism threshold.
    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn evaluate(&self, graph: &ArgumentGraph) -> Evaluation {
        let compiled = graph.compile();
        let n = compiled.base_scores.len();

        let mut current = compiled.base_scores.clone();
        let mut next = vec![0.0f64; n];
        let mut delta_history = Vec::with_capacity(self.config.max_iterations);
        let mut converged = false;

        for round in 1..=self.config.max_iterations {
            let mut delta = 0.0f64;
            for i in 0..n {
                let attack = aggregate(compiled.attackers[i].iter().map(|&j| current[j]));
                let support = aggregate(compiled.supporters[i].iter().map(|&j| current[j]));
                let value = combine(compiled.base_scores[i], attack, support);
                delta = delta.max((value - current[i]).abs());
                next[i] = value;
            }
            std::mem::swap(&mut current, &mut next);
            delta_history.push(delta);
            trace!(round, delta, "DF-QuAD round complete");

            if delta < self.config.epsilon {
                converged = true;
                break;
            }
        }

        let rounds = delta_history.len();
        let delta = delta_history.last().copied().unwrap_or(0.0);
        if converged {
            debug!(nodes = n, edges = graph.edge_count(), rounds, delta, "Graph evaluated");
        } else {
            warn!(
                nodes = n,
                rounds,
                delta,
                epsilon = self.config.epsilon,
                "DF-QuAD iteration truncated before convergence"
            );
        }

        let strengths = graph
            .ids()
            .map(str::to_string)
            .zip(current)
            .collect::<BTreeMap<_, _>>();

        Evaluation {
            strengths: StrengthAssignment { strengths },
            rounds,
            delta,
            delta_history,
            converged,
        }
    }

    /// Evaluate several graphs, preserving input order.
    ///
    /// Batches larger than the parallel threshold are spread across the
    /// rayon pool; results are identical to sequential evaluation.
    pub fn evaluate_batch<G>(&self, graphs: &[G]) -> Vec<Evaluation>
    where
        G: Borrow<ArgumentGraph> + Sync,
    {
        let threshold = self.batch.parallel_threshold;
        if threshold > 0 && graphs.len() > threshold {
            use rayon::prelude::*;
            debug!(graphs = graphs.len(), "Evaluating batch in parallel");
            return graphs.par_iter().map(|g| self.evaluate(g.borrow())).collect();
        }
        graphs.iter().map(|g| self.evaluate(g.borrow())).collect()
    }
}

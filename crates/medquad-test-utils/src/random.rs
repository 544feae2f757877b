//! Seeded random argument graphs for property tests.

use medquad_engine::{Argument, ArgumentGraph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Topology of generated graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphShape {
    /// Edges only run from higher to lower node index.
    Acyclic,
    /// Any ordered pair of distinct nodes may be related.
    Cyclic,
    /// `depth + 1` layers; nodes in layer k are related only to layer k + 1.
    Layered { depth: usize, width: usize },
}

/// Generator settings.
#[derive(Debug, Clone, Copy)]
pub struct RandomGraph {
    pub nodes: usize,
    pub edge_probability: f64,
    pub shape: GraphShape,
}

impl RandomGraph {
    pub fn acyclic(nodes: usize, edge_probability: f64) -> Self {
        Self { nodes, edge_probability, shape: GraphShape::Acyclic }
    }

    pub fn cyclic(nodes: usize, edge_probability: f64) -> Self {
        Self { nodes, edge_probability, shape: GraphShape::Cyclic }
    }

    pub fn layered(depth: usize, width: usize, edge_probability: f64) -> Self {
        Self {
            nodes: (depth + 1) * width,
            edge_probability,
            shape: GraphShape::Layered { depth, width },
        }
    }

    /// Draw a graph. Node `n0` is the conventional central claim.
    pub fn generate(&self, rng: &mut StdRng) -> ArgumentGraph {
        let mut arguments: Vec<Argument> = (0..self.nodes)
            .map(|i| Argument::new(node_id(i), rng.gen::<f64>()))
            .collect();

        for target in 0..self.nodes {
            for source in 0..self.nodes {
                if !self.may_relate(source, target) || !rng.gen_bool(self.edge_probability) {
                    continue;
                }
                let id = node_id(source);
                if rng.gen_bool(0.5) {
                    arguments[target].attackers.insert(id);
                } else {
                    arguments[target].supporters.insert(id);
                }
            }
        }

        ArgumentGraph::new(arguments).expect("generated graph is valid")
    }

    fn may_relate(&self, source: usize, target: usize) -> bool {
        match self.shape {
            GraphShape::Acyclic => source > target,
            GraphShape::Cyclic => source != target,
            GraphShape::Layered { width, .. } => source / width == target / width + 1,
        }
    }
}

pub fn node_id(i: usize) -> String {
    format!("n{i}")
}

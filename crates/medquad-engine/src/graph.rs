//! Validated argument graphs.
//!
//! An [`ArgumentGraph`] can only be obtained through a validating
//! constructor, so the evaluator never sees dangling references or
//! out-of-range base scores.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

use medquad_common::confidence::is_unit_interval;

use crate::argument::Argument;
use crate::error::InvalidGraphError;

/// Mapping from id to [`Argument`], ordered by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Argument>", into = "Vec<Argument>")]
pub struct ArgumentGraph {
    arguments: BTreeMap<String, Argument>,
}

impl ArgumentGraph {
    /// Build and validate a graph.
    ///
    /// Fails on duplicate or empty ids, base scores outside [0, 1],
    /// self-references, ids that both attack and support the same target,
    /// and references to ids that are not part of the graph.
    pub fn new<I>(arguments: I) -> Result<Self, InvalidGraphError>
    where
        I: IntoIterator<Item = Argument>,
    {
        let mut map = BTreeMap::new();
        for arg in arguments {
            if map.contains_key(&arg.id) {
                return Err(InvalidGraphError::DuplicateArgument(arg.id));
            }
            map.insert(arg.id.clone(), arg);
        }
        validate(&map)?;
        Ok(Self { arguments: map })
    }

    pub fn builder() -> ArgumentGraphBuilder {
        ArgumentGraphBuilder::default()
    }

    pub fn get(&self, id: &str) -> Option<&Argument> {
        self.arguments.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.arguments.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Arguments in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.arguments.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.arguments.keys().map(String::as_str)
    }

    /// Total number of attack and support relations.
    pub fn edge_count(&self) -> usize {
        self.arguments
            .values()
            .map(|a| a.attackers.len() + a.supporters.len())
            .sum()
    }

    /// SHA-256 of the canonical encoding of the graph, hex encoded.
    ///
    /// Two graphs with the same arguments, scores and relations have the
    /// same digest no matter how they were assembled.
    pub fn content_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.arguments.len() as u64).to_le_bytes());
        for arg in self.arguments.values() {
            hash_str(&mut hasher, &arg.id);
            hasher.update(arg.base_score.to_bits().to_le_bytes());
            hasher.update((arg.attackers.len() as u64).to_le_bytes());
            for id in &arg.attackers {
                hash_str(&mut hasher, id);
            }
            hasher.update((arg.supporters.len() as u64).to_le_bytes());
            for id in &arg.supporters {
                hash_str(&mut hasher, id);
            }
        }
        format!("{:x}", hasher.finalize())
    }

    /// Index-based view used by the evaluator.
    pub(crate) fn compile(&self) -> CompiledGraph {
        let index: HashMap<&str, usize> = self
            .arguments
            .keys()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let resolve = |ids: &std::collections::BTreeSet<String>| -> Vec<usize> {
            // Validation guarantees every id resolves.
            ids.iter().filter_map(|id| index.get(id.as_str()).copied()).collect()
        };

        let mut base_scores = Vec::with_capacity(self.arguments.len());
        let mut attackers = Vec::with_capacity(self.arguments.len());
        let mut supporters = Vec::with_capacity(self.arguments.len());
        for arg in self.arguments.values() {
            base_scores.push(arg.base_score);
            attackers.push(resolve(&arg.attackers));
            supporters.push(resolve(&arg.supporters));
        }

        CompiledGraph { base_scores, attackers, supporters }
    }
}

fn hash_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn validate(arguments: &BTreeMap<String, Argument>) -> Result<(), InvalidGraphError> {
    for (id, arg) in arguments {
        if id.is_empty() {
            return Err(InvalidGraphError::EmptyId);
        }
        if !is_unit_interval(arg.base_score) {
            return Err(InvalidGraphError::BaseScoreOutOfRange {
                argument: id.clone(),
                score: arg.base_score,
            });
        }
        if arg.attackers.contains(id) || arg.supporters.contains(id) {
            return Err(InvalidGraphError::SelfReference(id.clone()));
        }
        if let Some(other) = arg.attackers.intersection(&arg.supporters).next() {
            return Err(InvalidGraphError::ConflictingRelation {
                argument: id.clone(),
                other: other.clone(),
            });
        }
        if let Some(missing) = arg.neighbours().find(|n| !arguments.contains_key(*n)) {
            return Err(InvalidGraphError::DanglingReference {
                argument: id.clone(),
                missing: missing.to_string(),
            });
        }
    }
    Ok(())
}

impl TryFrom<Vec<Argument>> for ArgumentGraph {
    type Error = InvalidGraphError;

    fn try_from(arguments: Vec<Argument>) -> Result<Self, Self::Error> {
        Self::new(arguments)
    }
}

impl From<ArgumentGraph> for Vec<Argument> {
    fn from(graph: ArgumentGraph) -> Self {
        graph.arguments.into_values().collect()
    }
}

/// Dense representation: neighbour lists hold indices in id order.
#[derive(Debug, Clone)]
pub(crate) struct CompiledGraph {
    pub base_scores: Vec<f64>,
    pub attackers: Vec<Vec<usize>>,
    pub supporters: Vec<Vec<usize>>,
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Attack,
    Support,
}

/// Incremental graph construction from declared arguments and edges.
#[derive(Debug, Clone, Default)]
pub struct ArgumentGraphBuilder {
    arguments: Vec<Argument>,
    edges: Vec<(Relation, String, String)>,
}

impl ArgumentGraphBuilder {
    /// Declare an argument with its base score.
    pub fn argument(mut self, id: impl Into<String>, base_score: f64) -> Self {
        self.arguments.push(Argument::new(id, base_score));
        self
    }

    /// `source` attacks `target`.
    pub fn attack(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.edges.push((Relation::Attack, source.into(), target.into()));
        self
    }

    /// `source` supports `target`.
    pub fn support(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.edges.push((Relation::Support, source.into(), target.into()));
        self
    }

    pub fn build(self) -> Result<ArgumentGraph, InvalidGraphError> {
        let mut arguments = self.arguments;
        for (relation, source, target) in self.edges {
            if !arguments.iter().any(|a| a.id == source) {
                return Err(InvalidGraphError::UnknownArgument(source));
            }
            let Some(arg) = arguments.iter_mut().find(|a| a.id == target) else {
                return Err(InvalidGraphError::UnknownArgument(target));
            };
            match relation {
                Relation::Attack => arg.attackers.insert(source),
                Relation::Support => arg.supporters.insert(source),
            };
        }
        ArgumentGraph::new(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Argument> {
        vec![
            Argument::new("claim", 0.5).with_attacker("a").with_supporter("s"),
            Argument::new("a", 0.3),
            Argument::new("s", 0.8),
        ]
    }

    #[test]
    fn test_valid_graph() {
        let graph = ArgumentGraph::new(triangle()).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.ids().collect::<Vec<_>>(), vec!["a", "claim", "s"]);
    }

    #[test]
    fn test_dangling_reference_rejected() {
        let err = ArgumentGraph::new(vec![Argument::new("claim", 0.5).with_attacker("ghost")])
            .unwrap_err();
        assert_eq!(
            err,
            InvalidGraphError::DanglingReference {
                argument: "claim".to_string(),
                missing: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let err = ArgumentGraph::new(vec![Argument::new("claim", 1.4)]).unwrap_err();
        assert!(matches!(err, InvalidGraphError::BaseScoreOutOfRange { score, .. } if score == 1.4));
        assert!(ArgumentGraph::new(vec![Argument::new("claim", -0.01)]).is_err());
        assert!(ArgumentGraph::new(vec![Argument::new("claim", f64::NAN)]).is_err());
    }

    #[test]
    fn test_self_reference_rejected() {
        let err = ArgumentGraph::new(vec![Argument::new("x", 0.5).with_supporter("x")]).unwrap_err();
        assert_eq!(err, InvalidGraphError::SelfReference("x".to_string()));
    }

    #[test]
    fn test_conflicting_relation_rejected() {
        let err = ArgumentGraph::new(vec![
            Argument::new("claim", 0.5).with_attacker("e").with_supporter("e"),
            Argument::new("e", 0.5),
        ])
        .unwrap_err();
        assert!(matches!(err, InvalidGraphError::ConflictingRelation { .. }));
    }

    #[test]
    fn test_duplicate_and_empty_ids_rejected() {
        let err = ArgumentGraph::new(vec![Argument::new("x", 0.1), Argument::new("x", 0.2)])
            .unwrap_err();
        assert_eq!(err, InvalidGraphError::DuplicateArgument("x".to_string()));
        assert_eq!(
            ArgumentGraph::new(vec![Argument::new("", 0.1)]).unwrap_err(),
            InvalidGraphError::EmptyId
        );
    }

    #[test]
    fn test_cycles_allowed() {
        let graph = ArgumentGraph::new(vec![
            Argument::new("a", 0.5).with_attacker("b"),
            Argument::new("b", 0.5).with_attacker("a"),
        ]);
        assert!(graph.is_ok());
    }

    #[test]
    fn test_builder_matches_direct_construction() {
        let built = ArgumentGraph::builder()
            .argument("claim", 0.5)
            .argument("a", 0.3)
            .argument("s", 0.8)
            .support("s", "claim")
            .attack("a", "claim")
            .build()
            .unwrap();
        assert_eq!(built, ArgumentGraph::new(triangle()).unwrap());
    }

    #[test]
    fn test_builder_unknown_argument() {
        let err = ArgumentGraph::builder()
            .argument("claim", 0.5)
            .attack("ghost", "claim")
            .build()
            .unwrap_err();
        assert_eq!(err, InvalidGraphError::UnknownArgument("ghost".to_string()));

        let err = ArgumentGraph::builder()
            .argument("a", 0.5)
            .support("a", "nowhere")
            .build()
            .unwrap_err();
        assert_eq!(err, InvalidGraphError::UnknownArgument("nowhere".to_string()));
    }

    #[test]
    fn test_digest_ignores_construction_order() {
        let mut reversed = triangle();
        reversed.reverse();
        let a = ArgumentGraph::new(triangle()).unwrap();
        let b = ArgumentGraph::new(reversed).unwrap();
        assert_eq!(a.content_digest(), b.content_digest());
        assert_eq!(a.content_digest().len(), 64);
    }

    #[test]
    fn test_digest_changes_with_score() {
        let a = ArgumentGraph::new(triangle()).unwrap();
        let mut args = triangle();
        args[1].base_score = 0.31;
        let b = ArgumentGraph::new(args).unwrap();
        assert_ne!(a.content_digest(), b.content_digest());
    }

    #[test]
    fn test_serde_validates() {
        let ok: ArgumentGraph = serde_json::from_str(
            r#"[{"id": "claim", "base_score": 0.5, "supporters": ["s"]}, {"id": "s", "base_score": 0.9}]"#,
        )
        .unwrap();
        assert_eq!(ok.len(), 2);

        let bad = serde_json::from_str::<ArgumentGraph>(
            r#"[{"id": "claim", "base_score": 0.5, "supporters": ["s"]}]"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_compile_indices_follow_id_order() {
        let graph = ArgumentGraph::new(triangle()).unwrap();
        let compiled = graph.compile();
        // ids: a=0, claim=1, s=2
        assert_eq!(compiled.base_scores, vec![0.3, 0.5, 0.8]);
        assert_eq!(compiled.attackers[1], vec![0]);
        assert_eq!(compiled.supporters[1], vec![2]);
        assert!(compiled.attackers[0].is_empty());
    }
}

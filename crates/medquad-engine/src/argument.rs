//! A single node of a bipolar argumentation graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An argument with its intrinsic base score and incoming relations.
///
/// `attackers` and `supporters` hold the ids of arguments that act *on*
/// this one. Both sets are ordered, so traversal is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub id: String,

    /// τ: strength before any neighbour influence, in [0, 1]
    #[serde(alias = "baseScore", alias = "tau")]
    pub base_score: f64,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub attackers: BTreeSet<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub supporters: BTreeSet<String>,
}

impl Argument {
    pub fn new(id: impl Into<String>, base_score: f64) -> Self {
        Self {
            id: id.into(),
            base_score,
            attackers: BTreeSet::new(),
            supporters: BTreeSet::new(),
        }
    }

    /// Add an attacker id.
    pub fn with_attacker(mut self, id: impl Into<String>) -> Self {
        self.attackers.insert(id.into());
        self
    }

    /// Add a supporter id.
    pub fn with_supporter(mut self, id: impl Into<String>) -> Self {
        self.supporters.insert(id.into());
        self
    }

    /// True when nothing attacks or supports this argument.
    pub fn is_unrelated(&self) -> bool {
        self.attackers.is_empty() && self.supporters.is_empty()
    }

    /// Every id this argument depends on, attackers first.
    pub fn neighbours(&self) -> impl Iterator<Item = &str> {
        self.attackers
            .iter()
            .chain(self.supporters.iter())
            .map(String::as_str)
    }
}

//! Evaluation memoization keyed by graph content digest.

use lru::LruCache;
use medquad_engine::{ArgumentGraph, ArgumentGraphEvaluator, Evaluation};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tracing::debug;

/// Wraps an evaluator with an LRU cache of finished evaluations.
///
/// Graphs with identical content are evaluated once per cache lifetime,
/// including duplicates inside a single batch.
pub struct MemoizedEvaluator {
    evaluator: ArgumentGraphEvaluator,
    cache: Option<LruCache<String, Evaluation>>,
    hits: usize,
    misses: usize,
}

impl MemoizedEvaluator {
    /// `capacity` of 0 disables caching.
    pub fn new(evaluator: ArgumentGraphEvaluator, capacity: usize) -> Self {
        Self {
            evaluator,
            cache: NonZeroUsize::new(capacity).map(LruCache::new),
            hits: 0,
            misses: 0,
        }
    }

    /// Evaluate every graph, in input order.
    pub fn evaluate_all(&mut self, graphs: &[&ArgumentGraph]) -> Vec<Evaluation> {
        let Some(cache) = self.cache.as_mut() else {
            self.misses += graphs.len();
            return self.evaluator.evaluate_batch(graphs);
        };

        let digests: Vec<String> = graphs.iter().map(|g| g.content_digest()).collect();
        let mut resolved: HashMap<&str, Evaluation> = HashMap::new();
        let mut pending: Vec<usize> = Vec::new();

        for (i, digest) in digests.iter().enumerate() {
            if resolved.contains_key(digest.as_str()) || pending.iter().any(|&p| digests[p] == *digest) {
                self.hits += 1;
                continue;
            }
            match cache.get(digest) {
                Some(hit) => {
                    self.hits += 1;
                    resolved.insert(digest.as_str(), hit.clone());
                }
                None => {
                    self.misses += 1;
                    pending.push(i);
                }
            }
        }

        let batch: Vec<&ArgumentGraph> = pending.iter().map(|&i| graphs[i]).collect();
        let fresh = self.evaluator.evaluate_batch(&batch);
        for (&i, evaluation) in pending.iter().zip(fresh) {
            cache.put(digests[i].clone(), evaluation.clone());
            resolved.insert(digests[i].as_str(), evaluation);
        }
        debug!(hits = self.hits, misses = self.misses, "Evaluation cache");

        digests
            .iter()
            .filter_map(|d| resolved.get(d.as_str()).cloned())
            .collect()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medquad_test_utils::fixtures;

    #[test]
    fn test_duplicates_evaluated_once() {
        let mut memo = MemoizedEvaluator::new(ArgumentGraphEvaluator::default(), 8);
        let a = fixtures::claim_with_attacker_and_supporter();
        let b = fixtures::attack_chain();

        let results = memo.evaluate_all(&[&a, &b, &a]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], results[2]);
        assert_eq!(memo.misses(), 2);
        assert_eq!(memo.hits(), 1);

        let again = memo.evaluate_all(&[&b]);
        assert_eq!(again[0], results[1]);
        assert_eq!(memo.hits(), 2);
    }

    #[test]
    fn test_disabled_cache_still_evaluates() {
        let mut memo = MemoizedEvaluator::new(ArgumentGraphEvaluator::default(), 0);
        let a = fixtures::claim_with_attacker_and_supporter();
        let results = memo.evaluate_all(&[&a, &a]);
        assert_eq!(results.len(), 2);
        assert_eq!(memo.hits(), 0);
        assert_eq!(memo.misses(), 2);
    }

    #[test]
    fn test_results_survive_small_capacity() {
        let mut memo = MemoizedEvaluator::new(ArgumentGraphEvaluator::default(), 1);
        let a = fixtures::claim_with_attacker_and_supporter();
        let b = fixtures::attack_chain();
        let c = fixtures::statin_debate();
        let results = memo.evaluate_all(&[&a, &b, &c]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[2], ArgumentGraphEvaluator::default().evaluate(&c));
    }
}

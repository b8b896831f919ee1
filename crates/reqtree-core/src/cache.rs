//! # Tree Cache
//!
//! Caller-owned memo of stats-free trees keyed by action id.
//!
//! A tree built without a snapshot has every leaf `Unknown`; callers
//! re-check it against a snapshot with [`crate::evaluate`]. The cache is
//! bounded and evicts in insertion order. There is no shared instance.

use crate::builder::ExpressionBuilder;
use crate::names::NameResolver;
use crate::primitives::DEFAULT_CACHE_CAPACITY;
use crate::tree::TreeNode;
use crate::types::RawCriterion;
use std::collections::{BTreeMap, VecDeque};

/// Bounded map from action id to its built tree.
///
/// Empty criteria are cached as `None` so repeated lookups stay cheap.
#[derive(Debug, Clone)]
pub struct TreeCache {
    capacity: usize,
    entries: BTreeMap<u64, Option<TreeNode>>,
    order: VecDeque<u64>,
}

impl TreeCache {
    /// Create a cache holding at most `capacity` trees (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: BTreeMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Return the cached tree for `action`, building it on a miss.
    pub fn get_or_build<R: NameResolver + ?Sized>(
        &mut self,
        action: u64,
        criteria: &[RawCriterion],
        resolver: &R,
    ) -> Option<&TreeNode> {
        if !self.entries.contains_key(&action) {
            let tree = ExpressionBuilder::new(resolver).build(criteria);
            self.insert(action, tree);
        }
        self.entries.get(&action).and_then(Option::as_ref)
    }

    fn insert(&mut self, action: u64, tree: Option<TreeNode>) {
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::debug!(action = oldest, "evicted cached tree");
        }
        self.entries.insert(action, tree);
        self.order.push_back(action);
    }

    /// Cached tree for `action`, if present and non-empty.
    #[must_use]
    pub fn get(&self, action: u64) -> Option<&TreeNode> {
        self.entries.get(&action).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn contains(&self, action: u64) -> bool {
        self.entries.contains_key(&action)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl Default for TreeCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NoNames;
    use crate::primitives::{OP_EQUAL, OP_OR};
    use crate::types::Status;

    fn criteria(stat: i64) -> Vec<RawCriterion> {
        vec![
            RawCriterion::new(0, stat, OP_EQUAL, 1),
            RawCriterion::new(1, stat, OP_EQUAL, 2),
            RawCriterion::sentinel(2, OP_OR),
        ]
    }

    #[test]
    fn builds_once_then_hits() {
        let mut cache = TreeCache::new(4);
        let first = cache
            .get_or_build(7, &criteria(1), &NoNames)
            .cloned()
            .expect("tree");
        assert_eq!(first.status(), Status::Unknown);

        // Different criteria under the same id still return the cached tree.
        let second = cache
            .get_or_build(7, &criteria(2), &NoNames)
            .cloned()
            .expect("tree");
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn empty_criteria_are_cached_as_none() {
        let mut cache = TreeCache::new(4);
        assert!(cache.get_or_build(1, &[], &NoNames).is_none());
        assert!(cache.contains(1));
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let mut cache = TreeCache::new(2);
        let _ = cache.get_or_build(1, &criteria(1), &NoNames);
        let _ = cache.get_or_build(2, &criteria(2), &NoNames);
        let _ = cache.get_or_build(3, &criteria(3), &NoNames);

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(1));
        assert!(cache.contains(2));
        assert!(cache.contains(3));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut cache = TreeCache::new(0);
        assert_eq!(cache.capacity(), 1);
        let _ = cache.get_or_build(1, &criteria(1), &NoNames);
        let _ = cache.get_or_build(2, &criteria(2), &NoNames);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(2));
    }

    #[test]
    fn clear_empties_everything() {
        let mut cache = TreeCache::default();
        assert_eq!(cache.capacity(), DEFAULT_CACHE_CAPACITY);
        let _ = cache.get_or_build(1, &criteria(1), &NoNames);
        cache.clear();
        assert!(cache.is_empty());
    }
}

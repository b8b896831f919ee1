//! # Tree Consolidation
//!
//! Rewrites a raw binary tree into its consolidated form:
//! - nested OR chains collapse into one N-ary OR (one choice, total 1)
//! - nested AND chains collapse into one N-ary AND (sum of children)
//! - NOT consolidates its operand without flattening
//! - group nodes consolidate their children without flattening
//!
//! Consolidation is pure and idempotent; the input is never mutated.

use crate::tree::{NodeKind, TreeNode};

/// Consolidate `node` into a new tree.
///
/// Layout metadata is cleared; call [`TreeNode::finalize`] on the result.
#[must_use]
pub fn consolidate(node: &TreeNode) -> TreeNode {
    match node.kind() {
        NodeKind::Requirement(_) => node.detached(),
        NodeKind::Not(child) => TreeNode::not(consolidate(child)),
        NodeKind::And(children) => TreeNode::all(flatten(children, is_and)),
        NodeKind::Or(children) => TreeNode::any(flatten(children, is_or)),
        NodeKind::Group(children) => TreeNode::group(children.iter().map(consolidate).collect()),
    }
}

/// Consolidate each child, splicing in the children of any child that
/// matches `same_op`. Children are consolidated first, so one level of
/// splicing is enough.
fn flatten(children: &[TreeNode], same_op: fn(&TreeNode) -> bool) -> Vec<TreeNode> {
    let mut flat = Vec::with_capacity(children.len());
    for child in children {
        let child = consolidate(child);
        if same_op(&child) {
            flat.extend(child.children().iter().map(TreeNode::detached));
        } else {
            flat.push(child);
        }
    }
    flat
}

fn is_and(node: &TreeNode) -> bool {
    matches!(node.kind(), NodeKind::And(_))
}

fn is_or(node: &TreeNode) -> bool {
    matches!(node.kind(), NodeKind::Or(_))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NoNames;
    use crate::primitives::OP_EQUAL;
    use crate::transformer::{CriterionTransformer, LogicalOp};
    use crate::types::{RawCriterion, StatSnapshot, Status};

    fn leaf(stat: i64, value: i64, stats: &StatSnapshot) -> TreeNode {
        let c = CriterionTransformer::new(&NoNames)
            .normalize(&RawCriterion::new(0, stat, OP_EQUAL, value));
        TreeNode::requirement(c, Some(stats))
    }

    fn stats() -> StatSnapshot {
        [(1, 1), (2, 0), (3, 0), (4, 4)].into_iter().collect()
    }

    #[test]
    fn nested_or_flattens_into_one_choice() {
        let s = stats();
        // ((a OR b) OR c) OR d
        let raw = TreeNode::or(
            TreeNode::or(TreeNode::or(leaf(1, 9, &s), leaf(2, 9, &s)), leaf(3, 9, &s)),
            leaf(4, 4, &s),
        );
        let tree = consolidate(&raw);

        assert_eq!(tree.operator(), Some(LogicalOp::Or));
        assert_eq!(tree.children().len(), 4);
        assert_eq!(tree.total_count(), 1);
        assert_eq!(tree.met_count(), 1);
        assert_eq!(tree.status(), Status::Met);
    }

    #[test]
    fn nested_and_flattens_and_sums() {
        let s = stats();
        // (a AND b) AND (c AND d): a and d met
        let raw = TreeNode::and(
            TreeNode::and(leaf(1, 1, &s), leaf(2, 9, &s)),
            TreeNode::and(leaf(3, 9, &s), leaf(4, 4, &s)),
        );
        let tree = consolidate(&raw);

        assert_eq!(tree.children().len(), 4);
        assert_eq!(tree.total_count(), 4);
        assert_eq!(tree.met_count(), 2);
        assert_eq!(tree.status(), Status::Partial);
    }

    #[test]
    fn or_under_and_counts_once() {
        let s = stats();
        // a AND (b OR c OR d)
        let raw = TreeNode::and(
            leaf(1, 1, &s),
            TreeNode::or(TreeNode::or(leaf(2, 9, &s), leaf(3, 9, &s)), leaf(4, 4, &s)),
        );
        let tree = consolidate(&raw);

        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.total_count(), 2);
        assert_eq!(tree.met_count(), 2);
        assert_eq!(tree.status(), Status::Met);
    }

    #[test]
    fn mixed_operators_do_not_flatten_across() {
        let s = stats();
        // (a AND b) OR c
        let raw = TreeNode::or(TreeNode::and(leaf(1, 1, &s), leaf(2, 9, &s)), leaf(3, 9, &s));
        let tree = consolidate(&raw);

        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[0].operator(), Some(LogicalOp::And));
    }

    #[test]
    fn not_is_not_flattened() {
        let s = stats();
        let raw = TreeNode::not(TreeNode::not(leaf(1, 1, &s)));
        let tree = consolidate(&raw);

        assert_eq!(tree.operator(), Some(LogicalOp::Not));
        assert_eq!(tree.children()[0].operator(), Some(LogicalOp::Not));
        assert_eq!(tree.status(), Status::Met);
    }

    #[test]
    fn consolidation_is_idempotent() {
        let s = stats();
        let raw = TreeNode::and(
            TreeNode::or(TreeNode::or(leaf(1, 1, &s), leaf(2, 2, &s)), leaf(3, 3, &s)),
            TreeNode::and(leaf(4, 4, &s), TreeNode::not(leaf(1, 2, &s))),
        );
        let once = consolidate(&raw);
        let twice = consolidate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn input_is_not_mutated() {
        let s = stats();
        let raw = TreeNode::or(TreeNode::or(leaf(1, 1, &s), leaf(2, 2, &s)), leaf(3, 3, &s));
        let before = raw.clone();
        let _ = consolidate(&raw);
        assert_eq!(raw, before);
    }
}

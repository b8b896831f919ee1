//! # Expression Builder
//!
//! Assembles a requirement tree from a postfix criteria array.
//!
//! ## Shapes
//!
//! - **Flat group**: taken when there are no logical operators, or when
//!   every logical operator is AND and there is more than one stat or
//!   function requirement. Leaves appear in original order.
//! - **Operator tree**: a single-pass stack machine over the sequence.
//!
//! Unbalanced input (zero or several nodes left on the stack, or an operator
//! without enough operands) falls back to the flat group. The builder never
//! fails; the only `None` result is for empty input.

use crate::consolidator::consolidate;
use crate::names::NameResolver;
use crate::transformer::{CriterionTransformer, LogicalOp, NormalizedCriterion};
use crate::tree::TreeNode;
use crate::types::{RawCriterion, StatSnapshot};

/// Builds requirement trees, optionally evaluating leaves against a snapshot.
pub struct ExpressionBuilder<'a, R: NameResolver + ?Sized> {
    transformer: CriterionTransformer<'a, R>,
    stats: Option<&'a StatSnapshot>,
}

impl<'a, R: NameResolver + ?Sized> ExpressionBuilder<'a, R> {
    /// Create a builder without a snapshot; every leaf will be `Unknown`.
    #[must_use]
    pub fn new(resolver: &'a R) -> Self {
        Self {
            transformer: CriterionTransformer::new(resolver),
            stats: None,
        }
    }

    /// Evaluate leaves against `stats` while building.
    #[must_use]
    pub fn with_stats(mut self, stats: Option<&'a StatSnapshot>) -> Self {
        self.stats = stats;
        self
    }

    /// Normalize, build, consolidate and finalize.
    ///
    /// Returns `None` only for an empty criteria array.
    #[must_use]
    pub fn build(&self, criteria: &[RawCriterion]) -> Option<TreeNode> {
        if criteria.is_empty() {
            return None;
        }
        let normalized = self.transformer.normalize_all(criteria);
        self.build_normalized(&normalized)
    }

    /// Build from criteria that are already normalized.
    #[must_use]
    pub fn build_normalized(&self, normalized: &[NormalizedCriterion]) -> Option<TreeNode> {
        if normalized.is_empty() {
            return None;
        }

        let raw = if takes_fast_path(normalized) {
            tracing::trace!(count = normalized.len(), "conjunction fast path");
            self.flat_group(normalized)
        } else {
            self.run_stack(normalized).unwrap_or_else(|| {
                tracing::debug!(
                    count = normalized.len(),
                    "unbalanced criteria expression, falling back to flat group"
                );
                self.flat_group(normalized)
            })
        };

        Some(consolidate(&raw).finalize())
    }

    /// Flat group over every leaf criterion, in original order.
    fn flat_group(&self, normalized: &[NormalizedCriterion]) -> TreeNode {
        let leaves = normalized
            .iter()
            .filter(|c| c.is_leaf())
            .map(|c| TreeNode::requirement(c.clone(), self.stats))
            .collect();
        TreeNode::group(leaves)
    }

    /// Postfix stack machine. `None` means the expression is unbalanced.
    fn run_stack(&self, normalized: &[NormalizedCriterion]) -> Option<TreeNode> {
        let mut stack: Vec<TreeNode> = Vec::with_capacity(normalized.len());

        for criterion in normalized {
            match criterion.logical_op() {
                None => stack.push(TreeNode::requirement(criterion.clone(), self.stats)),
                Some(LogicalOp::Not) => {
                    let operand = stack.pop()?;
                    stack.push(TreeNode::not(operand));
                }
                Some(op) => {
                    if stack.len() < 2 {
                        if criterion.is_separator() {
                            continue;
                        }
                        return None;
                    }
                    let right = stack.pop()?;
                    let left = stack.pop()?;
                    stack.push(match op {
                        LogicalOp::Or => TreeNode::or(left, right),
                        _ => TreeNode::and(left, right),
                    });
                }
            }
        }

        if stack.len() == 1 { stack.pop() } else { None }
    }
}

/// Check whether the flat conjunction shortcut applies.
///
/// Taken when there are no logical operators at all, or when all of them
/// are AND and more than one stat/function requirement is present.
#[must_use]
pub fn takes_fast_path(normalized: &[NormalizedCriterion]) -> bool {
    let mut logical = normalized.iter().filter_map(NormalizedCriterion::logical_op);
    let Some(first) = logical.next() else {
        return true;
    };
    let all_and = first == LogicalOp::And && logical.all(|op| op == LogicalOp::And);

    let requirements = normalized
        .iter()
        .filter(|c| c.is_stat_requirement() || c.is_function_operator())
        .count();

    all_and && requirements > 1
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NoNames;
    use crate::primitives::{OP_AND, OP_EQUAL, OP_GREATER_THAN, OP_IS_FLYING, OP_NOT, OP_OR};
    use crate::tree::NodeKind;
    use crate::types::Status;

    fn req(stat: i64, value: i64) -> RawCriterion {
        RawCriterion::new(0, stat, OP_EQUAL, value)
    }

    fn op(code: i64) -> RawCriterion {
        RawCriterion::sentinel(0, code)
    }

    fn build(criteria: &[RawCriterion], stats: Option<&StatSnapshot>) -> Option<TreeNode> {
        ExpressionBuilder::new(&NoNames)
            .with_stats(stats)
            .build(criteria)
    }

    #[test]
    fn empty_input_builds_nothing() {
        assert!(build(&[], None).is_none());
    }

    #[test]
    fn no_operators_builds_flat_group() {
        let tree = build(&[req(1, 1), req(2, 2), req(3, 3)], None).expect("tree");
        assert!(matches!(tree.kind(), NodeKind::Group(_)));
        assert_eq!(tree.children().len(), 3);
    }

    #[test]
    fn all_and_builds_flat_group_in_order() {
        let tree = build(
            &[req(1, 1), req(2, 2), op(OP_AND), req(3, 3), op(OP_AND)],
            None,
        )
        .expect("tree");
        assert!(matches!(tree.kind(), NodeKind::Group(_)));
        let stats: Vec<i64> = tree
            .children()
            .iter()
            .filter_map(|c| c.criterion().map(|c| c.stat))
            .collect();
        assert_eq!(stats, vec![1, 2, 3]);
    }

    #[test]
    fn or_builds_operator_tree() {
        let tree = build(&[req(1, 1), req(2, 2), op(OP_OR)], None).expect("tree");
        assert_eq!(tree.operator(), Some(LogicalOp::Or));
        assert_eq!(tree.total_count(), 1);
    }

    #[test]
    fn mixed_and_or_builds_nested_tree() {
        // a AND (b OR c)
        let tree = build(
            &[req(1, 1), req(2, 2), req(3, 3), op(OP_OR), op(OP_AND)],
            None,
        )
        .expect("tree");
        assert_eq!(tree.operator(), Some(LogicalOp::And));
        assert_eq!(tree.children()[1].operator(), Some(LogicalOp::Or));
        assert_eq!(tree.total_count(), 2);
    }

    #[test]
    fn not_wraps_one_operand() {
        let stats: StatSnapshot = [(1, 1)].into_iter().collect();
        let tree = build(&[req(1, 1), op(OP_NOT)], Some(&stats)).expect("tree");
        assert_eq!(tree.operator(), Some(LogicalOp::Not));
        assert_eq!(tree.status(), Status::Unmet);
    }

    #[test]
    fn unbalanced_or_falls_back_to_group() {
        let tree = build(&[req(1, 1), op(OP_OR)], None).expect("tree");
        assert!(matches!(tree.kind(), NodeKind::Group(_)));
        assert_eq!(tree.children().len(), 1);

        let tree = build(&[req(1, 1), req(2, 2), req(3, 3), op(OP_OR)], None).expect("tree");
        assert!(matches!(tree.kind(), NodeKind::Group(_)));
        assert_eq!(tree.children().len(), 3);
    }

    #[test]
    fn dangling_not_falls_back_to_group() {
        let tree = build(&[op(OP_NOT), req(1, 1), req(2, 2), op(OP_OR)], None).expect("tree");
        assert!(matches!(tree.kind(), NodeKind::Group(_)));
        assert_eq!(tree.children().len(), 2);
    }

    #[test]
    fn separator_without_operands_is_skipped() {
        // a single requirement followed by a separator
        let tree = build(&[req(1, 1), op(OP_AND)], None).expect("tree");
        assert!(tree.is_requirement());

        // a leading separator in an OR expression
        let tree = build(&[op(OP_AND), req(1, 1), req(2, 2), op(OP_OR)], None).expect("tree");
        assert_eq!(tree.operator(), Some(LogicalOp::Or));
    }

    #[test]
    fn state_gates_become_leaves() {
        let tree = build(
            &[req(1, 1), RawCriterion::new(0, 0, OP_IS_FLYING, 1), op(OP_OR)],
            None,
        )
        .expect("tree");
        assert_eq!(tree.children().len(), 2);
    }

    #[test]
    fn fast_path_predicate() {
        let t = CriterionTransformer::new(&NoNames);
        assert!(takes_fast_path(&t.normalize_all(&[req(1, 1)])));
        assert!(takes_fast_path(
            &t.normalize_all(&[req(1, 1), req(2, 2), op(OP_AND)])
        ));
        assert!(!takes_fast_path(
            &t.normalize_all(&[req(1, 1), op(OP_AND)])
        ));
        assert!(!takes_fast_path(
            &t.normalize_all(&[req(1, 1), req(2, 2), op(OP_OR)])
        ));
        assert!(!takes_fast_path(&t.normalize_all(&[
            req(1, 1),
            op(OP_NOT),
            req(2, 2),
            op(OP_AND)
        ])));
    }

    #[test]
    fn greater_than_leaf_is_evaluated_while_building() {
        let stats: StatSnapshot = [(16, 450)].into_iter().collect();
        let tree = build(&[RawCriterion::new(0, 16, OP_GREATER_THAN, 400)], Some(&stats))
            .expect("tree");
        assert_eq!(tree.status(), Status::Met);
    }
}

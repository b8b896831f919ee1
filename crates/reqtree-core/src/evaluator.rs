//! # Status Evaluator
//!
//! Leaf verdicts and the aggregation rules shared by tree construction,
//! consolidation and re-evaluation.
//!
//! ## Counting
//!
//! - A requirement counts as one (`met_count` 1 if met).
//! - AND and group nodes sum their children ([`aggregate`]).
//! - An OR node is a single choice: `total_count` is always 1.
//! - NOT passes its child's `total_count` through; `met_count` follows the
//!   NOT's own verdict.

use crate::transformer::{Comparison, NormalizedCriterion};
use crate::tree::{NodeKind, TreeNode};
use crate::types::{StatSnapshot, Status};

/// Aggregate counters and verdict of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub met_count: u32,
    pub total_count: u32,
    pub status: Status,
}

// =============================================================================
// LEAVES
// =============================================================================

/// Evaluate one leaf criterion against an optional snapshot.
///
/// Returns `Unknown` without a snapshot, for anything other than a plain
/// stat comparison, and for unrecognized comparison codes. Stats missing
/// from the snapshot read as `0`.
#[must_use]
pub fn evaluate_leaf(criterion: &NormalizedCriterion, stats: Option<&StatSnapshot>) -> Status {
    let Some(stats) = stats else {
        return Status::Unknown;
    };
    if !criterion.is_stat_requirement() {
        return Status::Unknown;
    }
    let Some(comparison) = criterion.comparison() else {
        return Status::Unknown;
    };

    let current = stats.get(&criterion.stat).copied().unwrap_or(0);
    let required = criterion.display_value;

    let met = match comparison {
        Comparison::Equal => current == required,
        Comparison::AtMost => current <= required,
        Comparison::AtLeast => current >= required,
        Comparison::NotEqual => current != required,
        Comparison::Has => current & required == required,
        Comparison::Lacks => current & required == 0,
    };
    Status::from_bool(met)
}

/// Tally of a leaf with the given verdict.
#[must_use]
pub fn leaf_tally(status: Status) -> Tally {
    Tally {
        met_count: u32::from(status == Status::Met),
        total_count: 1,
        status,
    }
}

// =============================================================================
// AGGREGATES
// =============================================================================

/// Generic AND-like aggregation.
///
/// Requirement children contribute `(met ? 1 : 0, 1)`; every other child
/// contributes its own counters, so an OR choice weighs 1 however many
/// alternatives it holds.
#[must_use]
pub fn aggregate(children: &[TreeNode]) -> (u32, u32) {
    children.iter().fold((0u32, 0u32), |(met, total), child| {
        match child.kind() {
            NodeKind::Requirement(_) => (
                met.saturating_add(u32::from(child.status() == Status::Met)),
                total.saturating_add(1),
            ),
            _ => (
                met.saturating_add(child.met_count()),
                total.saturating_add(child.total_count()),
            ),
        }
    })
}

/// Tally of an AND or group node.
///
/// `Met` iff every counted requirement is met. When nothing blocks but
/// something is undecided, the verdict is `Unknown`. Otherwise `Partial`
/// if anything is met, else `Unmet`.
#[must_use]
pub fn all_of(children: &[TreeNode]) -> Tally {
    let (met_count, total_count) = aggregate(children);

    let status = if total_count > 0 && met_count == total_count {
        Status::Met
    } else if !children.iter().any(|c| c.status().is_blocking()) {
        Status::Unknown
    } else if met_count > 0 {
        Status::Partial
    } else {
        Status::Unmet
    };

    Tally {
        met_count,
        total_count,
        status,
    }
}

/// Tally of an OR node: one choice, satisfied if any alternative is.
///
/// A partially satisfied alternative with a non-zero met count satisfies
/// the choice.
#[must_use]
pub fn any_of(children: &[TreeNode]) -> Tally {
    let satisfied = children.iter().any(|c| {
        c.status() == Status::Met || (c.status() == Status::Partial && c.met_count() > 0)
    });
    let met_count = u32::from(satisfied);

    let status = if met_count == 1 {
        Status::Met
    } else if children.iter().any(|c| c.status() == Status::Unknown) {
        Status::Unknown
    } else {
        Status::Unmet
    };

    Tally {
        met_count,
        total_count: 1,
        status,
    }
}

/// Tally of a NOT node over `child`.
#[must_use]
pub fn negate(child: &TreeNode) -> Tally {
    let status = child.status().inverted();
    let total_count = child.total_count();
    let met_count = if status == Status::Met {
        total_count
    } else {
        0
    };

    Tally {
        met_count,
        total_count,
        status,
    }
}

// =============================================================================
// RE-EVALUATION
// =============================================================================

/// Re-evaluate an already built tree against a new snapshot.
///
/// The shape is kept; every leaf is re-checked and every aggregate is
/// recomputed bottom-up. The result is finalized.
#[must_use]
pub fn evaluate_tree(tree: &TreeNode, stats: Option<&StatSnapshot>) -> TreeNode {
    reevaluate(tree, stats).finalize()
}

fn reevaluate(node: &TreeNode, stats: Option<&StatSnapshot>) -> TreeNode {
    match node.kind() {
        NodeKind::Requirement(criterion) => TreeNode::requirement(criterion.clone(), stats),
        NodeKind::Not(child) => TreeNode::not(reevaluate(child, stats)),
        NodeKind::And(children) => TreeNode::all(reevaluate_each(children, stats)),
        NodeKind::Or(children) => TreeNode::any(reevaluate_each(children, stats)),
        NodeKind::Group(children) => TreeNode::group(reevaluate_each(children, stats)),
    }
}

fn reevaluate_each(children: &[TreeNode], stats: Option<&StatSnapshot>) -> Vec<TreeNode> {
    children.iter().map(|c| reevaluate(c, stats)).collect()
}

// =============================================================================
// TESTS
// =============================================================================

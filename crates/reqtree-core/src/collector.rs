//! # Unmet Requirement Collector
//!
//! Walks a finished tree and reports the requirements that block success.
//!
//! Policy by node type:
//! - requirement: reported when `Unmet`
//! - AND / group: descend into every `Unmet` or `Partial` child
//! - OR: descend into all alternatives only when the OR itself is `Unmet`;
//!   a met choice reports nothing
//! - NOT: descend into the operand when the NOT is `Unmet`, surfacing what
//!   must stop being true. Those entries carry a `NOT ` prefixed operator.

use crate::tree::{NodeKind, TreeNode};
use crate::types::{StatSnapshot, Status, UnmetEntry};

/// Collects blocking requirements from a tree.
pub struct UnmetRequirementCollector;

impl UnmetRequirementCollector {
    /// Collect unmet entries in depth-first order.
    #[must_use]
    pub fn collect(tree: &TreeNode, stats: &StatSnapshot) -> Vec<UnmetEntry> {
        let mut out = Vec::new();
        Self::walk(tree, stats, &mut out);
        out
    }

    fn walk(node: &TreeNode, stats: &StatSnapshot, out: &mut Vec<UnmetEntry>) {
        match node.kind() {
            NodeKind::Requirement(_) => {
                if node.status() == Status::Unmet {
                    Self::emit(node, stats, false, out);
                }
            }
            NodeKind::And(children) | NodeKind::Group(children) => {
                for child in children.iter().filter(|c| c.status().is_blocking()) {
                    Self::walk(child, stats, out);
                }
            }
            NodeKind::Or(children) => {
                if node.status() == Status::Unmet {
                    for child in children {
                        Self::walk(child, stats, out);
                    }
                }
            }
            NodeKind::Not(child) => {
                if node.status() == Status::Unmet {
                    Self::walk_negated(child, stats, out);
                }
            }
        }
    }

    /// Walk a subtree that holds but must not: report what is currently met.
    ///
    /// Descends into every child carrying a met count, which includes a
    /// partially met alternative that satisfies an OR.
    fn walk_negated(node: &TreeNode, stats: &StatSnapshot, out: &mut Vec<UnmetEntry>) {
        match node.kind() {
            NodeKind::Requirement(_) => {
                if node.status() == Status::Met {
                    Self::emit(node, stats, true, out);
                }
            }
            NodeKind::And(children) | NodeKind::Or(children) | NodeKind::Group(children) => {
                for child in children.iter().filter(|c| c.met_count() > 0) {
                    Self::walk_negated(child, stats, out);
                }
            }
            // A held NOT means its operand fails; making it hold flips it back.
            NodeKind::Not(child) => Self::walk(child, stats, out),
        }
    }

    fn emit(node: &TreeNode, stats: &StatSnapshot, negated: bool, out: &mut Vec<UnmetEntry>) {
        let Some(criterion) = node.criterion() else {
            return;
        };
        let operator = if negated {
            format!("NOT {}", criterion.display_symbol)
        } else {
            criterion.display_symbol.clone()
        };
        out.push(UnmetEntry {
            stat: criterion.stat,
            stat_name: criterion.stat_name.clone(),
            required: criterion.display_value,
            current: stats.get(&criterion.stat).copied().unwrap_or(0),
            operator,
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Text Formatter
//!
//! Renders trees and postfix expressions as parenthesized boolean strings.
//! Purely presentational.

use crate::transformer::{LogicalOp, NormalizedCriterion};
use crate::tree::{NodeKind, TreeNode};

/// Renders requirement expressions as text.
pub struct TextFormatter;

impl TextFormatter {
    /// Render a tree depth-first.
    ///
    /// Leaves render their description, AND/OR render `(a OP b ...)`,
    /// NOT renders `NOT (x)`, and a flat group joins its children with `AND`.
    #[must_use]
    pub fn format_tree(tree: &TreeNode) -> String {
        match tree.kind() {
            NodeKind::Requirement(c) => c.description.clone(),
            NodeKind::Not(child) => format!("NOT ({})", Self::format_tree(child)),
            NodeKind::And(children) => Self::join(children, LogicalOp::And),
            NodeKind::Or(children) => Self::join(children, LogicalOp::Or),
            NodeKind::Group(children) => children
                .iter()
                .map(Self::format_tree)
                .collect::<Vec<_>>()
                .join(" AND "),
        }
    }

    fn join(children: &[TreeNode], op: LogicalOp) -> String {
        let separator = format!(" {} ", op.keyword());
        let parts: Vec<String> = children.iter().map(Self::format_tree).collect();
        format!("({})", parts.join(&separator))
    }

    /// Render a normalized postfix expression without building a tree.
    ///
    /// Applies the same recovery as the builder: a separator without two
    /// operands is skipped, and an unbalanced expression renders as the
    /// conjunction of its leaves.
    #[must_use]
    pub fn format_postfix(expression: &[NormalizedCriterion]) -> String {
        Self::render_stack(expression).unwrap_or_else(|| {
            expression
                .iter()
                .filter(|c| c.is_leaf())
                .map(|c| c.description.as_str())
                .collect::<Vec<_>>()
                .join(" AND ")
        })
    }

    fn render_stack(expression: &[NormalizedCriterion]) -> Option<String> {
        let mut stack: Vec<String> = Vec::new();

        for criterion in expression {
            match criterion.logical_op() {
                None => stack.push(criterion.description.clone()),
                Some(LogicalOp::Not) => {
                    let operand = stack.pop()?;
                    stack.push(format!("NOT ({})", operand));
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
                    stack.push(format!("({} {} {})", left, op.keyword(), right));
                }
            }
        }

        if stack.len() == 1 { stack.pop() } else { None }
    }
}

// =============================================================================
// TESTS
// =============================================================================

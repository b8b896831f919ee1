//! # Engine Surface
//!
//! The per-call entry points consumers use. Each is a pure function of its
//! arguments: nothing is cached or shared between calls.

use crate::builder::ExpressionBuilder;
use crate::collector::UnmetRequirementCollector;
use crate::evaluator;
use crate::formatter::TextFormatter;
use crate::names::NameResolver;
use crate::transformer::{CriterionTransformer, NormalizedCriterion};
use crate::tree::TreeNode;
use crate::types::{CheckResult, RawCriterion, StatSnapshot, Status};

/// Normalize every criterion, preserving order.
#[must_use]
pub fn normalize<R: NameResolver + ?Sized>(
    criteria: &[RawCriterion],
    resolver: &R,
) -> Vec<NormalizedCriterion> {
    CriterionTransformer::new(resolver).normalize_all(criteria)
}

/// Build a consolidated, finalized tree. `None` for empty input.
///
/// Without a snapshot every leaf is `Unknown`.
#[must_use]
pub fn build_tree<R: NameResolver + ?Sized>(
    criteria: &[RawCriterion],
    stats: Option<&StatSnapshot>,
    resolver: &R,
) -> Option<TreeNode> {
    ExpressionBuilder::new(resolver)
        .with_stats(stats)
        .build(criteria)
}

/// Re-check an already built tree against another snapshot.
#[must_use]
pub fn evaluate(tree: &TreeNode, stats: Option<&StatSnapshot>) -> TreeNode {
    evaluator::evaluate_tree(tree, stats)
}

/// Decide whether an actor with `stats` may perform the action.
///
/// Empty criteria always pass. A root that evaluates to `Unknown` is
/// passable; `Unmet` and `Partial` block and list their unmet leaves.
#[must_use]
pub fn check_requirements<R: NameResolver + ?Sized>(
    criteria: &[RawCriterion],
    stats: &StatSnapshot,
    resolver: &R,
) -> CheckResult {
    let Some(tree) = build_tree(criteria, Some(stats), resolver) else {
        return CheckResult::pass();
    };

    let can_perform = matches!(tree.status(), Status::Met | Status::Unknown);
    let unmet = UnmetRequirementCollector::collect(&tree, stats);
    tracing::trace!(
        can_perform,
        unmet = unmet.len(),
        status = %tree.status(),
        "requirements checked"
    );

    CheckResult { can_perform, unmet }
}

/// Something the text formatter can render.
#[derive(Debug, Clone, Copy)]
pub enum Formattable<'a> {
    Tree(&'a TreeNode),
    Expression(&'a [NormalizedCriterion]),
}

impl<'a> From<&'a TreeNode> for Formattable<'a> {
    fn from(tree: &'a TreeNode) -> Self {
        Self::Tree(tree)
    }
}

impl<'a> From<&'a [NormalizedCriterion]> for Formattable<'a> {
    fn from(expression: &'a [NormalizedCriterion]) -> Self {
        Self::Expression(expression)
    }
}

impl<'a> From<&'a Vec<NormalizedCriterion>> for Formattable<'a> {
    fn from(expression: &'a Vec<NormalizedCriterion>) -> Self {
        Self::Expression(expression)
    }
}

/// Render a tree or a postfix expression as a boolean string.
#[must_use]
pub fn format<'a>(target: impl Into<Formattable<'a>>) -> String {
    match target.into() {
        Formattable::Tree(tree) => TextFormatter::format_tree(tree),
        Formattable::Expression(expression) => TextFormatter::format_postfix(expression),
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Requirement Tree
//!
//! Tagged-union tree produced by the expression builder.
//!
//! Construction goes through arity-checked constructors only:
//! - [`TreeNode::requirement`] wraps one normalized criterion
//! - [`TreeNode::not`] takes exactly one operand
//! - [`TreeNode::and`] / [`TreeNode::or`] take exactly two operands
//! - [`TreeNode::group`] holds the flat fallback conjunction
//!
//! N-ary AND/OR nodes only appear through consolidation. Every constructor
//! computes `met_count`, `total_count` and `status` immediately, so a node
//! is always internally consistent. Trees are built fresh per call and are
//! not mutated after [`TreeNode::finalize`] assigns layout metadata.

use crate::evaluator::{self, Tally};
use crate::transformer::{LogicalOp, NormalizedCriterion};
use crate::types::{StatSnapshot, Status};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Node payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Leaf wrapping exactly one criterion.
    Requirement(NormalizedCriterion),
    /// Unary negation.
    Not(Box<TreeNode>),
    /// Conjunction. Two operands when built, N after consolidation.
    And(Vec<TreeNode>),
    /// Disjunction. Two operands when built, N after consolidation.
    Or(Vec<TreeNode>),
    /// Flat conjunction used by the no-operator fallback.
    Group(Vec<TreeNode>),
}

/// A node of a requirement tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    kind: NodeKind,
    met_count: u32,
    total_count: u32,
    status: Status,
    level: usize,
    is_last: bool,
}

impl TreeNode {
    fn from_tally(kind: NodeKind, tally: Tally) -> Self {
        Self {
            kind,
            met_count: tally.met_count,
            total_count: tally.total_count,
            status: tally.status,
            level: 0,
            is_last: false,
        }
    }

    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Leaf node, evaluated against `stats` on construction.
    #[must_use]
    pub fn requirement(criterion: NormalizedCriterion, stats: Option<&StatSnapshot>) -> Self {
        let status = evaluator::evaluate_leaf(&criterion, stats);
        Self::from_tally(
            NodeKind::Requirement(criterion),
            evaluator::leaf_tally(status),
        )
    }

    /// Negation of exactly one operand.
    #[must_use]
    pub fn not(operand: TreeNode) -> Self {
        let tally = evaluator::negate(&operand);
        Self::from_tally(NodeKind::Not(Box::new(operand)), tally)
    }

    /// Conjunction of exactly two operands.
    #[must_use]
    pub fn and(left: TreeNode, right: TreeNode) -> Self {
        Self::all(vec![left, right])
    }

    /// Disjunction of exactly two operands.
    #[must_use]
    pub fn or(left: TreeNode, right: TreeNode) -> Self {
        Self::any(vec![left, right])
    }

    /// Flat conjunction over leaves in original order.
    #[must_use]
    pub fn group(children: Vec<TreeNode>) -> Self {
        let tally = evaluator::all_of(&children);
        Self::from_tally(NodeKind::Group(children), tally)
    }

    /// N-ary conjunction. Reserved for consolidation and re-evaluation.
    pub(crate) fn all(children: Vec<TreeNode>) -> Self {
        let tally = evaluator::all_of(&children);
        Self::from_tally(NodeKind::And(children), tally)
    }

    /// N-ary disjunction. Reserved for consolidation and re-evaluation.
    pub(crate) fn any(children: Vec<TreeNode>) -> Self {
        let tally = evaluator::any_of(&children);
        Self::from_tally(NodeKind::Or(children), tally)
    }

    /// Copy of this node with layout metadata cleared.
    pub(crate) fn detached(&self) -> Self {
        Self {
            level: 0,
            is_last: false,
            ..self.clone()
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn met_count(&self) -> u32 {
        self.met_count
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// Depth from the root (root is 0). Layout only.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Whether this node is the last of its siblings. Layout only.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// Logical operator of an operator node.
    #[must_use]
    pub fn operator(&self) -> Option<LogicalOp> {
        match self.kind {
            NodeKind::And(_) => Some(LogicalOp::And),
            NodeKind::Or(_) => Some(LogicalOp::Or),
            NodeKind::Not(_) => Some(LogicalOp::Not),
            NodeKind::Requirement(_) | NodeKind::Group(_) => None,
        }
    }

    /// Criterion of a requirement node.
    #[must_use]
    pub fn criterion(&self) -> Option<&NormalizedCriterion> {
        match &self.kind {
            NodeKind::Requirement(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        match &self.kind {
            NodeKind::Requirement(_) => &[],
            NodeKind::Not(child) => std::slice::from_ref(child.as_ref()),
            NodeKind::And(children) | NodeKind::Or(children) | NodeKind::Group(children) => {
                children
            }
        }
    }

    #[must_use]
    pub fn is_requirement(&self) -> bool {
        matches!(self.kind, NodeKind::Requirement(_))
    }

    /// Number of requirement leaves anywhere below (or at) this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Requirement(_) => 1,
            _ => self.children().iter().map(TreeNode::leaf_count).sum(),
        }
    }

    // =========================================================================
    // LAYOUT
    // =========================================================================

    /// Assign `level` and `is_last` depth-first. The root is level 0 and last.
    #[must_use]
    pub fn finalize(self) -> Self {
        self.place(0, true)
    }

    fn place(mut self, level: usize, is_last: bool) -> Self {
        self.level = level;
        self.is_last = is_last;
        self.kind = match self.kind {
            NodeKind::Requirement(c) => NodeKind::Requirement(c),
            NodeKind::Not(child) => NodeKind::Not(Box::new(child.place(level + 1, true))),
            NodeKind::And(children) => NodeKind::And(place_children(children, level + 1)),
            NodeKind::Or(children) => NodeKind::Or(place_children(children, level + 1)),
            NodeKind::Group(children) => NodeKind::Group(place_children(children, level + 1)),
        };
        self
    }

    /// Flatten into display rows, depth-first.
    #[must_use]
    pub fn rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        self.collect_rows(&mut rows);
        rows
    }

    fn collect_rows(&self, rows: &mut Vec<TreeRow>) {
        let label = match &self.kind {
            NodeKind::Requirement(c) => c.description.clone(),
            NodeKind::Group(_) => "ALL OF".to_string(),
            NodeKind::Not(_) | NodeKind::And(_) | NodeKind::Or(_) => self
                .operator()
                .map(|op| op.keyword().to_string())
                .unwrap_or_default(),
        };
        rows.push(TreeRow {
            level: self.level,
            is_last: self.is_last,
            label,
            status: self.status,
            met_count: self.met_count,
            total_count: self.total_count,
        });
        for child in self.children() {
            child.collect_rows(rows);
        }
    }
}

fn place_children(children: Vec<TreeNode>, level: usize) -> Vec<TreeNode> {
    let last = children.len().saturating_sub(1);
    children
        .into_iter()
        .enumerate()
        .map(|(i, child)| child.place(level, i == last))
        .collect()
}

/// One flattened line of a tree, for renderers that draw connectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub level: usize,
    pub is_last: bool,
    pub label: String,
    pub status: Status,
    pub met_count: u32,
    pub total_count: u32,
}

// =============================================================================
// SERIALIZATION
// =============================================================================

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node_type = match self.kind {
            NodeKind::Requirement(_) => "requirement",
            NodeKind::Group(_) => "group",
            NodeKind::Not(_) | NodeKind::And(_) | NodeKind::Or(_) => "operator",
        };

        let mut state = serializer.serialize_struct("TreeNode", 9)?;
        state.serialize_field("type", node_type)?;
        state.serialize_field("operator", &self.operator())?;
        state.serialize_field("criterion", &self.criterion())?;
        state.serialize_field("children", self.children())?;
        state.serialize_field("met_count", &self.met_count)?;
        state.serialize_field("total_count", &self.total_count)?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("level", &self.level)?;
        state.serialize_field("is_last", &self.is_last)?;
        state.end()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NoNames;
    use crate::primitives::OP_EQUAL;
    use crate::transformer::CriterionTransformer;
    use crate::types::RawCriterion;

    fn leaf(stat: i64, value: i64, stats: Option<&StatSnapshot>) -> TreeNode {
        let c = CriterionTransformer::new(&NoNames)
            .normalize(&RawCriterion::new(0, stat, OP_EQUAL, value));
        TreeNode::requirement(c, stats)
    }

    #[test]
    fn requirement_counts_as_one() {
        let stats: StatSnapshot = [(1, 5)].into_iter().collect();
        let node = leaf(1, 5, Some(&stats));
        assert_eq!(node.total_count(), 1);
        assert_eq!(node.met_count(), 1);
        assert_eq!(node.status(), Status::Met);
        assert!(node.children().is_empty());
    }

    #[test]
    fn not_has_one_child() {
        let node = TreeNode::not(leaf(1, 5, None));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.operator(), Some(LogicalOp::Not));
    }

    #[test]
    fn finalize_assigns_levels_and_last_flags() {
        let tree = TreeNode::and(
            leaf(1, 1, None),
            TreeNode::or(leaf(2, 2, None), leaf(3, 3, None)),
        )
        .finalize();

        assert_eq!(tree.level(), 0);
        assert!(tree.is_last());

        let children = tree.children();
        assert_eq!(children[0].level(), 1);
        assert!(!children[0].is_last());
        assert!(children[1].is_last());

        let grand = children[1].children();
        assert_eq!(grand[0].level(), 2);
        assert!(!grand[0].is_last());
        assert!(grand[1].is_last());
    }

    #[test]
    fn rows_are_depth_first() {
        let tree = TreeNode::or(leaf(1, 1, None), TreeNode::not(leaf(2, 2, None))).finalize();
        let labels: Vec<String> = tree.rows().into_iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["OR", "Stat 1 = 1", "NOT", "Stat 2 = 2"]);
    }

    #[test]
    fn leaf_count_walks_all_kinds() {
        let tree = TreeNode::group(vec![
            leaf(1, 1, None),
            TreeNode::not(TreeNode::or(leaf(2, 2, None), leaf(3, 3, None))),
        ]);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn serializes_with_type_tag() {
        let tree = TreeNode::or(leaf(1, 1, None), leaf(2, 2, None)).finalize();
        let json = serde_json::to_value(&tree).expect("serialize");
        assert_eq!(json["type"], "operator");
        assert_eq!(json["operator"], "Or");
        assert_eq!(json["children"][0]["type"], "requirement");
        assert_eq!(json["children"][1]["is_last"], true);
    }
}

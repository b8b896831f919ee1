//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//! Each command returns its rendered output; `execute` prints it.

use super::CriteriaArgs;
use crate::input::{load_criteria, load_stats};
use reqtree_core::{
    CheckResult, CriterionKind, NameTable, NormalizedCriterion, ReqTreeError, TreeNode,
    build_tree, check_requirements, format, normalize,
};
use serde::Serialize;
use std::path::Path;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReqTreeError> {
    serde_json::to_string_pretty(value).map_err(|e| ReqTreeError::SerializationError(e.to_string()))
}

// =============================================================================
// DESCRIBE COMMAND
// =============================================================================

/// List every criterion with its classification and description.
pub fn cmd_describe(
    names: &NameTable,
    json_mode: bool,
    input: &CriteriaArgs,
) -> Result<String, ReqTreeError> {
    let criteria = load_criteria(&input.criteria, input.input_format)?;
    let normalized = normalize(&criteria, names);

    if json_mode {
        return to_json(&normalized);
    }
    Ok(render_criteria(&normalized))
}

/// Short class label for a normalized criterion.
pub fn class_label(criterion: &NormalizedCriterion) -> &'static str {
    match criterion.kind {
        CriterionKind::Logical(op) => op.keyword(),
        CriterionKind::UnknownOperator => "UNKNOWN",
        CriterionKind::StateGate => "state",
        CriterionKind::Function(_) => "function",
        CriterionKind::Stat(_) => "stat",
    }
}

/// One line per criterion: id, class, description.
pub fn render_criteria(normalized: &[NormalizedCriterion]) -> String {
    normalized
        .iter()
        .map(|c| format!("{:>4}  {:<8}  {}", c.id, class_label(c), c.description))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// TREE COMMAND
// =============================================================================

/// Build and draw the requirement tree.
pub fn cmd_tree(
    names: &NameTable,
    json_mode: bool,
    input: &CriteriaArgs,
    stats: Option<&Path>,
) -> Result<String, ReqTreeError> {
    let criteria = load_criteria(&input.criteria, input.input_format)?;
    let stats = stats.map(load_stats).transpose()?;
    let tree = build_tree(&criteria, stats.as_ref(), names);

    if json_mode {
        return to_json(&tree);
    }
    Ok(tree
        .as_ref()
        .map(render_tree)
        .unwrap_or_else(|| "(no requirements)".to_string()))
}

/// Draw a finalized tree with connector lines.
///
/// ```text
/// AND [partial 1/2]
/// ├─ Stat 16 ≥ 401 [met 1/1]
/// └─ OR [unmet 0/1]
///    ├─ Stat 60 = 5 [unmet 0/1]
///    └─ Stat 60 = 7 [unmet 0/1]
/// ```
pub fn render_tree(tree: &TreeNode) -> String {
    let mut lines = Vec::new();
    // is_last of each ancestor below the root, by depth
    let mut ancestors: Vec<bool> = Vec::new();

    for row in tree.rows() {
        let mut line = String::new();
        if row.level > 0 {
            ancestors.truncate(row.level - 1);
            for &last in &ancestors {
                line.push_str(if last { "   " } else { "│  " });
            }
            line.push_str(if row.is_last { "└─ " } else { "├─ " });
            ancestors.push(row.is_last);
        }
        line.push_str(&format!(
            "{} [{} {}/{}]",
            row.label, row.status, row.met_count, row.total_count
        ));
        lines.push(line);
    }

    lines.join("\n")
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Check requirements against a stat snapshot.
pub fn cmd_check(
    names: &NameTable,
    json_mode: bool,
    input: &CriteriaArgs,
    stats: &Path,
) -> Result<String, ReqTreeError> {
    let criteria = load_criteria(&input.criteria, input.input_format)?;
    let stats = load_stats(stats)?;
    let result = check_requirements(&criteria, &stats, names);

    tracing::info!(
        can_perform = result.can_perform,
        unmet = result.unmet.len(),
        "requirements checked"
    );

    if json_mode {
        return to_json(&result);
    }
    Ok(render_check(&result))
}

/// Verdict line followed by one line per blocking requirement.
pub fn render_check(result: &CheckResult) -> String {
    if result.can_perform {
        return "PASS".to_string();
    }

    let mut lines = vec![format!("BLOCKED ({} unmet)", result.unmet.len())];
    for entry in &result.unmet {
        lines.push(format!(
            "  {}: need {} {}, have {}",
            entry.stat_name, entry.operator, entry.required, entry.current
        ));
    }
    lines.join("\n")
}

// =============================================================================
// FORMAT COMMAND
// =============================================================================

#[derive(Serialize)]
struct FormatOutput {
    expression: String,
    postfix: bool,
}

/// Render the expression as a parenthesized boolean string.
pub fn cmd_format(
    names: &NameTable,
    json_mode: bool,
    input: &CriteriaArgs,
    postfix: bool,
) -> Result<String, ReqTreeError> {
    let criteria = load_criteria(&input.criteria, input.input_format)?;

    let expression = if postfix {
        format(&normalize(&criteria, names))
    } else {
        build_tree(&criteria, None, names)
            .map(|tree| format(&tree))
            .unwrap_or_default()
    };

    if json_mode {
        return to_json(&FormatOutput {
            expression,
            postfix,
        });
    }
    Ok(expression)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use reqtree_core::primitives::{OP_AND, OP_EQUAL, OP_OR};
    use reqtree_core::{NoNames, RawCriterion, StatSnapshot, UnmetEntry};

    #[test]
    fn nested_rows_keep_open_branches() {
        // a AND (b OR c) AND d: the OR is not last, so its children keep a bar
        let criteria = [
            RawCriterion::new(0, 1, OP_EQUAL, 1),
            RawCriterion::new(1, 2, OP_EQUAL, 2),
            RawCriterion::new(2, 3, OP_EQUAL, 3),
            RawCriterion::sentinel(3, OP_OR),
            RawCriterion::sentinel(4, OP_AND),
            RawCriterion::new(5, 4, OP_EQUAL, 4),
            RawCriterion::sentinel(6, OP_AND),
        ];
        let stats: StatSnapshot = [(1, 1), (3, 3), (4, 4)].into_iter().collect();
        let tree = build_tree(&criteria, Some(&stats), &NoNames).expect("tree");

        let expected = [
            "AND [met 3/3]",
            "├─ Stat 1 = 1 [met 1/1]",
            "├─ OR [met 1/1]",
            "│  ├─ Stat 2 = 2 [unmet 0/1]",
            "│  └─ Stat 3 = 3 [met 1/1]",
            "└─ Stat 4 = 4 [met 1/1]",
        ]
        .join("\n");
        assert_eq!(render_tree(&tree), expected);
    }

    #[test]
    fn check_rendering() {
        assert_eq!(render_check(&CheckResult::pass()), "PASS");

        let blocked = CheckResult {
            can_perform: false,
            unmet: vec![UnmetEntry {
                stat: 54,
                stat_name: "Level".to_string(),
                required: 100,
                current: 42,
                operator: "≥".to_string(),
            }],
        };
        assert_eq!(
            render_check(&blocked),
            "BLOCKED (1 unmet)\n  Level: need ≥ 100, have 42"
        );
    }

    #[test]
    fn class_labels() {
        let normalized = normalize(
            &[
                RawCriterion::new(0, 16, OP_EQUAL, 1),
                RawCriterion::sentinel(1, OP_OR),
                RawCriterion::sentinel(2, 99),
            ],
            &NoNames,
        );
        let labels: Vec<&str> = normalized.iter().map(class_label).collect();
        assert_eq!(labels, vec!["stat", "OR", "UNKNOWN"]);
    }
}

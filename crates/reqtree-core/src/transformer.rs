//! # Criterion Transformer
//!
//! Classifies and normalizes one raw criterion into a display-ready form.
//!
//! Classification runs in priority order:
//! 1. `stat == 0 && value == 0` → logical sentinel (or unknown operator)
//! 2. operator in the state-gate table → fixed descriptive text
//! 3. operator in the function table → reference-id check
//! 4. anything else → stat comparison
//!
//! Normalization is total: unknown codes degrade to `OpN` labels.

use crate::names::{EnumKind, NameResolver, label_flag, label_stat};
use crate::primitives::{
    OP_AND, OP_BIT_CLEAR, OP_BIT_SET, OP_EQUAL, OP_GREATER_THAN, OP_HAS_NOT_RUNNING_NANO,
    OP_HAS_RUNNING_NANO, OP_HAS_WORN_ITEM, OP_LESS_THAN, OP_NOT, OP_NOT_EQUAL, OP_OR, STAT_BREED,
    STAT_GENDER, STAT_LEVEL, STAT_PROFESSION, state_gate_text,
};
use crate::types::RawCriterion;
use serde::Serialize;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Logical operator carried by a sentinel criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl LogicalOp {
    /// Decode a sentinel operator code.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            OP_AND => Some(LogicalOp::And),
            OP_OR => Some(LogicalOp::Or),
            OP_NOT => Some(LogicalOp::Not),
            _ => None,
        }
    }

    /// Upper-case keyword used in formatted expressions.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
            LogicalOp::Not => "NOT",
        }
    }
}

impl std::fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Displayed comparison of a stat requirement.
///
/// Strict bounds never appear here: `<` and `>` are rewritten to inclusive
/// bounds on the displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Comparison {
    Equal,
    AtMost,
    AtLeast,
    NotEqual,
    Has,
    Lacks,
}

impl Comparison {
    /// Display symbol.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Equal => "=",
            Comparison::AtMost => "≤",
            Comparison::AtLeast => "≥",
            Comparison::NotEqual => "≠",
            Comparison::Has => "has",
            Comparison::Lacks => "lacks",
        }
    }

    /// Human name of the comparison.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Comparison::Equal => "Equal",
            Comparison::AtMost => "At most",
            Comparison::AtLeast => "At least",
            Comparison::NotEqual => "Not equal",
            Comparison::Has => "Has flag",
            Comparison::Lacks => "Lacks flag",
        }
    }
}

/// Function-style checks parameterized by a reference id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FunctionOp {
    HasWornItem,
    HasRunningNano,
    HasNotRunningNano,
}

impl FunctionOp {
    /// Decode a function operator code.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            OP_HAS_WORN_ITEM => Some(FunctionOp::HasWornItem),
            OP_HAS_RUNNING_NANO => Some(FunctionOp::HasRunningNano),
            OP_HAS_NOT_RUNNING_NANO => Some(FunctionOp::HasNotRunningNano),
            _ => None,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            FunctionOp::HasWornItem => "wears",
            FunctionOp::HasRunningNano => "running",
            FunctionOp::HasNotRunningNano => "not running",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FunctionOp::HasWornItem => "Wears item",
            FunctionOp::HasRunningNano => "Running effect",
            FunctionOp::HasNotRunningNano => "Not running effect",
        }
    }

    fn describe(&self, reference: i64) -> String {
        match self {
            FunctionOp::HasWornItem => format!("Must wear item {}", reference),
            FunctionOp::HasRunningNano => format!("Effect {} must be running", reference),
            FunctionOp::HasNotRunningNano => format!("Effect {} must not be running", reference),
        }
    }
}

/// Classification of a normalized criterion.
///
/// Exactly one variant applies, so the classification flags exposed by
/// [`NormalizedCriterion`] are mutually exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "class", content = "detail", rename_all = "snake_case")]
pub enum CriterionKind {
    /// Logical sentinel.
    Logical(LogicalOp),
    /// Sentinel encoding with an unrecognized operator code.
    UnknownOperator,
    /// Non-comparative state flag with fixed text. Never evaluable.
    StateGate,
    /// Reference-id check. Never evaluable without an external check.
    Function(FunctionOp),
    /// Stat comparison. `None` for unrecognized comparison codes.
    Stat(Option<Comparison>),
}

// =============================================================================
// NORMALIZED CRITERION
// =============================================================================

/// A criterion classified and rendered for display. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedCriterion {
    pub id: u32,
    pub stat: i64,
    pub operator: i64,
    pub value: i64,
    pub kind: CriterionKind,
    pub stat_name: String,
    pub display_value: i64,
    pub display_operator_name: String,
    pub display_symbol: String,
    pub description: String,
}

impl NormalizedCriterion {
    #[must_use]
    pub fn is_logical_operator(&self) -> bool {
        matches!(self.kind, CriterionKind::Logical(_))
    }

    /// The AND sentinel doubles as a separator between requirements.
    #[must_use]
    pub fn is_separator(&self) -> bool {
        matches!(self.kind, CriterionKind::Logical(LogicalOp::And))
    }

    #[must_use]
    pub fn is_stat_requirement(&self) -> bool {
        matches!(self.kind, CriterionKind::Stat(_))
    }

    #[must_use]
    pub fn is_function_operator(&self) -> bool {
        matches!(self.kind, CriterionKind::Function(_))
    }

    /// Check whether this criterion becomes a leaf of a requirement tree.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        !self.is_logical_operator()
    }

    #[must_use]
    pub fn logical_op(&self) -> Option<LogicalOp> {
        match self.kind {
            CriterionKind::Logical(op) => Some(op),
            _ => None,
        }
    }

    #[must_use]
    pub fn comparison(&self) -> Option<Comparison> {
        match self.kind {
            CriterionKind::Stat(cmp) => cmp,
            _ => None,
        }
    }
}

// =============================================================================
// TRANSFORMER
// =============================================================================

/// Normalizes raw criteria against a name resolver.
pub struct CriterionTransformer<'a, R: NameResolver + ?Sized> {
    resolver: &'a R,
}

impl<'a, R: NameResolver + ?Sized> CriterionTransformer<'a, R> {
    /// Create a transformer backed by `resolver`.
    #[must_use]
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// Normalize a whole postfix array, preserving order.
    #[must_use]
    pub fn normalize_all(&self, criteria: &[RawCriterion]) -> Vec<NormalizedCriterion> {
        criteria.iter().map(|raw| self.normalize(raw)).collect()
    }

    /// Normalize one criterion. Never fails.
    #[must_use]
    pub fn normalize(&self, raw: &RawCriterion) -> NormalizedCriterion {
        if raw.is_sentinel() {
            return Self::sentinel(raw);
        }

        if let Some(text) = state_gate_text(raw.operator) {
            return NormalizedCriterion {
                id: raw.id,
                stat: raw.stat,
                operator: raw.operator,
                value: raw.value,
                kind: CriterionKind::StateGate,
                stat_name: label_stat(self.resolver, raw.stat),
                display_value: raw.value,
                display_operator_name: "State".to_string(),
                display_symbol: String::new(),
                description: text.to_string(),
            };
        }

        if let Some(function) = FunctionOp::from_code(raw.operator) {
            return NormalizedCriterion {
                id: raw.id,
                stat: raw.stat,
                operator: raw.operator,
                value: raw.value,
                kind: CriterionKind::Function(function),
                stat_name: label_stat(self.resolver, raw.stat),
                display_value: raw.value,
                display_operator_name: function.name().to_string(),
                display_symbol: function.symbol().to_string(),
                description: function.describe(raw.value),
            };
        }

        self.stat_requirement(raw)
    }

    fn sentinel(raw: &RawCriterion) -> NormalizedCriterion {
        let (kind, name, symbol, description) = match LogicalOp::from_code(raw.operator) {
            Some(op) => {
                let keyword = op.keyword().to_string();
                (
                    CriterionKind::Logical(op),
                    keyword.clone(),
                    keyword.clone(),
                    keyword,
                )
            }
            None => {
                let label = format!("Op{}", raw.operator);
                (
                    CriterionKind::UnknownOperator,
                    label.clone(),
                    label.clone(),
                    format!("Unknown operator {}", label),
                )
            }
        };

        NormalizedCriterion {
            id: raw.id,
            stat: raw.stat,
            operator: raw.operator,
            value: raw.value,
            kind,
            stat_name: String::new(),
            display_value: 0,
            display_operator_name: name,
            display_symbol: symbol,
            description,
        }
    }

    fn stat_requirement(&self, raw: &RawCriterion) -> NormalizedCriterion {
        let stat_name = label_stat(self.resolver, raw.stat);

        let (comparison, display_value) = match raw.operator {
            OP_EQUAL => (Some(Comparison::Equal), raw.value),
            OP_LESS_THAN => (Some(Comparison::AtMost), raw.value.saturating_sub(1)),
            OP_GREATER_THAN => (Some(Comparison::AtLeast), raw.value.saturating_add(1)),
            OP_BIT_SET => (Some(Comparison::Has), raw.value),
            OP_NOT_EQUAL => (Some(Comparison::NotEqual), raw.value),
            OP_BIT_CLEAR => (Some(Comparison::Lacks), raw.value),
            _ => (None, raw.value),
        };

        let (operator_name, symbol, description) = match comparison {
            Some(cmp) => (
                cmp.name().to_string(),
                cmp.symbol().to_string(),
                self.describe(raw.stat, &stat_name, cmp, display_value),
            ),
            None => {
                let label = format!("Op{}", raw.operator);
                let description = format!("{} {} {}", stat_name, label, raw.value);
                (label.clone(), label, description)
            }
        };

        NormalizedCriterion {
            id: raw.id,
            stat: raw.stat,
            operator: raw.operator,
            value: raw.value,
            kind: CriterionKind::Stat(comparison),
            stat_name,
            display_value,
            display_operator_name: operator_name,
            display_symbol: symbol,
            description,
        }
    }

    fn describe(&self, stat: i64, stat_name: &str, cmp: Comparison, value: i64) -> String {
        match cmp {
            Comparison::Has => format!(
                "{} has {}",
                stat_name,
                label_flag(self.resolver, stat, value)
            ),
            Comparison::Lacks => format!(
                "{} lacks {}",
                stat_name,
                label_flag(self.resolver, stat, value)
            ),
            Comparison::Equal => self
                .describe_special(stat, value)
                .unwrap_or_else(|| format!("{} = {}", stat_name, value)),
            _ => format!("{} {} {}", stat_name, cmp.symbol(), value),
        }
    }

    /// Bespoke text for well-known stats compared with `=`.
    fn describe_special(&self, stat: i64, value: i64) -> Option<String> {
        match stat {
            STAT_LEVEL => Some(format!("Must be level {}", value)),
            STAT_PROFESSION => self
                .resolver
                .enum_name(EnumKind::Profession, value)
                .map(|name| format!("Must be a {}", name)),
            STAT_BREED => self
                .resolver
                .enum_name(EnumKind::Breed, value)
                .map(|name| format!("Breed must be {}", name)),
            STAT_GENDER => self
                .resolver
                .enum_name(EnumKind::Gender, value)
                .map(|name| format!("Gender must be {}", name)),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

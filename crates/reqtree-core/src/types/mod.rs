//! # Core Type Definitions
//!
//! This module contains the plain data types shared by every stage of the engine:
//! - Input triples (`RawCriterion`) and actor snapshots (`StatSnapshot`)
//! - Verdicts (`Status`)
//! - Consumer outputs (`UnmetEntry`, `CheckResult`)
//! - Boundary errors (`ReqTreeError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Use `BTreeMap` for keyed data so iteration order is stable

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

// =============================================================================
// INPUT
// =============================================================================

/// One opaque `(stat, operator, value)` condition from rule data.
///
/// Unvalidated: any combination of integers is accepted and classified
/// later by the transformer. Order within an array is significant (postfix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawCriterion {
    /// Position or source identifier. Carried through for display only.
    #[serde(default)]
    pub id: u32,
    /// Stat code. `0` together with `value == 0` marks a logical sentinel.
    pub stat: i64,
    /// Operator code.
    #[serde(rename = "op", alias = "operator")]
    pub operator: i64,
    /// Threshold, flag mask, or reference id depending on the operator.
    pub value: i64,
}

impl RawCriterion {
    /// Create a new criterion.
    #[must_use]
    pub const fn new(id: u32, stat: i64, operator: i64, value: i64) -> Self {
        Self {
            id,
            stat,
            operator,
            value,
        }
    }

    /// Create a logical-operator sentinel (`stat = 0`, `value = 0`).
    #[must_use]
    pub const fn sentinel(id: u32, operator: i64) -> Self {
        Self::new(id, 0, operator, 0)
    }

    /// Check whether this criterion uses the sentinel encoding.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        self.stat == 0 && self.value == 0
    }
}

/// Actor attribute snapshot: stat code to current value.
///
/// Stats absent from the snapshot read as `0`.
pub type StatSnapshot = BTreeMap<i64, i64>;

// =============================================================================
// STATUS
// =============================================================================

/// Evaluation verdict of a leaf or an aggregate node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The requirement holds.
    Met,
    /// The requirement does not hold.
    Unmet,
    /// Some, but not all, of an aggregate's requirements hold.
    Partial,
    /// No verdict is possible (no snapshot, or not a plain stat check).
    Unknown,
}

impl Status {
    /// Verdict for a boolean comparison.
    #[must_use]
    pub const fn from_bool(met: bool) -> Self {
        if met { Status::Met } else { Status::Unmet }
    }

    /// Logical inverse used by NOT: `Met <-> Unmet`, everything else `Unknown`.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Status::Met => Status::Unmet,
            Status::Unmet => Status::Met,
            Status::Partial | Status::Unknown => Status::Unknown,
        }
    }

    /// Check whether this verdict blocks an aggregate (`Unmet` or `Partial`).
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Status::Unmet | Status::Partial)
    }

    /// Lowercase name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Status::Met => "met",
            Status::Unmet => "unmet",
            Status::Partial => "partial",
            Status::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// OUTPUTS
// =============================================================================

/// One blocking requirement reported by the unmet collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetEntry {
    /// Stat code of the failing requirement.
    pub stat: i64,
    /// Resolved stat name (or generic fallback label).
    pub stat_name: String,
    /// Displayed threshold (after inclusive-bound rewrite).
    pub required: i64,
    /// Current value from the snapshot (`0` when absent).
    pub current: i64,
    /// Displayed comparison symbol.
    pub operator: String,
}

/// Result of a full requirement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the actor may perform the action.
    pub can_perform: bool,
    /// Requirements currently blocking the action.
    pub unmet: Vec<UnmetEntry>,
}

impl CheckResult {
    /// A passing result with nothing unmet.
    #[must_use]
    pub fn pass() -> Self {
        Self {
            can_perform: true,
            unmet: Vec::new(),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised at the input boundaries of reqtree.
///
/// The engine itself (normalize, build, consolidate, evaluate, collect,
/// format) never fails. Only parsing, validation and loading do.
#[derive(Debug, Error)]
pub enum ReqTreeError {
    /// A line of the text interchange format could not be parsed.
    #[error("Invalid criteria line {line}: {reason}")]
    InvalidLine {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The criteria array exceeds the accepted length.
    #[error("Criteria count {count} exceeds maximum {max}")]
    TooManyCriteria {
        /// Number of criteria supplied.
        count: usize,
        /// Maximum accepted.
        max: usize,
    },

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================

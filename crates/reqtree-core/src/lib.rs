//! # reqtree-core
//!
//! The requirement-criteria engine for reqtree - THE LOGIC.
//!
//! Game rule data encodes "what an actor needs" as flat arrays of
//! `(stat, operator, value)` triples in postfix order. This crate turns such
//! an array into:
//! - display-ready criteria (`transformer`)
//! - a consolidated boolean requirement tree (`builder`, `consolidator`)
//! - met/unmet verdicts against an attribute snapshot (`evaluator`)
//! - the list of requirements currently blocking success (`collector`)
//! - a parenthesized text rendering (`formatter`)
//!
//! ## Architectural Constraints
//!
//! The engine:
//! - Is a pure function of its inputs per call; no global state
//! - Never fails: malformed input degrades to a best-effort tree
//! - Delegates code-to-name lookup to a caller-supplied [`NameResolver`]
//! - Has NO async, NO network, NO file I/O (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod builder;
pub mod cache;
pub mod collector;
pub mod consolidator;
pub mod engine;
pub mod evaluator;
pub mod formats;
pub mod formatter;
pub mod names;
pub mod primitives;
pub mod transformer;
pub mod tree;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CheckResult, RawCriterion, ReqTreeError, StatSnapshot, Status, UnmetEntry};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use builder::{ExpressionBuilder, takes_fast_path};
pub use cache::TreeCache;
pub use collector::UnmetRequirementCollector;
pub use consolidator::consolidate;
pub use engine::{Formattable, build_tree, check_requirements, evaluate, format, normalize};
pub use formatter::TextFormatter;
pub use transformer::{
    Comparison, CriterionKind, CriterionTransformer, FunctionOp, LogicalOp, NormalizedCriterion,
};
pub use tree::{NodeKind, TreeNode, TreeRow};

// =============================================================================
// RE-EXPORTS: Names (collaborator interface)
// =============================================================================

pub use names::{EnumKind, NameResolver, NameTable, NoNames};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{criteria_to_text, parse_criteria_text, validate_criteria};

//! # Innate Primitives
//!
//! Hardcoded code tables and limits for the reqtree engine.
//!
//! Criteria arrive as bare integer triples `(stat, operator, value)`.
//! The meaning of every operator code lives here and is compiled into the
//! binary; nothing in the engine consults runtime data to classify a code.
//!
//! ## Code Families
//!
//! 1. **Logical sentinels**: `stat == 0 && value == 0` with an operator code
//!    from [`OP_OR`], [`OP_AND`], [`OP_NOT`].
//! 2. **State gates**: non-comparative flags with fixed text.
//! 3. **Function checks**: the value carries a reference id, not a threshold.
//! 4. **Comparisons**: everything else.

// =============================================================================
// LOGICAL SENTINELS
// =============================================================================

/// Logical OR of the two preceding operands.
pub const OP_OR: i64 = 3;

/// Logical AND of the two preceding operands. Also used as a plain
/// separator between consecutive requirements.
pub const OP_AND: i64 = 4;

/// Logical NOT of the preceding operand.
pub const OP_NOT: i64 = 42;

// =============================================================================
// COMPARISONS
// =============================================================================

/// `stat == value`
pub const OP_EQUAL: i64 = 0;

/// `stat < value`, displayed as `≤ value - 1`.
pub const OP_LESS_THAN: i64 = 1;

/// `stat > value`, displayed as `≥ value + 1`.
pub const OP_GREATER_THAN: i64 = 2;

/// All bits of `value` set in `stat`.
pub const OP_BIT_SET: i64 = 22;

/// `stat != value`
pub const OP_NOT_EQUAL: i64 = 24;

/// No bit of `value` set in `stat`.
pub const OP_BIT_CLEAR: i64 = 107;

// =============================================================================
// FUNCTION CHECKS
// =============================================================================

/// Item with reference id `value` must be worn.
pub const OP_HAS_WORN_ITEM: i64 = 45;

/// Effect with reference id `value` must be running.
pub const OP_HAS_RUNNING_NANO: i64 = 69;

/// Effect with reference id `value` must NOT be running.
pub const OP_HAS_NOT_RUNNING_NANO: i64 = 70;

// =============================================================================
// STATE GATES
// =============================================================================

/// Target must be a non-player character.
pub const OP_IS_NPC: i64 = 26;

/// Actor must be flying.
pub const OP_IS_FLYING: i64 = 88;

/// Actor must not be inside a vehicle.
pub const OP_NOT_IN_VEHICLE: i64 = 91;

/// Actor must not be in combat.
pub const OP_NOT_FIGHTING: i64 = 100;

/// State-gate codes paired with their fixed description.
pub const STATE_GATES: [(i64, &str); 4] = [
    (OP_IS_NPC, "Target must be an NPC"),
    (OP_IS_FLYING, "Must be flying"),
    (OP_NOT_IN_VEHICLE, "Must not be in a vehicle"),
    (OP_NOT_FIGHTING, "Must not be in combat"),
];

// =============================================================================
// SPECIAL STATS
// =============================================================================

/// Breed stat. Values resolve through `EnumKind::Breed`.
pub const STAT_BREED: i64 = 4;

/// Character level.
pub const STAT_LEVEL: i64 = 54;

/// Gender stat. Values resolve through `EnumKind::Gender`.
pub const STAT_GENDER: i64 = 59;

/// Profession stat. Values resolve through `EnumKind::Profession`.
pub const STAT_PROFESSION: i64 = 60;

// =============================================================================
// LIMITS
// =============================================================================

/// Maximum number of criteria accepted by [`crate::formats::validate_criteria`].
///
/// The engine itself accepts any length; this limit guards input boundaries.
pub const MAX_CRITERIA_LENGTH: usize = 512;

/// Default number of trees retained by a [`crate::TreeCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Look up the fixed text of a state-gate operator.
#[must_use]
pub fn state_gate_text(operator: i64) -> Option<&'static str> {
    STATE_GATES
        .iter()
        .find(|(code, _)| *code == operator)
        .map(|(_, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_codes_are_distinct() {
        assert_ne!(OP_OR, OP_AND);
        assert_ne!(OP_AND, OP_NOT);
        assert_ne!(OP_OR, OP_NOT);
    }

    #[test]
    fn state_gate_lookup() {
        assert_eq!(state_gate_text(OP_IS_FLYING), Some("Must be flying"));
        assert_eq!(state_gate_text(OP_EQUAL), None);
    }
}

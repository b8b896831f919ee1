//! # Name Resolution
//!
//! The engine never owns the tables that map numeric codes to human names.
//! Callers supply a [`NameResolver`]; every lookup may miss. Stats and flags
//! then fall back to `"Stat <code>"` / `"Flag <bit>"`, and unnamed enum
//! values keep the plain comparison text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Enumerated stat domains whose values have names of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnumKind {
    Profession,
    Breed,
    Gender,
}

/// Lookup collaborator mapping numeric codes to display names.
///
/// Implementations must be pure: the same code always yields the same answer
/// for the lifetime of a call.
pub trait NameResolver {
    /// Name of a stat code.
    fn stat_name(&self, stat: i64) -> Option<String>;

    /// Name of a flag bit (or mask) within a flag-valued stat.
    fn flag_name(&self, stat: i64, bit: i64) -> Option<String>;

    /// Name of an enumerated value.
    fn enum_name(&self, kind: EnumKind, code: i64) -> Option<String>;
}

/// Resolver that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNames;

impl NameResolver for NoNames {
    fn stat_name(&self, _stat: i64) -> Option<String> {
        None
    }

    fn flag_name(&self, _stat: i64, _bit: i64) -> Option<String> {
        None
    }

    fn enum_name(&self, _kind: EnumKind, _code: i64) -> Option<String> {
        None
    }
}

/// In-memory name tables.
///
/// Uses `BTreeMap` so that dumps and iteration are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    stats: BTreeMap<i64, String>,
    flags: BTreeMap<(i64, i64), String>,
    enums: BTreeMap<(EnumKind, i64), String>,
}

impl NameTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stat name.
    #[must_use]
    pub fn with_stat(mut self, stat: i64, name: impl Into<String>) -> Self {
        self.insert_stat(stat, name);
        self
    }

    /// Add a flag name.
    #[must_use]
    pub fn with_flag(mut self, stat: i64, bit: i64, name: impl Into<String>) -> Self {
        self.insert_flag(stat, bit, name);
        self
    }

    /// Add an enumerated value name.
    #[must_use]
    pub fn with_enum(mut self, kind: EnumKind, code: i64, name: impl Into<String>) -> Self {
        self.insert_enum(kind, code, name);
        self
    }

    pub fn insert_stat(&mut self, stat: i64, name: impl Into<String>) {
        self.stats.insert(stat, name.into());
    }

    pub fn insert_flag(&mut self, stat: i64, bit: i64, name: impl Into<String>) {
        self.flags.insert((stat, bit), name.into());
    }

    pub fn insert_enum(&mut self, kind: EnumKind, code: i64, name: impl Into<String>) {
        self.enums.insert((kind, code), name.into());
    }

    /// Total number of names across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len() + self.flags.len() + self.enums.len()
    }

    /// Check if no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NameResolver for NameTable {
    fn stat_name(&self, stat: i64) -> Option<String> {
        self.stats.get(&stat).cloned()
    }

    fn flag_name(&self, stat: i64, bit: i64) -> Option<String> {
        self.flags.get(&(stat, bit)).cloned()
    }

    fn enum_name(&self, kind: EnumKind, code: i64) -> Option<String> {
        self.enums.get(&(kind, code)).cloned()
    }
}

impl<R: NameResolver + ?Sized> NameResolver for &R {
    fn stat_name(&self, stat: i64) -> Option<String> {
        (**self).stat_name(stat)
    }

    fn flag_name(&self, stat: i64, bit: i64) -> Option<String> {
        (**self).flag_name(stat, bit)
    }

    fn enum_name(&self, kind: EnumKind, code: i64) -> Option<String> {
        (**self).enum_name(kind, code)
    }
}

// =============================================================================
// FALLBACK LABELS
// =============================================================================

/// Stat name, or `"Stat <code>"`.
#[must_use]
pub fn label_stat<R: NameResolver + ?Sized>(resolver: &R, stat: i64) -> String {
    resolver
        .stat_name(stat)
        .unwrap_or_else(|| format!("Stat {}", stat))
}

/// Flag name, or `"Flag <bit>"`.
#[must_use]
pub fn label_flag<R: NameResolver + ?Sized>(resolver: &R, stat: i64, bit: i64) -> String {
    resolver
        .flag_name(stat, bit)
        .unwrap_or_else(|| format!("Flag {}", bit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_names_falls_back() {
        assert_eq!(label_stat(&NoNames, 16), "Stat 16");
        assert_eq!(label_flag(&NoNames, 30, 8), "Flag 8");
        assert_eq!(NoNames.enum_name(EnumKind::Profession, 5), None);
    }

    #[test]
    fn name_table_resolves() {
        let table = NameTable::new()
            .with_stat(16, "Strength")
            .with_flag(30, 8, "Nodrop")
            .with_enum(EnumKind::Breed, 1, "Solitus");

        assert_eq!(label_stat(&table, 16), "Strength");
        assert_eq!(label_flag(&table, 30, 8), "Nodrop");
        assert_eq!(table.enum_name(EnumKind::Breed, 1).as_deref(), Some("Solitus"));
        assert_eq!(table.enum_name(EnumKind::Gender, 1), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn flag_names_are_scoped_by_stat() {
        let table = NameTable::new().with_flag(30, 8, "Nodrop");
        assert_eq!(table.flag_name(31, 8), None);
    }
}

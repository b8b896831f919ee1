//! # Name Table Configuration
//!
//! Loads the code-to-name lookup the engine consults for display text.
//!
//! ```toml
//! [stats]
//! 16 = "Strength"
//! 60 = "Profession"
//!
//! [flags.30]
//! 8 = "Shadowlands"
//!
//! [professions]
//! 5 = "Agent"
//! ```
//!
//! Keys are decimal codes. The path comes from `--names`, falling back to
//! the `REQTREE_NAMES` environment variable; with neither, every label
//! uses the generic `"<Kind> <code>"` form.

use reqtree_core::{EnumKind, NameTable, ReqTreeError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable naming a default name table.
pub const NAMES_ENV: &str = "REQTREE_NAMES";

/// Maximum name table size (1 MB).
const MAX_NAMES_FILE_SIZE: u64 = 1024 * 1024;

/// On-disk shape of a name table.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamesConfig {
    #[serde(default)]
    pub stats: BTreeMap<String, String>,
    /// Flag names per stat, keyed by bit mask.
    #[serde(default)]
    pub flags: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub professions: BTreeMap<String, String>,
    #[serde(default)]
    pub breeds: BTreeMap<String, String>,
    #[serde(default)]
    pub genders: BTreeMap<String, String>,
}

impl NamesConfig {
    /// Parse TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ReqTreeError> {
        toml::from_str(text).map_err(|e| ReqTreeError::ConfigError(e.to_string()))
    }

    /// Convert into a resolver, rejecting non-numeric keys.
    pub fn into_name_table(self) -> Result<NameTable, ReqTreeError> {
        let mut table = NameTable::new();

        for (key, name) in self.stats {
            table.insert_stat(parse_code("stats", &key)?, name);
        }
        for (stat_key, bits) in self.flags {
            let stat = parse_code("flags", &stat_key)?;
            for (bit_key, name) in bits {
                let section = format!("flags.{}", stat_key);
                table.insert_flag(stat, parse_code(&section, &bit_key)?, name);
            }
        }
        for (kind, section, entries) in [
            (EnumKind::Profession, "professions", self.professions),
            (EnumKind::Breed, "breeds", self.breeds),
            (EnumKind::Gender, "genders", self.genders),
        ] {
            for (key, name) in entries {
                table.insert_enum(kind, parse_code(section, &key)?, name);
            }
        }

        Ok(table)
    }
}

fn parse_code(section: &str, key: &str) -> Result<i64, ReqTreeError> {
    key.trim().parse().map_err(|_| {
        ReqTreeError::ConfigError(format!("[{}] key '{}' is not a decimal code", section, key))
    })
}

/// Pick the name table path: explicit flag first, then the environment.
pub fn resolve_names_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(NAMES_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Load a name table from a TOML file.
pub fn load_names(path: &Path) -> Result<NameTable, ReqTreeError> {
    let path = crate::input::validate_file_path(path)?;
    crate::input::validate_file_size(&path, MAX_NAMES_FILE_SIZE)?;

    let text = std::fs::read_to_string(&path)
        .map_err(|e| ReqTreeError::IoError(format!("Read names '{}': {}", path.display(), e)))?;
    let table = NamesConfig::from_toml(&text)?.into_name_table()?;

    tracing::debug!(path = %path.display(), entries = table.len(), "loaded name table");
    Ok(table)
}

/// Load the configured name table, or an empty one when none is configured.
pub fn load_configured_names(explicit: Option<&Path>) -> Result<NameTable, ReqTreeError> {
    match resolve_names_path(explicit) {
        Some(path) => load_names(&path),
        None => Ok(NameTable::new()),
    }
}

// =============================================================================
// TESTS
// =============================================================================

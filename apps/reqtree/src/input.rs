//! # Input Loading
//!
//! Reads criteria arrays and stat snapshots from disk.
//!
//! - Criteria JSON: `[{"id": 0, "stat": 16, "op": 2, "value": 400}, ...]`
//!   (`id` optional)
//! - Criteria text: one `stat:operator:value` per line
//! - Stats JSON: `{"16": 450, "17": 120}`

use clap::ValueEnum;
use reqtree_core::{RawCriterion, ReqTreeError, StatSnapshot, parse_criteria_text, validate_criteria};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for criteria and stats (1 MB).
///
/// Far above what `MAX_CRITERIA_LENGTH` criteria need; rejects accidental
/// large files before reading them.
const MAX_INPUT_FILE_SIZE: u64 = 1024 * 1024;

/// Criteria file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    #[default]
    Json,
    Text,
}

/// Validate file size before reading.
pub fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ReqTreeError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ReqTreeError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ReqTreeError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize `path` and ensure it names a regular file.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, ReqTreeError> {
    let canonical = path.canonicalize().map_err(|e| {
        ReqTreeError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ReqTreeError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

fn read_input(path: &Path) -> Result<Vec<u8>, ReqTreeError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_INPUT_FILE_SIZE)?;
    std::fs::read(&validated)
        .map_err(|e| ReqTreeError::IoError(format!("Read '{}': {}", path.display(), e)))
}

/// Parse criteria from bytes in the given format and enforce the length limit.
pub fn parse_criteria(contents: &[u8], format: InputFormat) -> Result<Vec<RawCriterion>, ReqTreeError> {
    let criteria = match format {
        InputFormat::Json => serde_json::from_slice::<Vec<RawCriterion>>(contents)
            .map_err(|e| ReqTreeError::SerializationError(format!("Criteria JSON: {}", e)))?,
        InputFormat::Text => {
            let text = std::str::from_utf8(contents)
                .map_err(|e| ReqTreeError::SerializationError(format!("Criteria text: {}", e)))?;
            parse_criteria_text(text)?
        }
    };

    validate_criteria(&criteria)?;
    Ok(criteria)
}

/// Load a criteria file.
pub fn load_criteria(path: &Path, format: InputFormat) -> Result<Vec<RawCriterion>, ReqTreeError> {
    let contents = read_input(path)?;
    let criteria = parse_criteria(&contents, format)?;
    tracing::debug!(path = %path.display(), count = criteria.len(), "loaded criteria");
    Ok(criteria)
}

/// Parse a stat snapshot. Keys are decimal stat codes.
pub fn parse_stats(contents: &[u8]) -> Result<StatSnapshot, ReqTreeError> {
    serde_json::from_slice(contents)
        .map_err(|e| ReqTreeError::SerializationError(format!("Stats JSON: {}", e)))
}

/// Load a stat snapshot file.
pub fn load_stats(path: &Path) -> Result<StatSnapshot, ReqTreeError> {
    let stats = parse_stats(&read_input(path)?)?;
    tracing::debug!(path = %path.display(), stats = stats.len(), "loaded stat snapshot");
    Ok(stats)
}

// =============================================================================
// TESTS
// =============================================================================

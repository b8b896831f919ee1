//! # Interchange Formats
//!
//! Boundary conversions for criteria arrays. The engine never fails; these
//! functions are where malformed input is rejected.
//!
//! File I/O operations are in the app layer.

pub mod text;

pub use text::{criteria_to_text, parse_criteria_text};

use crate::primitives::MAX_CRITERIA_LENGTH;
use crate::types::{RawCriterion, ReqTreeError};

/// Reject criteria arrays longer than [`MAX_CRITERIA_LENGTH`].
///
/// Individual criteria are never rejected: unknown codes are classified by
/// the transformer and degrade to generic descriptions.
pub fn validate_criteria(criteria: &[RawCriterion]) -> Result<(), ReqTreeError> {
    if criteria.len() > MAX_CRITERIA_LENGTH {
        return Err(ReqTreeError::TooManyCriteria {
            count: criteria.len(),
            max: MAX_CRITERIA_LENGTH,
        });
    }
    Ok(())
}

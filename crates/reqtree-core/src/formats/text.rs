//! # Text Criteria Format
//!
//! One criterion per line as `stat:operator:value`. Blank lines and lines
//! starting with `#` are ignored. Ids are assigned by position among the
//! criteria lines, starting at 0.
//!
//! ```text
//! # level 100 or above
//! 54:2:99
//! ```

use crate::types::{RawCriterion, ReqTreeError};

/// Parse the line format into a criteria array.
pub fn parse_criteria_text(input: &str) -> Result<Vec<RawCriterion>, ReqTreeError> {
    let mut criteria = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let id = u32::try_from(criteria.len()).map_err(|_| ReqTreeError::InvalidLine {
            line: index + 1,
            reason: "too many criteria".to_string(),
        })?;
        criteria.push(parse_line(id, line, index + 1)?);
    }

    Ok(criteria)
}

fn parse_line(id: u32, line: &str, line_no: usize) -> Result<RawCriterion, ReqTreeError> {
    let fields: Vec<&str> = line.split(':').map(str::trim).collect();
    let [stat, operator, value] = fields.as_slice() else {
        return Err(ReqTreeError::InvalidLine {
            line: line_no,
            reason: format!("expected stat:operator:value, found {} field(s)", fields.len()),
        });
    };

    let number = |name: &str, field: &str| {
        field.parse::<i64>().map_err(|e| ReqTreeError::InvalidLine {
            line: line_no,
            reason: format!("{} '{}': {}", name, field, e),
        })
    };

    Ok(RawCriterion::new(
        id,
        number("stat", stat)?,
        number("operator", operator)?,
        number("value", value)?,
    ))
}

/// Render a criteria array in the line format. Ids are not written.
#[must_use]
pub fn criteria_to_text(criteria: &[RawCriterion]) -> String {
    let mut out = String::new();
    for c in criteria {
        out.push_str(&format!("{}:{}:{}\n", c.stat, c.operator, c.value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines_and_skips_comments() {
        let input = "# a comment\n\n16:2:400\n  0:3:0  \n";
        let criteria = parse_criteria_text(input).expect("parse");
        assert_eq!(
            criteria,
            vec![RawCriterion::new(0, 16, 2, 400), RawCriterion::new(1, 0, 3, 0)]
        );
    }

    #[test]
    fn negative_values_are_accepted() {
        let criteria = parse_criteria_text("16:0:-5").expect("parse");
        assert_eq!(criteria[0].value, -5);
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let err = parse_criteria_text("16:2:400\n\n16:2").expect_err("invalid");
        assert!(matches!(err, ReqTreeError::InvalidLine { line: 3, .. }));
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let err = parse_criteria_text("16:gt:400").expect_err("invalid");
        assert!(matches!(
            &err,
            ReqTreeError::InvalidLine { line: 1, reason } if reason.starts_with("operator 'gt'")
        ));
    }

    #[test]
    fn text_survives_a_round_trip() {
        let criteria = vec![
            RawCriterion::new(0, 60, 0, 5),
            RawCriterion::new(1, 60, 0, 7),
            RawCriterion::sentinel(2, 3),
        ];
        let text = criteria_to_text(&criteria);
        assert_eq!(text, "60:0:5\n60:0:7\n0:3:0\n");
        assert_eq!(parse_criteria_text(&text).expect("parse"), criteria);
    }
}

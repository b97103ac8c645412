//! Field validation rules for colleges, programs, and students.
//!
//! All messages are user-facing and match the wording the web client shows
//! as field-level errors.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Inclusive year-level bounds.
pub const MIN_YEAR_LEVEL: i32 = 1;
pub const MAX_YEAR_LEVEL: i32 = 5;

fn student_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{4}$").expect("student id pattern is valid"))
}

/// Validate the `NNNN-NNNN` student-ID format.
pub fn validate_student_id(id: &str) -> Result<(), CoreError> {
    if student_id_pattern().is_match(id) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Student ID must be in format NNNN-NNNN.".into(),
        ))
    }
}

/// Validate the 1..=5 year-level range.
pub fn validate_year_level(year_level: i32) -> Result<(), CoreError> {
    if (MIN_YEAR_LEVEL..=MAX_YEAR_LEVEL).contains(&year_level) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Year level must be between 1 and 5.".into(),
        ))
    }
}

/// Student gender. Serialized capitalized to match the stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Parse a stored or submitted gender value.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim() {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(CoreError::Validation(
                "Gender must be Male, Female, or Other.".into(),
            )),
        }
    }
}

/// Require a non-empty trimmed string, naming the field in the error.
pub fn require_trimmed(value: &str, field: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::Validation(format!("{field} cannot be empty.")))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- student id ----------------------------------------------------------

    #[test]
    fn student_id_accepts_canonical_format() {
        assert!(validate_student_id("2024-0001").is_ok());
    }

    #[test]
    fn student_id_rejects_short_suffix() {
        assert!(validate_student_id("2024-1").is_err());
    }

    #[test]
    fn student_id_rejects_garbage() {
        assert!(validate_student_id("abcd-efgh").is_err());
        assert!(validate_student_id("20240001").is_err());
        assert!(validate_student_id(" 2024-0001").is_err());
        assert!(validate_student_id("").is_err());
    }

    // -- year level ----------------------------------------------------------

    #[test]
    fn year_level_bounds_are_inclusive() {
        assert!(validate_year_level(1).is_ok());
        assert!(validate_year_level(5).is_ok());
        assert!(validate_year_level(0).is_err());
        assert!(validate_year_level(6).is_err());
    }

    // -- gender --------------------------------------------------------------

    #[test]
    fn gender_parses_exact_values_only() {
        assert_eq!(Gender::parse("Male").unwrap(), Gender::Male);
        assert_eq!(Gender::parse(" Other ").unwrap(), Gender::Other);
        assert!(Gender::parse("male").is_err());
        assert!(Gender::parse("").is_err());
    }

    // -- require_trimmed -----------------------------------------------------

    #[test]
    fn require_trimmed_strips_whitespace() {
        assert_eq!(require_trimmed("  BSCS ", "Code").unwrap(), "BSCS");
    }

    #[test]
    fn require_trimmed_rejects_blank() {
        let err = require_trimmed("   ", "First name").unwrap_err();
        assert_eq!(err.to_string(), "First name cannot be empty.");
    }
}

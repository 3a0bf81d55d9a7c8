//! Structural validation for PDA and PK identifiers.
//!
//! # Invariants
//! - Accepted identifiers are non-empty, at most `MAX_IDENTIFIER_LEN` chars,
//!   and fit in a single URL path segment.
//! - Dot segments (`.`, `..`, ...) are rejected; URL normalization would
//!   strip them before they reach the route.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Upper bound for externally supplied identifiers.
pub const MAX_IDENTIFIER_LEN: usize = 128;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("valid identifier regex"));

/// Structural validation failure for an identifier field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or blank.
    Empty { field: &'static str },
    /// Field exceeds `MAX_IDENTIFIER_LEN`.
    TooLong { field: &'static str, len: usize },
    /// Field contains characters outside `[A-Za-z0-9_.-]`.
    InvalidCharacters { field: &'static str, value: String },
    /// Field consists only of dots and cannot be addressed in a URL path.
    DotSegment { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, len } => write!(
                f,
                "{field} is {len} characters long; maximum is {MAX_IDENTIFIER_LEN}"
            ),
            Self::InvalidCharacters { field, value } => write!(
                f,
                "{field} `{value}` contains invalid characters; expected [A-Za-z0-9_.-]"
            ),
            Self::DotSegment { field, value } => write!(
                f,
                "{field} `{value}` consists only of dots and is not addressable"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Validates one identifier value for the named field.
pub fn validate_identifier(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let len = value.chars().count();
    if len > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong { field, len });
    }

    if !IDENTIFIER_RE.is_match(value) {
        return Err(ValidationError::InvalidCharacters {
            field,
            value: value.to_string(),
        });
    }

    if value.chars().all(|ch| ch == '.') {
        return Err(ValidationError::DotSegment {
            field,
            value: value.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_identifier, ValidationError, MAX_IDENTIFIER_LEN};

    #[test]
    fn accepts_names_and_base58_keys() {
        validate_identifier("pda", "camp1").expect("plain name should pass");
        validate_identifier("pk", "Dd8znVFe2PieDStP8tV99c7P3jhKeNnf8EfFkEXjWtan")
            .expect("base58 key should pass");
        validate_identifier("pda", "camp_1.v2-final").expect("punctuation should pass");
    }

    #[test]
    fn rejects_empty_value() {
        let err = validate_identifier("pda", "").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "pda" });
    }

    #[test]
    fn rejects_path_separators_and_whitespace() {
        for value in ["camp/1", "camp 1", " camp1", "camp1\n"] {
            let err = validate_identifier("pda", value).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidCharacters { .. }));
        }
    }

    #[test]
    fn rejects_dot_segments_but_keeps_inner_dots() {
        for value in [".", "..", "..."] {
            let err = validate_identifier("pda", value).unwrap_err();
            assert!(matches!(err, ValidationError::DotSegment { field: "pda", .. }));
        }
        validate_identifier("pda", ".camp").expect("leading dot with name should pass");
        validate_identifier("pda", "camp..1").expect("inner dots should pass");
    }

    #[test]
    fn rejects_overlong_value() {
        let value = "a".repeat(MAX_IDENTIFIER_LEN + 1);
        let err = validate_identifier("pk", &value).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "pk",
                len: MAX_IDENTIFIER_LEN + 1
            }
        );
        assert!(err.to_string().contains("maximum"));
    }
}

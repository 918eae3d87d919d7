//! Error types for lab-result translation and partial dates.

use thiserror::Error;

/// Errors that can occur while translating a dictated line or building a
/// [`PartialDate`](crate::PartialDate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// A structural separator is missing or a range does not split into two bounds.
    #[error("malformed input '{fragment}': {reason}")]
    MalformedInput {
        /// The text that could not be split.
        fragment: String,
        /// What was expected.
        reason: &'static str,
    },

    /// A token that must be numeric is not.
    #[error("not a number: '{token}'")]
    NumericParseFailure {
        /// The offending token.
        token: String,
    },

    /// Year, month or day outside the accepted domain.
    #[error("invalid date components: {0}")]
    InvalidDateComponents(String),

    /// Two dates whose precisions do not allow an ordering.
    #[error("dates {left} and {right} cannot be ordered")]
    IncomparableDates {
        /// Left operand, rendered.
        left: String,
        /// Right operand, rendered.
        right: String,
    },
}

impl TranslateError {
    pub(crate) fn malformed(fragment: &str, reason: &'static str) -> Self {
        Self::MalformedInput {
            fragment: fragment.to_string(),
            reason,
        }
    }

    pub(crate) fn not_a_number(token: &str) -> Self {
        Self::NumericParseFailure {
            token: token.to_string(),
        }
    }
}

/// Result type for translation and date operations.
pub type TranslateResult<T> = std::result::Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_malformed() {
        let err = TranslateError::malformed("tsh", "missing content after analyte name");
        assert_eq!(
            err.to_string(),
            "malformed input 'tsh': missing content after analyte name"
        );
    }

    #[test]
    fn test_error_display_numeric() {
        let err = TranslateError::not_a_number("abc");
        assert_eq!(err.to_string(), "not a number: 'abc'");
    }

    #[test]
    fn test_error_display_incomparable() {
        let err = TranslateError::IncomparableDates {
            left: "2019".into(),
            right: "3/2019".into(),
        };
        assert_eq!(err.to_string(), "dates 2019 and 3/2019 cannot be ordered");
    }
}

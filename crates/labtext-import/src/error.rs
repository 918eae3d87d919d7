//! Error types for importing translated lab results.

use thiserror::Error;

/// Errors that can occur while importing a dictated line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    /// Translation or partial-date error from the labtext parser.
    #[error("translation error: {0}")]
    Translate(#[from] labtext::TranslateError),

    /// The date token is not a valid calendar date.
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    /// No analyte in the directory matches the typed name.
    #[error("unknown analyte: {0}")]
    UnknownAnalyte(String),

    /// Neither a value nor a rating code was given.
    #[error("{analyte}: either value or rate must be set")]
    MissingMeasurement {
        /// Analyte token as typed.
        analyte: String,
    },

    /// Values are concentrations and must be non-negative numbers.
    #[error("{analyte}: value {value} must be a non-negative number")]
    InvalidValue {
        /// Analyte token as typed.
        analyte: String,
        /// The rejected value.
        value: f64,
    },

    /// The rating code is not one of the known codes.
    #[error("{analyte}: unknown rating code '{code}'")]
    UnknownRating {
        /// Analyte token as typed.
        analyte: String,
        /// The rejected code.
        code: String,
    },

    /// The unit exceeds the storable length.
    #[error("{analyte}: unit '{unit}' is longer than {max} characters")]
    UnitTooLong {
        /// Analyte token as typed.
        analyte: String,
        /// The rejected unit.
        unit: String,
        /// Maximum length.
        max: usize,
    },
}

/// Result type for import operations.
pub type ImportResult<T> = std::result::Result<T, ImportError>;

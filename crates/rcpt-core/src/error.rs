//! Error types for the rcpt-core library.
//!
//! Parsing receipt text never fails; these errors only come from the
//! surrounding configuration layer.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// Configuration is structurally valid JSON but semantically wrong.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to extraction configuration values.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A scan window of zero lines would disable an extractor entirely.
    #[error("scan window `{0}` must be at least one line")]
    EmptyWindow(&'static str),

    /// A plausibility bound is negative or zero where it must be positive.
    #[error("bound `{field}` must be positive, got {value}")]
    NonPositiveBound { field: &'static str, value: String },

    /// Lower bound is not below the upper bound.
    #[error("bounds `{lower}` ({lower_value}) and `{upper}` ({upper_value}) are inverted")]
    InvertedBounds {
        lower: &'static str,
        lower_value: String,
        upper: &'static str,
        upper_value: String,
    },
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;

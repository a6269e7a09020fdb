//! Error types for the rcpt-core library.
//!
//! Field extraction itself never fails; these errors cover the edges around
//! it (configuration, input reading and input limits).

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// Receipt extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised before extraction runs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// Input text exceeds the configured size limit.
    #[error("input is {size} bytes, limit is {limit} bytes")]
    InputTooLarge { size: usize, limit: usize },

    /// A keyword table entry is unusable.
    #[error("invalid keyword table {table}: {reason}")]
    InvalidKeywords { table: String, reason: String },
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;

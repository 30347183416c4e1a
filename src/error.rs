//! Custom error types for orcid-works.
//!
//! All library functions return `Result<T, OrcidError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for orcid-works operations.
#[derive(Debug, Error)]
pub enum OrcidError {
    /// Network/HTTP request error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// ORCID endpoint returned a non-success status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message
        message: String,
    },

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Malformed ORCID iD
    #[error("Invalid ORCID iD '{0}'")]
    InvalidOrcid(String),
}

/// Result type alias using `OrcidError`
pub type Result<T> = std::result::Result<T, OrcidError>;

/// A work's last external identifier could not be read.
///
/// Raised by [`crate::normalize::extract_access_url`]; the normalizer logs it and
/// records no access URL instead of aborting the run.
#[derive(Debug, Error)]
#[error("malformed external identifier: {0}")]
pub struct IdentifierError(pub String);

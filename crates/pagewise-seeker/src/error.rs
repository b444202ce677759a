//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when compiling a query.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// A token could not be split into a field and a value.
    #[error("malformed query term '{0}': expected field:value")]
    MalformedQueryTerm(String),

    /// A wildcard value did not produce a valid pattern.
    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;

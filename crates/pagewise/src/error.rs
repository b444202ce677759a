//! Error types for collection and resource operations.

use pagewise_seeker::SeekerError;
use thiserror::Error;

use crate::transport::TransportError;

/// Errors that can occur while fetching, searching or saving resources.
#[derive(Debug, Error)]
pub enum Error {
    /// A single-record fetch yielded no record.
    #[error("{resource} not found: {detail}")]
    NotFound { resource: String, detail: String },

    /// A search query token could not be split into field and value.
    #[error(transparent)]
    MalformedQueryTerm(#[from] SeekerError),

    /// The remote side rejected a create or update.
    #[error("{resource} failed validation: {}", messages.join(", "))]
    ValidationFailure {
        resource: String,
        messages: Vec<String>,
    },

    /// Opaque failure from the transport collaborator.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body did not have the expected shape.
    #[error("invalid response from '{operation}': {reason}")]
    InvalidResponse { operation: String, reason: String },

    /// The collection binding does not declare the requested operation.
    #[error("{resource} does not support {operation}")]
    UnsupportedOperation {
        resource: &'static str,
        operation: &'static str,
    },

    /// The operation needs a persisted resource.
    #[error("{0} has no identity")]
    MissingIdentity(&'static str),

    /// A page link could not be used to address a request.
    #[error("invalid page link: {0}")]
    InvalidLink(String),

    /// Configuration could not be loaded.
    #[error("invalid configuration for {key}: {reason}")]
    Config { key: String, reason: String },
}

impl Error {
    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Returns `true` for [`Error::ValidationFailure`].
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Error::ValidationFailure { .. })
    }

    pub(crate) fn invalid_response(operation: &str, reason: impl Into<String>) -> Self {
        Error::InvalidResponse {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NotFound { resource, detail } => Error::NotFound { resource, detail },
            TransportError::Unprocessable { resource, messages } => {
                Error::ValidationFailure { resource, messages }
            }
            TransportError::MalformedQuery(term) => {
                Error::MalformedQueryTerm(SeekerError::MalformedQueryTerm(term))
            }
            TransportError::Failure(reason) => Error::Transport(reason),
        }
    }
}

/// Result type for pagewise operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_map_to_kinds() {
        let err: Error = TransportError::not_found("section", "id=4").into();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "section not found: id=4");

        let err: Error = TransportError::unprocessable("section", vec!["name is required".into()]).into();
        assert!(err.is_validation_failure());
        assert!(err.to_string().contains("name is required"));

        let err: Error = TransportError::MalformedQuery("acme".into()).into();
        assert!(matches!(
            err,
            Error::MalformedQueryTerm(SeekerError::MalformedQueryTerm(ref t)) if t == "acme"
        ));

        let err: Error = TransportError::Failure("connection reset".into()).into();
        assert!(matches!(err, Error::Transport(ref r) if r == "connection reset"));
    }

    #[test]
    fn seeker_errors_convert() {
        let err: Error = pagewise_seeker::compile("bogus").unwrap_err().into();
        assert!(matches!(err, Error::MalformedQueryTerm(_)));
        assert!(err.to_string().contains("bogus"));
    }
}

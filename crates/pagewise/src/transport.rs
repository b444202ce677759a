//! Transport seam for remote operations.
//!
//! The collection layer never speaks HTTP. It names an operation (for example
//! `get_memberships`) and hands over a parameter mapping; the [`Transport`]
//! implementation performs the call and returns the response body.
//!
//! # Example
//!
//! ```rust
//! use pagewise::{Attributes, Transport, TransportError};
//! use serde_json::json;
//!
//! struct Echo;
//!
//! impl Transport for Echo {
//!     fn request(&self, operation: &str, params: &Attributes) -> Result<Attributes, TransportError> {
//!         let mut body = Attributes::new();
//!         body.insert("operation", json!(operation));
//!         body.insert("params", json!(params));
//!         Ok(body)
//!     }
//! }
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::attributes::Attributes;

/// Failures reported by a transport.
///
/// Collections convert these into [`crate::Error`] kinds without inspecting
/// them further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The addressed record does not exist.
    #[error("{resource} not found: {detail}")]
    NotFound { resource: String, detail: String },

    /// The remote side rejected the submitted attributes.
    #[error("{resource} rejected: {}", messages.join(", "))]
    Unprocessable {
        resource: String,
        messages: Vec<String>,
    },

    /// A search query token was not of the form `field:value`.
    #[error("malformed query term '{0}'")]
    MalformedQuery(String),

    /// Any other failure, passed through unchanged.
    #[error("{0}")]
    Failure(String),
}

impl TransportError {
    /// Create a not-found error.
    pub fn not_found(resource: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            detail: detail.into(),
        }
    }

    /// Create a validation rejection.
    pub fn unprocessable(resource: impl Into<String>, messages: Vec<String>) -> Self {
        Self::Unprocessable {
            resource: resource.into(),
            messages,
        }
    }
}

/// Synchronous invocation of named remote operations.
///
/// Implementations block until the response is available. The collection
/// layer performs no retries, batching or prefetch on top of this call.
pub trait Transport: Send + Sync {
    /// Invokes `operation` with `params` and returns the response body.
    fn request(&self, operation: &str, params: &Attributes) -> Result<Attributes, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn request(&self, operation: &str, params: &Attributes) -> Result<Attributes, TransportError> {
        (**self).request(operation, params)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn request(&self, operation: &str, params: &Attributes) -> Result<Attributes, TransportError> {
        (**self).request(operation, params)
    }
}

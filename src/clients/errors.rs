//! HTTP-specific error types.
//!
//! - [`ApiAccessError`]: the API could not be reached, or answered with a
//!   failure status
//! - [`InvalidHttpRequestError`]: a request failed validation before sending
//! - [`HttpError`]: unified error type returned by [`HttpClient`](crate::clients::HttpClient)
//!
//! # Example
//!
//! ```rust
//! use restify::clients::ApiAccessError;
//!
//! let error = ApiAccessError::from_status(404, "Not Found", "https://api.example.com/items/9");
//! assert_eq!(error.status, Some(404));
//! assert_eq!(
//!     error.to_string(),
//!     "API request to https://api.example.com/items/9 failed with status 404 (Not Found)"
//! );
//! ```

use thiserror::Error;

/// The API rejected a request or could not be reached.
///
/// `status` is `None` when no HTTP response was received at all (connection
/// refused, DNS failure, timeout); `reason` then carries the transport's
/// message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("API request to {url} failed{}", self.detail())]
pub struct ApiAccessError {
    /// The HTTP status code, if a response was received.
    pub status: Option<u16>,
    /// The status description, or the transport error message.
    pub reason: String,
    /// The URL the request was sent to.
    pub url: String,
}

impl ApiAccessError {
    /// Creates an error for a response with a failure status.
    #[must_use]
    pub fn from_status(status: u16, reason: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            reason: reason.into(),
            url: url.into(),
        }
    }

    /// Creates an error for a request that never got a response.
    #[must_use]
    pub fn from_transport(reason: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            status: None,
            reason: reason.into(),
            url: url.into(),
        }
    }

    fn detail(&self) -> String {
        match self.status {
            Some(status) => format!(" with status {status} ({})", self.reason),
            None => format!(": {}", self.reason),
        }
    }
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A text body was provided without specifying its content type.
    #[error("Cannot set a body without also setting content_type.")]
    MissingContentType,

    /// A body was attached to a method that does not carry one.
    #[error("Cannot send a body with {method}.")]
    BodyNotAllowed {
        /// The HTTP method that was used.
        method: String,
    },
}

/// Unified error type for HTTP execution.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The request URL could not be parsed or signed.
    #[error("Invalid request URL '{url}'")]
    InvalidUrl {
        /// The URL that was rejected.
        url: String,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

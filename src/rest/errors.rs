//! Error types for resource set operations.
//!
//! # Error Handling
//!
//! - [`ResourceError::NotConfigured`]: the operation's URL template is unset
//! - [`ResourceError::InvalidUrl`]: an absolute URL does not belong to the base URL
//! - [`ResourceError::Query`]: a search query object could not be mapped
//! - [`ResourceError::ApiAccess`]: the API answered with a status above 300,
//!   or could not be reached
//! - [`ResourceError::Encode`] / [`ResourceError::Decode`]: body codec failures
//!
//! # Example
//!
//! ```rust,ignore
//! use restify::ResourceError;
//!
//! match items.get("42").await {
//!     Ok(item) => println!("Found: {item:?}"),
//!     Err(ResourceError::ApiAccess(e)) if e.status == Some(404) => {
//!         println!("No such item at {}", e.url);
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::{ApiAccessError, HttpError};
use crate::query::QueryError;
use thiserror::Error;

/// Error type for resource set operations.
///
/// # Example
///
/// ```rust
/// use restify::ResourceError;
///
/// let error = ResourceError::NotConfigured { template: "edit_url" };
/// assert!(error.to_string().contains("edit_url"));
///
/// let error = ResourceError::InvalidUrl {
///     url: "https://elsewhere.example.com/items/1".to_string(),
/// };
/// assert!(error.to_string().contains("elsewhere.example.com"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The URL template the operation needs is unset or blank.
    ///
    /// Raised before any request is sent.
    #[error("The {template} template is not configured for this resource set")]
    NotConfigured {
        /// The template's configuration name (e.g. `"list_url"`).
        template: &'static str,
    },

    /// An absolute URL does not start with the base URL, or names nothing
    /// below it.
    #[error("Invalid url '{url}': it must start with the base URL and point below it")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },

    /// A search query object could not be mapped to query parameters.
    ///
    /// A field of a disallowed type surfaces as
    /// [`QueryError::TypeNotAllowed`]. Raised before any request is sent.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The API answered with a status above 300 or could not be reached.
    #[error(transparent)]
    ApiAccess(#[from] ApiAccessError),

    /// The entity could not be encoded.
    #[error("Failed to encode request body: {message}")]
    Encode {
        /// The serializer's message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response body: {message}")]
    Decode {
        /// The deserializer's message.
        message: String,
    },

    /// The request could not be built or the client could not be created.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl ResourceError {
    /// Returns the HTTP status code for [`ResourceError::ApiAccess`] errors
    /// that received a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ApiAccess(e) => e.status,
            _ => None,
        }
    }

    /// Returns `true` if a query field had a disallowed type.
    #[must_use]
    pub const fn is_type_not_allowed(&self) -> bool {
        matches!(self, Self::Query(QueryError::TypeNotAllowed { .. }))
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};

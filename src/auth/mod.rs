//! Authentication types.
//!
//! - [`Credential`]: the OAuth 1.0a consumer pair plus an optional token pair
//! - [`oauth`]: request signing and the token handshake
//!
//! # Example
//!
//! ```rust
//! use restify::Credential;
//!
//! // Before the handshake only the consumer pair is known
//! let consumer = Credential::consumer("consumer-key", "consumer-secret").unwrap();
//! assert!(consumer.token().is_none());
//!
//! // Once an access token has been issued
//! let credential = consumer.with_token("access-token", "access-token-secret").unwrap();
//! assert!(credential.token().is_some());
//! ```

mod credential;
pub mod oauth;

pub use credential::Credential;

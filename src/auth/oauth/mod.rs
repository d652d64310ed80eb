//! OAuth 1.0a signing and token handshake.
//!
//! - [`OAuthSigner`]: HMAC-SHA1 request signing (RFC 5849)
//! - [`Authorizer`]: request-token, access-token, xAuth and first-party flows
//! - [`TokenPair`]: a token and secret issued by a token endpoint
//! - [`OAuthError`]: handshake failures
//!
//! Protected-resource requests made through a [`ResourceSet`](crate::ResourceSet)
//! are signed automatically when the configuration carries a
//! [`Credential`](crate::Credential); the handshake is only needed to obtain
//! that credential in the first place.

mod error;
mod handshake;
mod signature;

pub use error::OAuthError;
pub use handshake::{Authorizer, TokenPair};
pub use signature::{compute_signature, percent_encode, OAuthSigner, OAUTH_VERSION, SIGNATURE_METHOD};

//! OAuth-specific error types.
//!
//! # Example
//!
//! ```rust
//! use restify::auth::oauth::OAuthError;
//!
//! let error = OAuthError::InvalidTokenResponse {
//!     reason: "missing oauth_token_secret".to_string(),
//! };
//! assert!(error.to_string().contains("oauth_token_secret"));
//! ```

use crate::clients::{ApiAccessError, HttpError};
use crate::error::ConfigError;
use thiserror::Error;

/// Errors that can occur during the OAuth 1.0a handshake.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The token endpoint answered with a status other than 200, or could
    /// not be reached.
    #[error(transparent)]
    ApiAccess(#[from] ApiAccessError),

    /// The token endpoint answered 200 but the body did not hold a token pair.
    #[error("Invalid token response: {reason}")]
    InvalidTokenResponse {
        /// What was wrong with the body.
        reason: String,
    },

    /// A credential value was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The request could not be built or sent.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_access_is_transparent() {
        let error: OAuthError =
            ApiAccessError::from_status(401, "Unauthorized", "https://x/oauth/access_token").into();
        assert_eq!(
            error.to_string(),
            "API request to https://x/oauth/access_token failed with status 401 (Unauthorized)"
        );
    }

    #[test]
    fn test_config_error_converts() {
        let error: OAuthError = ConfigError::EmptyAccessToken.into();
        assert!(matches!(error, OAuthError::Config(ConfigError::EmptyAccessToken)));
    }

    #[test]
    fn test_oauth_error_implements_std_error() {
        let error: &dyn std::error::Error = &OAuthError::InvalidTokenResponse {
            reason: "empty body".to_string(),
        };
        let _ = error;
    }
}

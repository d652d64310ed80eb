//! OAuth 1.0a credentials.

use crate::config::{AccessToken, ConsumerKey, Secret};
use crate::error::ConfigError;

/// An OAuth 1.0a credential: the consumer pair plus an optional token pair.
///
/// A credential without a token is what the handshake starts from. Once an
/// access token has been issued, [`Credential::with_token`] attaches it and
/// every protected-resource request is signed with all four values.
///
/// Secrets are masked in `Debug` output.
///
/// # Example
///
/// ```rust
/// use restify::Credential;
///
/// let credential = Credential::new("ck", "cs", "token", "token-secret").unwrap();
/// assert_eq!(credential.consumer_key().as_ref(), "ck");
/// assert_eq!(credential.token().map(AsRef::as_ref), Some("token"));
///
/// let debug = format!("{:?}", credential);
/// assert!(!debug.contains("token-secret"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential {
    consumer_key: ConsumerKey,
    consumer_secret: Secret,
    token: Option<(AccessToken, Secret)>,
}

// Verify Credential is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Credential>();
};

impl Credential {
    /// Creates a full credential from the four OAuth values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any of the values is empty.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::consumer(consumer_key, consumer_secret)?
            .with_token(access_token, access_token_secret)
    }

    /// Creates a credential holding only the consumer pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the key or the secret is empty.
    pub fn consumer(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            consumer_key: ConsumerKey::new(consumer_key)?,
            consumer_secret: Secret::new("consumer secret", consumer_secret)?,
            token: None,
        })
    }

    /// Returns a copy of this credential carrying the given token pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the token or its secret is empty.
    pub fn with_token(
        self,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            token: Some((
                AccessToken::new(token)?,
                Secret::new("access token secret", token_secret)?,
            )),
            ..self
        })
    }

    /// Returns the consumer key.
    #[must_use]
    pub const fn consumer_key(&self) -> &ConsumerKey {
        &self.consumer_key
    }

    /// Returns the consumer secret.
    #[must_use]
    pub const fn consumer_secret(&self) -> &Secret {
        &self.consumer_secret
    }

    /// Returns the token, if one has been issued.
    #[must_use]
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref().map(|(token, _)| token)
    }

    /// Returns the token secret, if a token has been issued.
    #[must_use]
    pub fn token_secret(&self) -> Option<&Secret> {
        self.token.as_ref().map(|(_, secret)| secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumer_only_credential_has_no_token() {
        let credential = Credential::consumer("ck", "cs").unwrap();
        assert!(credential.token().is_none());
        assert!(credential.token_secret().is_none());
    }

    #[test]
    fn test_with_token_attaches_token_pair() {
        let credential = Credential::consumer("ck", "cs")
            .unwrap()
            .with_token("tk", "ts")
            .unwrap();

        assert_eq!(credential.token().unwrap().as_ref(), "tk");
        assert_eq!(credential.token_secret().unwrap().expose(), "ts");
        assert_eq!(credential.consumer_secret().expose(), "cs");
    }

    #[test]
    fn test_new_rejects_empty_values() {
        assert!(matches!(
            Credential::new("", "cs", "tk", "ts"),
            Err(ConfigError::EmptyConsumerKey)
        ));
        assert!(matches!(
            Credential::new("ck", "", "tk", "ts"),
            Err(ConfigError::EmptySecret {
                name: "consumer secret"
            })
        ));
        assert!(matches!(
            Credential::new("ck", "cs", "", "ts"),
            Err(ConfigError::EmptyAccessToken)
        ));
        assert!(matches!(
            Credential::new("ck", "cs", "tk", ""),
            Err(ConfigError::EmptySecret {
                name: "access token secret"
            })
        ));
    }

    #[test]
    fn test_debug_masks_both_secrets() {
        let credential = Credential::new("ck", "consumer-shh", "tk", "token-shh").unwrap();
        let debug = format!("{credential:?}");
        assert!(debug.contains("ck"));
        assert!(!debug.contains("consumer-shh"));
        assert!(!debug.contains("token-shh"));
    }
}

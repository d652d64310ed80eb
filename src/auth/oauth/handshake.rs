//! The OAuth 1.0a token handshake.
//!
//! [`Authorizer`] walks an application through obtaining an access token:
//!
//! 1. [`Authorizer::request_token`] obtains a temporary request token.
//! 2. [`Authorizer::authorization_url`] builds the URL the user visits to
//!    approve it.
//! 3. [`Authorizer::access_token`] exchanges the approved request token and
//!    its verifier for an access token.
//!
//! Trusted clients can skip the browser step with xAuth, through
//! [`Authorizer::access_token_with_credentials`], or the first-party flow
//! through [`Authorizer::authorize_first_party`].
//!
//! Token endpoints answer with `application/x-www-form-urlencoded` bodies;
//! anything but `200 OK` is reported as
//! [`OAuthError::ApiAccess`](crate::auth::oauth::OAuthError::ApiAccess).
//!
//! # Example
//!
//! ```rust,ignore
//! use restify::auth::oauth::Authorizer;
//!
//! let authorizer = Authorizer::new("consumer-key", "consumer-secret")?;
//!
//! let request_token = authorizer
//!     .request_token("https://api.example.com/oauth/request_token", "oob")
//!     .await?;
//! let url = authorizer.authorization_url("https://api.example.com/oauth/authorize", &request_token)?;
//! println!("Visit {url} and enter the verifier");
//!
//! let access = authorizer
//!     .access_token("https://api.example.com/oauth/access_token", &request_token, "verifier")
//!     .await?;
//! let credential = authorizer.credential(&access)?;
//! ```

use base64::prelude::*;

use crate::auth::oauth::{OAuthError, OAuthSigner};
use crate::auth::Credential;
use crate::clients::{ApiAccessError, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::config::Secret;
use crate::error::ConfigError;

/// A token and its secret as issued by a token endpoint.
///
/// Parameters other than `oauth_token` and `oauth_token_secret` are kept in
/// `extra` in the order they were received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPair {
    /// The `oauth_token` value.
    pub token: String,
    /// The `oauth_token_secret` value.
    pub token_secret: Secret,
    /// Any other parameters in the response.
    pub extra: Vec<(String, String)>,
}

impl TokenPair {
    /// Parses a form-encoded token response body.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::InvalidTokenResponse`] if the body cannot be
    /// parsed or lacks either token value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restify::auth::oauth::TokenPair;
    ///
    /// let pair = TokenPair::parse("oauth_token=abc&oauth_token_secret=xyz&user_id=7").unwrap();
    /// assert_eq!(pair.token, "abc");
    /// assert_eq!(pair.token_secret.expose(), "xyz");
    /// assert_eq!(pair.extra, vec![("user_id".to_string(), "7".to_string())]);
    /// ```
    pub fn parse(body: &str) -> Result<Self, OAuthError> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body.trim()).map_err(|e| {
            OAuthError::InvalidTokenResponse {
                reason: e.to_string(),
            }
        })?;

        let mut token = None;
        let mut token_secret = None;
        let mut extra = Vec::new();
        for (key, value) in pairs {
            match key.as_str() {
                "oauth_token" => token = Some(value),
                "oauth_token_secret" => token_secret = Some(value),
                _ => extra.push((key, value)),
            }
        }

        let token = token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| OAuthError::InvalidTokenResponse {
                reason: "missing oauth_token".to_string(),
            })?;
        let token_secret = token_secret
            .and_then(|s| Secret::new("token secret", s).ok())
            .ok_or_else(|| OAuthError::InvalidTokenResponse {
                reason: "missing oauth_token_secret".to_string(),
            })?;

        Ok(Self {
            token,
            token_secret,
            extra,
        })
    }

    /// Returns an extra response parameter by name.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Performs the OAuth 1.0a handshake for one consumer.
#[derive(Clone, Debug)]
pub struct Authorizer {
    consumer: Credential,
    client: HttpClient,
}

// Verify Authorizer is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Authorizer>();
};

impl Authorizer {
    /// Creates an authorizer for the given consumer pair.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Config`] if the key or secret is empty, or
    /// [`OAuthError::Http`] if the HTTP client cannot be created.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Result<Self, OAuthError> {
        Ok(Self {
            consumer: Credential::consumer(consumer_key, consumer_secret)?,
            client: HttpClient::new(None, None)?,
        })
    }

    /// Creates an authorizer around an existing client.
    ///
    /// Any token already held by `credential` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Config`] if the consumer values are rejected.
    pub fn with_client(credential: &Credential, client: HttpClient) -> Result<Self, OAuthError> {
        Ok(Self {
            consumer: Credential::consumer(
                credential.consumer_key().as_ref(),
                credential.consumer_secret().expose(),
            )?,
            client,
        })
    }

    /// Builds the full credential for an issued access token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the token is empty.
    pub fn credential(&self, access: &TokenPair) -> Result<Credential, ConfigError> {
        self.consumer
            .clone()
            .with_token(access.token.clone(), access.token_secret.expose())
    }

    /// Obtains a request token.
    ///
    /// `callback` is sent as `oauth_callback`; use `"oob"` for out-of-band
    /// verification.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::ApiAccess`] if the endpoint does not answer
    /// `200 OK`, or [`OAuthError::InvalidTokenResponse`] for a malformed body.
    pub async fn request_token(&self, url: &str, callback: &str) -> Result<TokenPair, OAuthError> {
        let signer = OAuthSigner::new(self.consumer.clone()).with_callback(callback);
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .signer(signer)
            .build()
            .map_err(HttpError::from)?;

        let response = self.send(request).await?;
        TokenPair::parse(&response.text())
    }

    /// Builds the URL the user visits to approve a request token.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::Http`] if `url` is not an absolute URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restify::auth::oauth::{Authorizer, TokenPair};
    ///
    /// let authorizer = Authorizer::new("ck", "cs").unwrap();
    /// let token = TokenPair::parse("oauth_token=req%2Ftok&oauth_token_secret=s").unwrap();
    /// let url = authorizer
    ///     .authorization_url("https://api.example.com/oauth/authorize", &token)
    ///     .unwrap();
    /// assert_eq!(url, "https://api.example.com/oauth/authorize?oauth_token=req%2Ftok");
    /// ```
    pub fn authorization_url(&self, url: &str, token: &TokenPair) -> Result<String, OAuthError> {
        let mut parsed = url::Url::parse(url).map_err(|_| HttpError::InvalidUrl {
            url: url.to_string(),
        })?;
        parsed
            .query_pairs_mut()
            .append_pair("oauth_token", &token.token);
        Ok(parsed.to_string())
    }

    /// Exchanges an approved request token for an access token.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::ApiAccess`] if the endpoint does not answer
    /// `200 OK`, or [`OAuthError::InvalidTokenResponse`] for a malformed body.
    pub async fn access_token(
        &self,
        url: &str,
        request_token: &TokenPair,
        verifier: &str,
    ) -> Result<TokenPair, OAuthError> {
        let credential = self
            .consumer
            .clone()
            .with_token(request_token.token.clone(), request_token.token_secret.expose())?;
        let signer = OAuthSigner::new(credential).with_verifier(verifier);
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .signer(signer)
            .build()
            .map_err(HttpError::from)?;

        let response = self.send(request).await?;
        TokenPair::parse(&response.text())
    }

    /// Obtains an access token directly from a username and password (xAuth).
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::ApiAccess`] if the endpoint does not answer
    /// `200 OK`, or [`OAuthError::InvalidTokenResponse`] for a malformed body.
    pub async fn access_token_with_credentials(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<TokenPair, OAuthError> {
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .form(Self::x_auth_fields(username, password))
            .signer(OAuthSigner::new(self.consumer.clone()))
            .build()
            .map_err(HttpError::from)?;

        let response = self.send(request).await?;
        TokenPair::parse(&response.text())
    }

    /// Runs the first-party authorization flow.
    ///
    /// Signs like [`access_token_with_credentials`](Self::access_token_with_credentials)
    /// and additionally posts `ec`, the base64 encoding of
    /// `"{username} {password}"`. The raw response is returned since its body
    /// format is service specific.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::ApiAccess`] if the endpoint does not answer `200 OK`.
    pub async fn authorize_first_party(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<HttpResponse, OAuthError> {
        let mut fields = Self::x_auth_fields(username, password);
        fields.push((
            "ec".to_string(),
            BASE64_STANDARD.encode(format!("{username} {password}")),
        ));

        let request = HttpRequest::builder(HttpMethod::Post, url)
            .form(fields)
            .signer(OAuthSigner::new(self.consumer.clone()))
            .build()
            .map_err(HttpError::from)?;

        self.send(request).await
    }

    fn x_auth_fields(username: &str, password: &str) -> Vec<(String, String)> {
        vec![
            ("x_auth_username".to_string(), username.to_string()),
            ("x_auth_password".to_string(), password.to_string()),
            ("x_auth_mode".to_string(), "client_auth".to_string()),
        ]
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, OAuthError> {
        let url = request.url.clone();
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(HttpError::Network(e)) => {
                tracing::warn!(url = %url, error = %e, "Token endpoint unreachable");
                return Err(ApiAccessError::from_transport(e.to_string(), url).into());
            }
            Err(e) => return Err(e.into()),
        };

        if response.code != 200 {
            tracing::warn!(
                status = response.code,
                url = %response.url,
                "Token endpoint rejected the request"
            );
            return Err(
                ApiAccessError::from_status(response.code, response.reason, response.url).into(),
            );
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_pair() {
        let pair = TokenPair::parse(
            "oauth_token=tok&oauth_token_secret=sec&oauth_callback_confirmed=true",
        )
        .unwrap();

        assert_eq!(pair.token, "tok");
        assert_eq!(pair.token_secret.expose(), "sec");
        assert_eq!(pair.extra("oauth_callback_confirmed"), Some("true"));
    }

    #[test]
    fn test_parse_decodes_values() {
        let pair = TokenPair::parse("oauth_token=a%2Bb&oauth_token_secret=c%3Dd\n").unwrap();
        assert_eq!(pair.token, "a+b");
        assert_eq!(pair.token_secret.expose(), "c=d");
    }

    #[test]
    fn test_parse_rejects_missing_values() {
        assert!(matches!(
            TokenPair::parse("oauth_token_secret=sec"),
            Err(OAuthError::InvalidTokenResponse { reason }) if reason.contains("oauth_token")
        ));
        assert!(matches!(
            TokenPair::parse("oauth_token=tok"),
            Err(OAuthError::InvalidTokenResponse { reason }) if reason.contains("oauth_token_secret")
        ));
        assert!(matches!(
            TokenPair::parse(""),
            Err(OAuthError::InvalidTokenResponse { .. })
        ));
    }

    #[test]
    fn test_authorization_url_appends_to_existing_query() {
        let authorizer = Authorizer::new("ck", "cs").unwrap();
        let token = TokenPair::parse("oauth_token=tok&oauth_token_secret=sec").unwrap();

        let url = authorizer
            .authorization_url("https://api.example.com/authorize?lang=en", &token)
            .unwrap();
        assert_eq!(url, "https://api.example.com/authorize?lang=en&oauth_token=tok");
    }

    #[test]
    fn test_authorization_url_rejects_relative_url() {
        let authorizer = Authorizer::new("ck", "cs").unwrap();
        let token = TokenPair::parse("oauth_token=tok&oauth_token_secret=sec").unwrap();

        assert!(matches!(
            authorizer.authorization_url("/authorize", &token),
            Err(OAuthError::Http(HttpError::InvalidUrl { .. }))
        ));
    }

    #[test]
    fn test_credential_from_access_token() {
        let authorizer = Authorizer::new("ck", "cs").unwrap();
        let access = TokenPair::parse("oauth_token=at&oauth_token_secret=ats").unwrap();

        let credential = authorizer.credential(&access).unwrap();
        assert_eq!(credential.consumer_key().as_ref(), "ck");
        assert_eq!(credential.token().unwrap().as_ref(), "at");
        assert_eq!(credential.token_secret().unwrap().expose(), "ats");
    }

    #[test]
    fn test_with_client_drops_existing_token() {
        let credential = Credential::new("ck", "cs", "tk", "ts").unwrap();
        let authorizer =
            Authorizer::with_client(&credential, HttpClient::new(None, None).unwrap()).unwrap();
        assert!(authorizer.consumer.token().is_none());
    }
}

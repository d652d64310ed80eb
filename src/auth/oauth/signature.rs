//! OAuth 1.0a HMAC-SHA1 request signing (RFC 5849).
//!
//! The [`OAuthSigner`] holds everything that goes into the `oauth_*`
//! protocol parameters of a single request: the [`Credential`], an optional
//! callback or verifier used during the handshake, a nonce and a timestamp.
//! It produces the signature base string, the signature itself and the
//! `Authorization` header value.
//!
//! # Example
//!
//! ```rust
//! use restify::Credential;
//! use restify::auth::oauth::OAuthSigner;
//! use restify::clients::HttpMethod;
//!
//! let credential = Credential::new("ck", "cs", "tk", "ts").unwrap();
//! let signer = OAuthSigner::new(credential)
//!     .with_nonce("abc")
//!     .with_timestamp(1_600_000_000);
//!
//! let signature = signer
//!     .signature(HttpMethod::Get, "https://api.example.com/items?status=open", &[])
//!     .unwrap();
//! assert_eq!(signature, "vSGQH52U8rcJqVEZDQWjGkuANOU=");
//! ```

use base64::prelude::*;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::auth::Credential;
use crate::clients::HttpMethod;

type HmacSha1 = Hmac<Sha1>;

/// The signature method advertised in `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";

/// The protocol version advertised in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Percent-encodes a value using the RFC 3986 unreserved set.
///
/// ```rust
/// use restify::auth::oauth::percent_encode;
///
/// assert_eq!(percent_encode("a b&c=d~"), "a%20b%26c%3Dd~");
/// ```
#[must_use]
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Computes a base64-encoded HMAC-SHA1 signature.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(base_string: &str, key: &str) -> String {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base_string.as_bytes());
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Signs a single request with OAuth 1.0a HMAC-SHA1.
#[derive(Clone, Debug)]
pub struct OAuthSigner {
    credential: Credential,
    callback: Option<String>,
    verifier: Option<String>,
    nonce: String,
    timestamp: i64,
}

// Verify OAuthSigner is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthSigner>();
};

impl OAuthSigner {
    const NONCE_LENGTH: usize = 32;

    /// Creates a signer with a fresh random nonce and the current timestamp.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();

        Self {
            credential,
            callback: None,
            verifier: None,
            nonce,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Adds `oauth_callback`, used when requesting a request token.
    #[must_use]
    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Adds `oauth_verifier`, used when exchanging a request token.
    #[must_use]
    pub fn with_verifier(mut self, verifier: impl Into<String>) -> Self {
        self.verifier = Some(verifier.into());
        self
    }

    /// Replaces the generated nonce.
    #[must_use]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }

    /// Replaces the generated timestamp (seconds since the Unix epoch).
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns the credential this signer signs with.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// The `oauth_*` parameters, without `oauth_signature`.
    fn protocol_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            (
                "oauth_consumer_key",
                self.credential.consumer_key().as_ref().to_string(),
            ),
            ("oauth_nonce", self.nonce.clone()),
            ("oauth_signature_method", SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp", self.timestamp.to_string()),
            ("oauth_version", OAUTH_VERSION.to_string()),
        ];
        if let Some(token) = self.credential.token() {
            params.push(("oauth_token", token.as_ref().to_string()));
        }
        if let Some(callback) = &self.callback {
            params.push(("oauth_callback", callback.clone()));
        }
        if let Some(verifier) = &self.verifier {
            params.push(("oauth_verifier", verifier.clone()));
        }
        params.sort_unstable_by(|a, b| a.0.cmp(b.0));
        params
    }

    fn signing_key(&self) -> String {
        format!(
            "{}&{}",
            percent_encode(self.credential.consumer_secret().expose()),
            self.credential
                .token_secret()
                .map(|secret| percent_encode(secret.expose()))
                .unwrap_or_default()
        )
    }

    /// Builds the signature base string (RFC 5849 section 3.4.1).
    ///
    /// `url` may carry a query string; its pairs are signed along with
    /// `params`, which holds the extra query parameters and any
    /// form-encoded body parameters of the request.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `url` is not an absolute URL.
    pub fn signature_base_string(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String, url::ParseError> {
        let parsed = url::Url::parse(url)?;

        let mut base_uri = format!(
            "{}://{}",
            parsed.scheme(),
            parsed.host_str().unwrap_or_default().to_lowercase()
        );
        if let Some(port) = parsed.port() {
            base_uri.push_str(&format!(":{port}"));
        }
        base_uri.push_str(parsed.path());

        let mut encoded: Vec<(String, String)> = parsed
            .query_pairs()
            .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
            .chain(
                params
                    .iter()
                    .map(|(k, v)| (percent_encode(k), percent_encode(v))),
            )
            .chain(
                self.protocol_params()
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), percent_encode(&v))),
            )
            .collect();
        encoded.sort();

        let normalized = encoded
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!(
            "{}&{}&{}",
            method.as_str(),
            percent_encode(&base_uri),
            percent_encode(&normalized)
        ))
    }

    /// Computes the `oauth_signature` value for a request.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `url` is not an absolute URL.
    pub fn signature(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String, url::ParseError> {
        let base_string = self.signature_base_string(method, url, params)?;
        Ok(compute_signature(&base_string, &self.signing_key()))
    }

    /// Builds the `Authorization: OAuth ...` header value for a request.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `url` is not an absolute URL.
    pub fn authorization_header(
        &self,
        method: HttpMethod,
        url: &str,
        params: &[(String, String)],
    ) -> Result<String, url::ParseError> {
        let signature = self.signature(method, url, params)?;

        let mut fields: Vec<String> = self
            .protocol_params()
            .into_iter()
            .map(|(k, v)| format!("{k}=\"{}\"", percent_encode(&v)))
            .collect();
        fields.push(format!("oauth_signature=\"{}\"", percent_encode(&signature)));

        Ok(format!("OAuth {}", fields.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Test Helpers
    // ========================================================================

    fn create_test_signer() -> OAuthSigner {
        OAuthSigner::new(Credential::new("ck", "cs", "tk", "ts").unwrap())
            .with_nonce("abc")
            .with_timestamp(1_600_000_000)
    }

    fn create_consumer_signer() -> OAuthSigner {
        OAuthSigner::new(Credential::consumer("ck", "cs").unwrap())
            .with_nonce("abc")
            .with_timestamp(1_600_000_000)
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    #[test]
    fn test_compute_signature_known_vector() {
        let signature = compute_signature("The quick brown fox jumps over the lazy dog", "key");
        assert_eq!(signature, "3nybhbi3iqa8ino29wqQcBydtNk=");
    }

    #[test]
    fn test_percent_encode_keeps_unreserved_only() {
        assert_eq!(percent_encode("AZaz09-._~"), "AZaz09-._~");
        assert_eq!(percent_encode("a+b/c"), "a%2Bb%2Fc");
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_generated_nonce_is_alphanumeric() {
        let signer = OAuthSigner::new(Credential::consumer("ck", "cs").unwrap());
        assert_eq!(signer.nonce.len(), 32);
        assert!(signer.nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    // ========================================================================
    // Base String
    // ========================================================================

    #[test]
    fn test_base_string_for_protected_resource() {
        let base = create_test_signer()
            .signature_base_string(
                HttpMethod::Get,
                "https://api.example.com/items?status=open",
                &[],
            )
            .unwrap();

        assert_eq!(
            base,
            "GET&https%3A%2F%2Fapi.example.com%2Fitems&oauth_consumer_key%3Dck%26oauth_nonce%3Dabc%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1600000000%26oauth_token%3Dtk%26oauth_version%3D1.0%26status%3Dopen"
        );
    }

    #[test]
    fn test_base_string_treats_extra_params_like_query_pairs() {
        let signer = create_test_signer();
        let from_url = signer
            .signature_base_string(
                HttpMethod::Get,
                "https://api.example.com/items?status=open",
                &[],
            )
            .unwrap();
        let from_params = signer
            .signature_base_string(
                HttpMethod::Get,
                "https://api.example.com/items",
                &[("status".to_string(), "open".to_string())],
            )
            .unwrap();

        assert_eq!(from_url, from_params);
    }

    #[test]
    fn test_base_string_normalizes_host_and_default_port() {
        let signer = create_test_signer();
        let plain = signer
            .signature_base_string(HttpMethod::Get, "https://api.example.com/items", &[])
            .unwrap();
        let noisy = signer
            .signature_base_string(HttpMethod::Get, "HTTPS://API.Example.com:443/items", &[])
            .unwrap();
        assert_eq!(plain, noisy);

        let custom_port = signer
            .signature_base_string(HttpMethod::Get, "http://localhost:8080/items", &[])
            .unwrap();
        assert!(custom_port.starts_with("GET&http%3A%2F%2Flocalhost%3A8080%2Fitems&"));
    }

    #[test]
    fn test_base_string_rejects_relative_url() {
        let result = create_test_signer().signature_base_string(HttpMethod::Get, "/items", &[]);
        assert!(result.is_err());
    }

    // ========================================================================
    // Signatures and Header
    // ========================================================================

    #[test]
    fn test_signature_for_protected_resource() {
        let signature = create_test_signer()
            .signature(
                HttpMethod::Get,
                "https://api.example.com/items?status=open",
                &[],
            )
            .unwrap();
        assert_eq!(signature, "vSGQH52U8rcJqVEZDQWjGkuANOU=");
    }

    #[test]
    fn test_signature_for_request_token_with_callback() {
        let signer = create_consumer_signer().with_callback("oob");
        let url = "https://api.example.com/oauth/request_token";

        assert_eq!(
            signer
                .signature_base_string(HttpMethod::Post, url, &[])
                .unwrap(),
            "POST&https%3A%2F%2Fapi.example.com%2Foauth%2Frequest_token&oauth_callback%3Doob%26oauth_consumer_key%3Dck%26oauth_nonce%3Dabc%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1600000000%26oauth_version%3D1.0"
        );
        assert_eq!(
            signer.signature(HttpMethod::Post, url, &[]).unwrap(),
            "RI4GrYcnpOGxCZZ/dura9zKHA5I="
        );
    }

    #[test]
    fn test_authorization_header_lists_protocol_params() {
        let header = create_test_signer()
            .authorization_header(
                HttpMethod::Get,
                "https://api.example.com/items?status=open",
                &[],
            )
            .unwrap();

        assert!(header.starts_with("OAuth oauth_consumer_key=\"ck\", "));
        assert!(header.contains("oauth_nonce=\"abc\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_timestamp=\"1600000000\""));
        assert!(header.contains("oauth_token=\"tk\""));
        assert!(header.contains("oauth_version=\"1.0\""));
        assert!(header.ends_with("oauth_signature=\"vSGQH52U8rcJqVEZDQWjGkuANOU%3D\""));
        assert!(!header.contains("status"));
    }

    #[test]
    fn test_consumer_only_header_has_no_token() {
        let header = create_consumer_signer()
            .authorization_header(HttpMethod::Get, "https://api.example.com/items", &[])
            .unwrap();
        assert!(!header.contains("oauth_token="));
    }

    #[test]
    fn test_verifier_is_signed() {
        let signer = create_test_signer();
        let without = signer
            .signature(HttpMethod::Post, "https://api.example.com/oauth/access_token", &[])
            .unwrap();
        let with = signer
            .clone()
            .with_verifier("v123")
            .signature(HttpMethod::Post, "https://api.example.com/oauth/access_token", &[])
            .unwrap();
        assert_ne!(without, with);
    }
}

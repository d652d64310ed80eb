//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated OAuth consumer key.
///
/// # Example
///
/// ```rust
/// use restify::ConsumerKey;
///
/// let key = ConsumerKey::new("my-consumer-key").unwrap();
/// assert_eq!(key.as_ref(), "my-consumer-key");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsumerKey(String);

impl ConsumerKey {
    /// Creates a new validated consumer key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyConsumerKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyConsumerKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ConsumerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth access (or request) token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a new validated token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAccessToken`] if the token is empty.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::EmptyAccessToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A secret value (consumer secret or token secret).
///
/// The `Debug` implementation masks the value, displaying only
/// `Secret(*****)`, so credentials never end up in logs.
///
/// # Example
///
/// ```rust
/// use restify::Secret;
///
/// let secret = Secret::new("consumer secret", "my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "Secret(*****)");
/// assert_eq!(secret.expose(), "my-secret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Creates a new validated secret.
    ///
    /// `name` only appears in the error message.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySecret`] if the secret is empty.
    pub fn new(name: &'static str, secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret { name });
        }
        Ok(Self(secret))
    }

    /// Returns the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(*****)")
    }
}

/// A validated API base URL.
///
/// Every resource path is resolved relative to this URL, and absolute URLs
/// handed back by the API (for `get_by_url` or create overrides) must start
/// with it. A trailing `/` is dropped on construction.
///
/// # Example
///
/// ```rust
/// use restify::BaseUrl;
///
/// let base = BaseUrl::new("https://api.example.com/v1/").unwrap();
/// assert_eq!(base.as_ref(), "https://api.example.com/v1");
/// assert_eq!(base.join("/items/42"), "https://api.example.com/v1/items/42");
/// assert_eq!(base.relative_path("https://api.example.com/v1/items/42"), Some("/items/42"));
/// assert_eq!(base.relative_path("https://other.example.com/items/42"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL cannot be parsed,
    /// is not `http`/`https`, or has no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let parsed = url::Url::parse(trimmed)
            .map_err(|_| ConfigError::InvalidBaseUrl { url: url.clone() })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Joins a resource path onto the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        let path = path.trim();
        if path.is_empty() {
            return self.0.clone();
        }
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }

    /// Returns the part of `url` that follows the base URL.
    ///
    /// Returns `None` when `url` does not start with the base URL, or when
    /// nothing but separators would remain after stripping it.
    #[must_use]
    pub fn relative_path<'a>(&self, url: &'a str) -> Option<&'a str> {
        let rest = url.trim().strip_prefix(self.0.as_str())?;
        if !rest.starts_with(['/', '?']) || rest.trim_matches('/').is_empty() {
            return None;
        }
        Some(rest)
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

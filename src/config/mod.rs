//! Configuration types.
//!
//! # Overview
//!
//! - [`ResourceConfig`]: everything a [`ResourceSet`](crate::ResourceSet) needs
//!   to talk to one API resource
//! - [`ResourceConfigBuilder`]: a builder for [`ResourceConfig`]
//! - [`UrlTemplates`]: per-operation URL templates
//! - [`BaseUrl`], [`ConsumerKey`], [`AccessToken`], [`Secret`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use restify::{BaseUrl, ContentType, Credential, ResourceConfig};
//!
//! let config = ResourceConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com/v1").unwrap())
//!     .content_type(ContentType::Json)
//!     .credential(Credential::new("ck", "cs", "tk", "ts").unwrap())
//!     .list_url("/items")
//!     .get_url("/items/{0}")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.templates().get.as_deref(), Some("/items/{0}"));
//! ```

mod newtypes;

pub use newtypes::{AccessToken, BaseUrl, ConsumerKey, Secret};

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

use crate::auth::Credential;
use crate::clients::ContentType;
use crate::error::ConfigError;

/// Per-operation URL templates.
///
/// Each template is a path relative to the base URL with positional
/// placeholders: `{0}` is the first path argument, `{1}` the second.
/// An operation whose template is unset (or blank) fails with
/// [`ResourceError::NotConfigured`](crate::ResourceError::NotConfigured)
/// before any request is made.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlTemplates {
    /// Used by `list()`.
    pub list: Option<String>,
    /// Used by `list_children(parent_id)`; `{0}` is the parent.
    pub child_list: Option<String>,
    /// Used by `get(id)`; `{0}` is the id.
    pub get: Option<String>,
    /// Used by `get_child(parent_id, id)`; `{0}` is the parent, `{1}` the id.
    pub child_get: Option<String>,
    /// Used by `create` and `create_file` unless an override URL is given.
    pub create: Option<String>,
    /// Used by `update`, `update_file` and `delete`; `{0}` is the id.
    pub edit: Option<String>,
    /// Used by `search`; the query pairs are appended.
    pub search: Option<String>,
}

/// Configuration for one [`ResourceSet`](crate::ResourceSet).
///
/// # Thread Safety
///
/// `ResourceConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ResourceConfig {
    base_url: BaseUrl,
    content_type: ContentType,
    credential: Option<Credential>,
    headers: Vec<(String, String)>,
    templates: UrlTemplates,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ResourceConfig {
    /// Creates a new builder for constructing a `ResourceConfig`.
    #[must_use]
    pub fn builder() -> ResourceConfigBuilder {
        ResourceConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the content type.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Returns the credential, if configured.
    #[must_use]
    pub const fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Returns the fixed headers sent with every request.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the URL templates.
    #[must_use]
    pub const fn templates(&self) -> &UrlTemplates {
        &self.templates
    }

    /// Returns the default request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ResourceConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceConfig>();
};

/// Builder for constructing [`ResourceConfig`] instances.
///
/// `base_url` is required. All other fields have defaults.
///
/// # Defaults
///
/// - `content_type`: [`ContentType::Xml`]
/// - `credential`: `None` (requests are sent unsigned)
/// - `headers`: none
/// - all URL templates: unset
/// - `timeout`: `None` (the transport default)
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ResourceConfigBuilder {
    base_url: Option<BaseUrl>,
    content_type: Option<ContentType>,
    credential: Option<Credential>,
    headers: Vec<(String, String)>,
    templates: UrlTemplates,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
}

impl ResourceConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, base_url: BaseUrl) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the content type.
    #[must_use]
    pub const fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Sets the credential used to sign every request.
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Adds a fixed header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets all URL templates at once.
    #[must_use]
    pub fn templates(mut self, templates: UrlTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Sets the template used by `list()`.
    #[must_use]
    pub fn list_url(mut self, template: impl Into<String>) -> Self {
        self.templates.list = Some(template.into());
        self
    }

    /// Sets the template used by `list_children(parent_id)`.
    #[must_use]
    pub fn child_list_url(mut self, template: impl Into<String>) -> Self {
        self.templates.child_list = Some(template.into());
        self
    }

    /// Sets the template used by `get(id)`.
    #[must_use]
    pub fn get_url(mut self, template: impl Into<String>) -> Self {
        self.templates.get = Some(template.into());
        self
    }

    /// Sets the template used by `get_child(parent_id, id)`.
    #[must_use]
    pub fn child_url(mut self, template: impl Into<String>) -> Self {
        self.templates.child_get = Some(template.into());
        self
    }

    /// Sets the template used by `create` and `create_file`.
    #[must_use]
    pub fn create_url(mut self, template: impl Into<String>) -> Self {
        self.templates.create = Some(template.into());
        self
    }

    /// Sets the template used by `update`, `update_file` and `delete`.
    #[must_use]
    pub fn edit_url(mut self, template: impl Into<String>) -> Self {
        self.templates.edit = Some(template.into());
        self
    }

    /// Sets the template used by `search`.
    #[must_use]
    pub fn search_url(mut self, template: impl Into<String>) -> Self {
        self.templates.search = Some(template.into());
        self
    }

    /// Sets the default timeout for requests.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ResourceConfig`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set,
    /// or [`ConfigError::InvalidHeader`] if a fixed header cannot be sent.
    pub fn build(self) -> Result<ResourceConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(ResourceConfig {
            base_url,
            content_type: self.content_type.unwrap_or_default(),
            credential: self.credential,
            headers: self.headers,
            templates: self.templates,
            timeout: self.timeout,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

//! # Restify
//!
//! A generic client for XML and JSON REST APIs authenticated with OAuth 1.0a.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ResourceConfig`] and [`ResourceConfigBuilder`]
//! - Validated newtypes for OAuth credentials and the base URL
//! - [`ResourceSet<T>`]: list, get, search, create, update and delete for one
//!   entity type, mapped onto templated URLs
//! - Typed query objects mapped to query parameters via [`query`]
//! - XML and JSON entity encoding via [`rest::codec`]
//! - OAuth 1.0a request signing and the token handshake via [`auth::oauth`]
//! - An async HTTP client built on `reqwest`
//!
//! ## Quick Start
//!
//! ```rust
//! use restify::{BaseUrl, ContentType, Credential, ResourceConfig, ResourceSet};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Item {
//!     id: u32,
//!     name: String,
//! }
//!
//! let credential = Credential::new("consumer-key", "consumer-secret", "token", "token-secret")
//!     .unwrap();
//!
//! let config = ResourceConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com/v1").unwrap())
//!     .content_type(ContentType::Json)
//!     .credential(credential)
//!     .list_url("/items")
//!     .get_url("/items/{0}")
//!     .edit_url("/items/{0}")
//!     .build()
//!     .unwrap();
//!
//! let items: ResourceSet<Item> = ResourceSet::new(config).unwrap();
//! assert!(items.params().is_empty());
//! ```
//!
//! ## Making API Requests
//!
//! ```rust,ignore
//! // GET https://api.example.com/v1/items
//! let all = items.list().await?;
//!
//! // GET https://api.example.com/v1/items/42
//! let item = items.get("42").await?;
//!
//! // PUT the encoded entity, then DELETE; an empty answer yields None
//! let updated: Option<Item> = items.update(&item, "42").await?;
//! let deleted = items.delete("42").await?;
//! ```
//!
//! Any status above 300 is returned as [`ResourceError::ApiAccess`], as is a
//! request that never got a response.
//!
//! ## Searching
//!
//! ```rust,ignore
//! use restify::query::{FieldValue, QueryField, QueryObject};
//!
//! struct ItemSearch {
//!     name: Option<String>,
//!     since: Option<chrono::NaiveDate>,
//! }
//!
//! impl QueryObject for ItemSearch {
//!     const FIELDS: &'static [QueryField<Self>] = &[
//!         QueryField::new("name", |q: &Self| FieldValue::of(&q.name)),
//!         QueryField::new("since", |q: &Self| FieldValue::of(&q.since)).format("yyyyMMdd"),
//!     ];
//! }
//!
//! let found: ItemList = items.search(&ItemSearch { name: Some("widget".into()), since: None }).await?;
//! ```
//!
//! ## OAuth Handshake
//!
//! ```rust,ignore
//! use restify::auth::oauth::Authorizer;
//!
//! let authorizer = Authorizer::new("consumer-key", "consumer-secret")?;
//!
//! // Step 1: obtain a request token
//! let request_token = authorizer
//!     .request_token("https://api.example.com/oauth/request_token", "https://app.example.com/cb")
//!     .await?;
//!
//! // Step 2: send the user to the authorization page
//! let url = authorizer.authorization_url("https://api.example.com/oauth/authorize", &request_token)?;
//!
//! // Step 3: exchange the verifier for an access token
//! let access = authorizer
//!     .access_token("https://api.example.com/oauth/access_token", &request_token, verifier)
//!     .await?;
//! let credential = authorizer.credential(&access)?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes validate on construction, and unset
//!   URL templates fail before any request is sent
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime
//! - **Immutable resource sets**: Extra parameters produce a derived copy

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod query;
pub mod rest;

// Re-export public types at crate root for convenience
pub use auth::Credential;
pub use config::{
    AccessToken, BaseUrl, ConsumerKey, ResourceConfig, ResourceConfigBuilder, Secret,
    UrlTemplates,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiAccessError, ContentType, HttpClient, HttpError, HttpMethod, HttpRequest,
    HttpRequestBuilder, HttpResponse,
};

// Re-export resource and query types
pub use query::{QueryError, QueryObject};
pub use rest::{FileUpload, ResourceError, ResourceSet};

// Re-export OAuth types for convenience
pub use auth::oauth::{Authorizer, OAuthError, TokenPair};

//! HTTP transport.
//!
//! This module provides the transport layer shared by
//! [`ResourceSet`](crate::ResourceSet) and the OAuth
//! [`Authorizer`](crate::auth::oauth::Authorizer). It executes one request
//! per call and returns status, reason, headers, raw body and the resolved
//! URL; deciding what counts as a failure is left to the caller.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client
//! - [`HttpRequest`]: A request to be sent, optionally OAuth-signed
//! - [`HttpResponse`]: A raw response
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`ContentType`]: Entity wire formats (XML, JSON)
//! - [`ApiAccessError`]: Failure status or unreachable API
//!
//! # Example
//!
//! ```rust,ignore
//! use restify::clients::{HttpClient, HttpMethod, HttpRequest};
//! use restify::auth::oauth::OAuthSigner;
//! use restify::Credential;
//!
//! let client = HttpClient::new(None, None)?;
//! let credential = Credential::new("ck", "cs", "tk", "ts")?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "https://api.example.com/items")
//!     .signer(OAuthSigner::new(credential))
//!     .build()?;
//!
//! let response = client.execute(request).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiAccessError, HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{
    ContentType, FilePart, HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody,
};
pub use http_response::HttpResponse;

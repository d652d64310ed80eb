//! HTTP client used by resource sets and the OAuth handshake.
//!
//! This module provides the [`HttpClient`] type, which executes one
//! [`HttpRequest`] per call, signing it with OAuth 1.0a when the request
//! carries a signer.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::clients::errors::HttpError;
use crate::clients::http_request::{HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::HttpResponse;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for executing requests against a REST API.
///
/// The client handles:
/// - Default headers including User-Agent and Accept-Encoding
/// - OAuth 1.0a signing of the URL, query and form parameters
/// - Content-Type selection for entity, form and multipart bodies
/// - Per-request timeouts
///
/// No status code is treated as an error here; interpreting the response is
/// up to the caller.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use restify::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(None, None)?;
/// let request = HttpRequest::builder(HttpMethod::Get, "https://api.example.com/items")
///     .build()?;
/// let response = client.execute(request).await?;
/// println!("{} {}", response.code, response.text());
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Arguments
    ///
    /// * `user_agent_prefix` - Optional prefix for the User-Agent header
    /// * `timeout` - Default timeout for requests that do not set their own
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(
        user_agent_prefix: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self, HttpError> {
        let user_agent_prefix =
            user_agent_prefix.map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!("{user_agent_prefix}Restify v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept-Encoding".to_string(), "gzip,deflate".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Executes a request and returns the raw response.
    ///
    /// Any status code is returned as `Ok`. The response's `reason` is the
    /// canonical phrase for its status code.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The URL cannot be signed (`InvalidUrl`)
    /// - No response was received (`Network`)
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let authorization = match &request.signer {
            Some(signer) => Some(
                signer
                    .authorization_header(request.method, &request.url, &request.signed_params())
                    .map_err(|_| HttpError::InvalidUrl {
                        url: request.url.clone(),
                    })?,
            ),
            None => None,
        };

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut req_builder = self.client.request(method, &request.url);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        // Form and multipart bodies set their own content type
        if let Some(content_type) = request.content_type {
            if matches!(request.body, RequestBody::Empty | RequestBody::Text(_)) {
                req_builder = req_builder.header(CONTENT_TYPE, content_type.as_mime());
            }
        }
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }
        if let Some(authorization) = authorization {
            req_builder = req_builder.header(AUTHORIZATION, authorization);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }
        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        req_builder = match request.body {
            RequestBody::Empty => req_builder,
            RequestBody::Text(text) => req_builder.body(text),
            RequestBody::Form(fields) => req_builder.form(&fields),
            RequestBody::Multipart(part) => {
                let file = reqwest::multipart::Part::bytes(part.bytes).file_name(part.file_name);
                req_builder.multipart(reqwest::multipart::Form::new().part(part.field_name, file))
            }
        };

        tracing::debug!(method = %request.method, url = %request.url, "Sending request");

        let res = req_builder.send().await?;

        let status = res.status();
        let url = res.url().to_string();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        tracing::debug!(status = status.as_u16(), url = %url, "Received response");

        Ok(HttpResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            headers,
            body,
            url,
        ))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

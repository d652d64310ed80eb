//! HTTP request types.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests executed by [`HttpClient`](crate::clients::HttpClient).

use std::fmt;
use std::time::Duration;

use crate::auth::oauth::OAuthSigner;
use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by resource sets and the OAuth handshake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method name, as used on the wire and in
    /// OAuth signature base strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    const fn allows_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire format for entity bodies.
///
/// Selects both the `Content-Type` header and the codec used for request and
/// response bodies. Defaults to XML.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// XML content type (`application/xml`).
    #[default]
    Xml,
    /// JSON content type (`application/json`).
    Json,
}

impl ContentType {
    /// Returns the MIME type string for this content type.
    #[must_use]
    pub const fn as_mime(&self) -> &'static str {
        match self {
            Self::Xml => "application/xml",
            Self::Json => "application/json",
        }
    }
}

/// A single file sent as a `multipart/form-data` part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    /// The form field name of the part.
    pub field_name: String,
    /// The file name announced for the part (may be empty).
    pub file_name: String,
    /// The file contents.
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Field name used when none is given.
    pub const DEFAULT_FIELD_NAME: &'static str = "stream";

    /// Creates a part under the default field name with an empty file name.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            field_name: Self::DEFAULT_FIELD_NAME.to_string(),
            file_name: String::new(),
            bytes: bytes.into(),
        }
    }

    /// Sets the form field name.
    #[must_use]
    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    /// Sets the file name.
    #[must_use]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }
}

/// The body of an [`HttpRequest`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// An encoded entity, sent with the request's content type.
    Text(String),
    /// `application/x-www-form-urlencoded` pairs. They are part of the OAuth
    /// signature.
    Form(Vec<(String, String)>),
    /// A single-file `multipart/form-data` body.
    Multipart(FilePart),
}

impl RequestBody {
    /// Returns `true` if there is no body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// An HTTP request to be executed by [`HttpClient`](crate::clients::HttpClient).
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use restify::clients::{ContentType, HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Post, "https://api.example.com/items")
///     .content_type(ContentType::Json)
///     .text(r#"{"name":"widget"}"#)
///     .query_param("dry_run", "true")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.method, HttpMethod::Post);
/// assert_eq!(request.query, vec![("dry_run".to_string(), "true".to_string())]);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub method: HttpMethod,
    /// The absolute URL for this request; may already carry a query string.
    pub url: String,
    /// Query parameters appended to the URL, in order.
    pub query: Vec<(String, String)>,
    /// Additional headers to include in the request.
    pub headers: Vec<(String, String)>,
    /// The content type announced for the request.
    pub content_type: Option<ContentType>,
    /// The request body.
    pub body: RequestBody,
    /// Per-request timeout overriding the client default.
    pub timeout: Option<Duration>,
    /// OAuth signer; the request is sent unsigned when absent.
    pub signer: Option<OAuthSigner>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - a text body is present but `content_type` is `None`
    /// - a body is attached to a GET or DELETE request
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.body.is_empty() && !self.method.allows_body() {
            return Err(InvalidHttpRequestError::BodyNotAllowed {
                method: self.method.to_string(),
            });
        }

        if matches!(self.body, RequestBody::Text(_)) && self.content_type.is_none() {
            return Err(InvalidHttpRequestError::MissingContentType);
        }

        Ok(())
    }

    /// Returns the parameters that take part in the OAuth signature besides
    /// those already in the URL: extra query parameters and form fields.
    #[must_use]
    pub fn signed_params(&self) -> Vec<(String, String)> {
        let mut params = self.query.clone();
        if let RequestBody::Form(fields) = &self.body {
            params.extend(fields.iter().cloned());
        }
        params
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            request: HttpRequest {
                method,
                url: url.into(),
                query: Vec::new(),
                headers: Vec::new(),
                content_type: None,
                body: RequestBody::Empty,
                timeout: None,
                signer: None,
            },
        }
    }

    /// Appends query parameters.
    #[must_use]
    pub fn query(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.request.query.extend(params);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the content type.
    #[must_use]
    pub const fn content_type(mut self, content_type: ContentType) -> Self {
        self.request.content_type = Some(content_type);
        self
    }

    /// Sets an encoded entity body.
    #[must_use]
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.request.body = RequestBody::Text(body.into());
        self
    }

    /// Sets a form-encoded body.
    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.request.body = RequestBody::Form(fields);
        self
    }

    /// Sets a multipart body holding one file.
    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        self.request.body = RequestBody::Multipart(part);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    /// Signs the request with OAuth 1.0a.
    #[must_use]
    pub fn signer(mut self, signer: OAuthSigner) -> Self {
        self.request.signer = Some(signer);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_content_type_mime() {
        assert_eq!(ContentType::Xml.as_mime(), "application/xml");
        assert_eq!(ContentType::Json.as_mime(), "application/json");
        assert_eq!(ContentType::default(), ContentType::Xml);
    }

    #[test]
    fn test_file_part_defaults() {
        let part = FilePart::new(vec![1, 2, 3]);
        assert_eq!(part.field_name, "stream");
        assert_eq!(part.file_name, "");

        let part = part.field_name("upload").file_name("a.png");
        assert_eq!(part.field_name, "upload");
        assert_eq!(part.file_name, "a.png");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://api.example.com/items")
            .build()
            .unwrap();

        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://api.example.com/items");
        assert!(request.body.is_empty());
        assert!(request.content_type.is_none());
        assert!(request.timeout.is_none());
        assert!(request.signer.is_none());
    }

    #[test]
    fn test_verify_requires_content_type_for_text_body() {
        let result = HttpRequest::builder(HttpMethod::Post, "https://api.example.com/items")
            .text("<item/>")
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingContentType)
        ));
    }

    #[test]
    fn test_verify_rejects_body_on_get() {
        let result = HttpRequest::builder(HttpMethod::Get, "https://api.example.com/items")
            .content_type(ContentType::Xml)
            .text("<item/>")
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::BodyNotAllowed { method }) if method == "GET"
        ));
    }

    #[test]
    fn test_post_without_body_is_allowed() {
        let request = HttpRequest::builder(HttpMethod::Post, "https://api.example.com/oauth/request_token")
            .build()
            .unwrap();
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_query_params_keep_order_and_duplicates() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://api.example.com/items")
            .query_param("tag", "b")
            .query_param("tag", "a")
            .build()
            .unwrap();

        assert_eq!(
            request.query,
            vec![
                ("tag".to_string(), "b".to_string()),
                ("tag".to_string(), "a".to_string()),
            ]
        );
    }

    #[test]
    fn test_signed_params_include_form_fields() {
        let request = HttpRequest::builder(HttpMethod::Post, "https://api.example.com/oauth/access_token")
            .query_param("a", "1")
            .form(vec![("x_auth_mode".to_string(), "client_auth".to_string())])
            .build()
            .unwrap();

        assert_eq!(
            request.signed_params(),
            vec![
                ("a".to_string(), "1".to_string()),
                ("x_auth_mode".to_string(), "client_auth".to_string()),
            ]
        );
    }

    #[test]
    fn test_multipart_body_is_not_signed() {
        let request = HttpRequest::builder(HttpMethod::Put, "https://api.example.com/items/1")
            .file(FilePart::new(b"abc".to_vec()))
            .build()
            .unwrap();

        assert!(request.signed_params().is_empty());
    }
}

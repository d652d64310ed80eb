//! HTTP response type.

use std::borrow::Cow;
use std::collections::HashMap;

/// A raw response as returned by [`HttpClient`](crate::clients::HttpClient).
///
/// The body is kept as bytes; decoding is left to the caller.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use restify::clients::HttpResponse;
///
/// let response = HttpResponse::new(
///     204,
///     "No Content",
///     HashMap::new(),
///     Vec::new(),
///     "https://api.example.com/items/42",
/// );
/// assert!(response.is_ok());
/// assert!(response.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Canonical reason phrase for `code` (e.g. "Not Found"), not the
    /// phrase the server sent. Empty for codes without one.
    pub reason: String,
    /// Response headers, keyed by lower-cased name.
    pub headers: HashMap<String, Vec<String>>,
    /// Raw response body.
    pub body: Vec<u8>,
    /// The URL the response was served from, after redirects.
    pub url: String,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(
        code: u16,
        reason: impl Into<String>,
        headers: HashMap<String, Vec<String>>,
        body: Vec<u8>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            code,
            reason: reason.into(),
            headers,
            body,
            url: url.into(),
        }
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns `true` if the body is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_response(code: u16, body: &[u8]) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["application/xml; charset=utf-8".to_string()],
        );
        HttpResponse::new(code, "OK", headers, body.to_vec(), "https://api.example.com/items")
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        assert!(create_test_response(200, b"").is_ok());
        assert!(create_test_response(204, b"").is_ok());
        assert!(create_test_response(299, b"").is_ok());
    }

    #[test]
    fn test_is_ok_returns_false_otherwise() {
        assert!(!create_test_response(300, b"").is_ok());
        assert!(!create_test_response(404, b"").is_ok());
        assert!(!create_test_response(500, b"").is_ok());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = create_test_response(200, b"");
        assert_eq!(
            response.header("Content-Type"),
            Some("application/xml; charset=utf-8")
        );
        assert_eq!(response.header("x-missing"), None);
    }

    #[test]
    fn test_text_is_lossy() {
        let response = create_test_response(200, &[b'o', b'k', 0xff]);
        assert_eq!(response.text(), "ok\u{fffd}");
    }
}

//! URL template resolution for resource set operations.
//!
//! Each [`ResourceOperation`] reads one template from [`UrlTemplates`].
//! Templates use positional placeholders: `{0}` for the first path argument,
//! `{1}` for the second. Arguments are percent-encoded as path segments.
//!
//! # Example
//!
//! ```rust
//! use restify::rest::{build_path, resolve_template, ResourceOperation};
//! use restify::UrlTemplates;
//!
//! let templates = UrlTemplates {
//!     child_get: Some("/lists/{0}/items/{1}".to_string()),
//!     ..UrlTemplates::default()
//! };
//!
//! let template = resolve_template(&templates, ResourceOperation::GetChild).unwrap();
//! assert_eq!(build_path(template, &["7", "a b"]), "/lists/7/items/a%20b");
//!
//! assert!(resolve_template(&templates, ResourceOperation::List).is_err());
//! ```

use crate::clients::HttpMethod;
use crate::config::UrlTemplates;
use crate::rest::errors::ResourceError;

/// Operations that can be performed through a resource set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// List all resources (GET).
    List,
    /// List the resources below a parent (GET).
    ListChildren,
    /// Get one resource by ID (GET).
    Get,
    /// Get one resource below a parent (GET).
    GetChild,
    /// Search with query parameters (GET).
    Search,
    /// Create a resource (POST).
    Create,
    /// Update a resource (PUT).
    Update,
    /// Delete a resource (DELETE).
    Delete,
}

impl ResourceOperation {
    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::List | Self::ListChildren | Self::Get | Self::GetChild | Self::Search => {
                HttpMethod::Get
            }
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the configuration name of the template this operation uses.
    #[must_use]
    pub const fn template_name(&self) -> &'static str {
        match self {
            Self::List => "list_url",
            Self::ListChildren => "child_list_url",
            Self::Get => "get_url",
            Self::GetChild => "child_url",
            Self::Search => "search_url",
            Self::Create => "create_url",
            Self::Update | Self::Delete => "edit_url",
        }
    }

    fn template<'a>(&self, templates: &'a UrlTemplates) -> Option<&'a String> {
        match self {
            Self::List => templates.list.as_ref(),
            Self::ListChildren => templates.child_list.as_ref(),
            Self::Get => templates.get.as_ref(),
            Self::GetChild => templates.child_get.as_ref(),
            Self::Search => templates.search.as_ref(),
            Self::Create => templates.create.as_ref(),
            Self::Update | Self::Delete => templates.edit.as_ref(),
        }
    }
}

/// Returns the template for an operation.
///
/// # Errors
///
/// Returns [`ResourceError::NotConfigured`] if the template is unset, empty,
/// or whitespace only.
pub fn resolve_template(
    templates: &UrlTemplates,
    operation: ResourceOperation,
) -> Result<&str, ResourceError> {
    operation
        .template(templates)
        .map(String::as_str)
        .filter(|template| !template.trim().is_empty())
        .ok_or(ResourceError::NotConfigured {
            template: operation.template_name(),
        })
}

/// Builds a path from a template by substituting positional arguments.
///
/// `{0}` is replaced by the first argument, `{1}` by the second, and so on.
/// Placeholders without a matching argument are left untouched.
#[must_use]
pub fn build_path(template: &str, args: &[&str]) -> String {
    let mut result = template.trim().to_string();

    for (index, value) in args.iter().enumerate() {
        let placeholder = format!("{{{index}}}");
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
};

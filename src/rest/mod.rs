//! Generic REST resource sets.
//!
//! This module provides:
//!
//! - **[`ResourceSet<T>`]**: list/get/search/create/update/delete for one
//!   entity type, driven by the URL templates of a
//!   [`ResourceConfig`](crate::ResourceConfig)
//! - **Path building**: `{0}`/`{1}` template substitution per
//!   [`ResourceOperation`]
//! - **[`codec`]**: XML and JSON entity encoding
//! - **[`ResourceError`]**: the error returned by every operation
//!
//! # Example
//!
//! ```rust,ignore
//! use restify::{BaseUrl, ResourceConfig, ResourceSet};
//! use restify::rest::FileUpload;
//!
//! let config = ResourceConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com/v1")?)
//!     .list_url("/lists/{0}/items")
//!     .create_url("/items")
//!     .build()?;
//!
//! let items: ResourceSet<Item> = ResourceSet::new(config)?;
//!
//! // Every request through `paged` carries ?page=2
//! let paged = items.with_params([("page", "2")]);
//! let second_page = paged.list_children("7").await?;
//!
//! let created: Option<Item> = items.create(&Item::new("Widget"), None).await?;
//! let uploaded = items.create_file(FileUpload::new(bytes).file_name("a.png")).await?;
//! ```

pub mod codec;
mod errors;
mod path;
mod resource_set;

pub use errors::ResourceError;
pub use path::{build_path, resolve_template, ResourceOperation};
pub use resource_set::{FileUpload, ResourceSet, CREATE_TIMEOUT};

//! Entity encoding and decoding by content type.
//!
//! XML documents are written with an explicit UTF-8 declaration and no
//! namespace declarations; the root element is named after the entity type.
//! XML lists are read from a root element whose children are the items,
//! whatever their element names.
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use restify::rest::codec;
//! use restify::ContentType;
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Item {
//!     id: u32,
//!     name: String,
//! }
//!
//! let item = Item { id: 7, name: "Widget".to_string() };
//!
//! let xml = codec::encode(&item, ContentType::Xml).unwrap();
//! assert_eq!(
//!     xml,
//!     r#"<?xml version="1.0" encoding="utf-8"?><Item><id>7</id><name>Widget</name></Item>"#
//! );
//!
//! let decoded: Item = codec::decode(xml.as_bytes(), ContentType::Xml).unwrap();
//! assert_eq!(decoded, item);
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::ContentType;
use crate::rest::errors::ResourceError;

/// Declaration prefixed to every encoded XML document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Deserialize)]
struct XmlList<T> {
    #[serde(rename = "$value", default = "Vec::new")]
    items: Vec<T>,
}

/// Encodes an entity for a request body.
///
/// # Errors
///
/// Returns [`ResourceError::Encode`] if the entity cannot be serialized.
pub fn encode<T: Serialize>(entity: &T, content_type: ContentType) -> Result<String, ResourceError> {
    match content_type {
        ContentType::Json => serde_json::to_string(entity).map_err(|e| ResourceError::Encode {
            message: e.to_string(),
        }),
        ContentType::Xml => {
            let body = quick_xml::se::to_string(entity).map_err(|e| ResourceError::Encode {
                message: e.to_string(),
            })?;
            Ok(format!("{XML_DECLARATION}{body}"))
        }
    }
}

/// Decodes a single entity from a response body.
///
/// # Errors
///
/// Returns [`ResourceError::Decode`] if the body does not hold a `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8], content_type: ContentType) -> Result<T, ResourceError> {
    let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
    match content_type {
        ContentType::Json => serde_json::from_slice(body).map_err(|e| ResourceError::Decode {
            message: e.to_string(),
        }),
        ContentType::Xml => quick_xml::de::from_reader(body).map_err(|e| ResourceError::Decode {
            message: e.to_string(),
        }),
    }
}

/// Decodes a list of entities from a response body.
///
/// JSON bodies must be arrays. XML bodies must have a root element whose
/// children are the items.
///
/// # Errors
///
/// Returns [`ResourceError::Decode`] if the body does not hold a list of `T`.
pub fn decode_list<T: DeserializeOwned>(
    body: &[u8],
    content_type: ContentType,
) -> Result<Vec<T>, ResourceError> {
    match content_type {
        ContentType::Json => decode(body, content_type),
        ContentType::Xml => decode::<XmlList<T>>(body, content_type).map(|list| list.items),
    }
}

//! Mapping of typed query objects to URL query parameters.
//!
//! A query object is a plain struct that describes its fields through a
//! static table ([`QueryObject::FIELDS`]). [`map_to_query_pairs`] walks the
//! table in declaration order and produces `(key, value)` pairs:
//!
//! - ignored fields are skipped, whatever their type
//! - a field whose type is not admissible fails the whole mapping with
//!   [`QueryError::TypeNotAllowed`]
//! - `None` and empty values are left out
//! - dates use the field's format, or `yyyy-MM-dd`
//! - everything else is rendered with its natural string form, lower-cased
//! - the key is the field's override key, or its name
//!
//! Admissible types are strings, date/times, time spans, decimals,
//! primitives (integers, floats, `bool`, `char`), enums, and `Option` of any
//! of these. Admission is decided by the [`QueryParam::KIND`] of the field's
//! type.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use restify::query::{map_to_query_pairs, FieldValue, QueryField, QueryObject};
//!
//! struct ItemQuery {
//!     name: Option<String>,
//!     since: Option<NaiveDate>,
//!     page: u32,
//!     internal: Vec<u8>,
//! }
//!
//! impl QueryObject for ItemQuery {
//!     const FIELDS: &'static [QueryField<Self>] = &[
//!         QueryField::new("name", |q: &Self| FieldValue::of(&q.name)),
//!         QueryField::new("since", |q: &Self| FieldValue::of(&q.since))
//!             .key("modified_since")
//!             .format("yyyyMMdd"),
//!         QueryField::new("page", |q: &Self| FieldValue::of(&q.page)),
//!         QueryField::new("internal", |q: &Self| FieldValue::of(&q.internal)).ignored(),
//!     ];
//! }
//!
//! let query = ItemQuery {
//!     name: Some("Widget".to_string()),
//!     since: NaiveDate::from_ymd_opt(2021, 3, 5),
//!     page: 2,
//!     internal: vec![1, 2, 3],
//! };
//!
//! let pairs = map_to_query_pairs(&query).unwrap();
//! assert_eq!(
//!     pairs,
//!     vec![
//!         ("name".to_string(), "widget".to_string()),
//!         ("modified_since".to_string(), "20210305".to_string()),
//!         ("page".to_string(), "2".to_string()),
//!     ]
//! );
//! ```
//!
//! # Enums
//!
//! Enums opt in by implementing [`QueryParam`] with [`ParamKind::ENUM`],
//! usually rendering the variant name:
//!
//! ```rust
//! use restify::query::{ParamKind, QueryParam, QueryValue};
//!
//! #[derive(Debug)]
//! enum Status {
//!     Open,
//!     Closed,
//! }
//!
//! impl QueryParam for Status {
//!     const KIND: ParamKind = ParamKind::ENUM;
//!
//!     fn to_query_value(&self) -> Option<QueryValue> {
//!         Some(QueryValue::Text(format!("{self:?}")))
//!     }
//! }
//! ```

mod format;

pub use format::{format_datetime, format_time_span, to_strftime, DEFAULT_DATE_FORMAT};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while mapping a query object.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A field's type cannot be sent as a query parameter.
    #[error("Query field '{field}' has type {type_name}, which is not allowed. Fields must be a string, date/time, time span, decimal, primitive, enum, or an Option of one of these.")]
    TypeNotAllowed {
        /// The declared field name.
        field: &'static str,
        /// The Rust type of the field.
        type_name: &'static str,
    },

    /// A field's date format could not be applied.
    #[error("Invalid date format '{format}' on query field '{field}'")]
    InvalidFormat {
        /// The declared field name.
        field: &'static str,
        /// The format that was rejected.
        format: &'static str,
    },
}

/// The admissible value categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scalar {
    /// Strings.
    String,
    /// Dates and date/times.
    DateTime,
    /// Durations.
    TimeSpan,
    /// Decimal numbers.
    Decimal,
    /// Integers, floats, `bool` and `char`.
    Primitive,
    /// User enums.
    Enum,
}

/// How a type may appear as a query field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// A plain admissible value.
    Scalar(Scalar),
    /// `Option` of an admissible value.
    Nullable(Scalar),
    /// Not admissible.
    Unsupported,
}

impl ParamKind {
    /// Kind for user enums.
    pub const ENUM: Self = Self::Scalar(Scalar::Enum);

    /// Returns the kind of `Option<T>` given the kind of `T`.
    ///
    /// Only one level of `Option` is admissible.
    #[must_use]
    pub const fn nullable(self) -> Self {
        match self {
            Self::Scalar(scalar) => Self::Nullable(scalar),
            Self::Nullable(_) | Self::Unsupported => Self::Unsupported,
        }
    }

    /// Returns `true` if the kind may be mapped.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// A value ready to be rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// Text rendered lower-cased.
    Text(String),
    /// A date/time rendered with the field's format.
    DateTime(NaiveDateTime),
}

/// A type that can appear as a query field.
pub trait QueryParam {
    /// Whether and how the type is admissible.
    const KIND: ParamKind;

    /// Returns the value to render, or `None` when absent.
    fn to_query_value(&self) -> Option<QueryValue>;
}

impl QueryParam for str {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::String);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for String {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::String);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.clone()))
    }
}

impl<T: QueryParam + ?Sized> QueryParam for &T {
    const KIND: ParamKind = T::KIND;

    fn to_query_value(&self) -> Option<QueryValue> {
        (**self).to_query_value()
    }
}

impl<T: QueryParam> QueryParam for Option<T> {
    const KIND: ParamKind = T::KIND.nullable();

    fn to_query_value(&self) -> Option<QueryValue> {
        self.as_ref().and_then(QueryParam::to_query_value)
    }
}

impl<T> QueryParam for Vec<T> {
    const KIND: ParamKind = ParamKind::Unsupported;

    fn to_query_value(&self) -> Option<QueryValue> {
        None
    }
}

impl QueryParam for Decimal {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Decimal);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for NaiveDateTime {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::DateTime);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::DateTime(*self))
    }
}

impl QueryParam for NaiveDate {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::DateTime);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::DateTime(self.and_time(NaiveTime::MIN)))
    }
}

impl<Tz: TimeZone> QueryParam for DateTime<Tz> {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::DateTime);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::DateTime(self.naive_local()))
    }
}

impl QueryParam for chrono::Duration {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::TimeSpan);

    fn to_query_value(&self) -> Option<QueryValue> {
        let seconds = self.num_seconds();
        let nanos = self.subsec_nanos();
        Some(QueryValue::Text(format_time_span(
            seconds < 0 || nanos < 0,
            seconds.unsigned_abs(),
            nanos.unsigned_abs(),
        )))
    }
}

impl QueryParam for std::time::Duration {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::TimeSpan);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(format_time_span(
            false,
            self.as_secs(),
            self.subsec_nanos(),
        )))
    }
}

impl QueryParam for bool {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for char {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for i8 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for i16 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for i32 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for i64 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for isize {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for u8 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for u16 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for u32 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for u64 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for usize {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for f32 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

impl QueryParam for f64 {
    const KIND: ParamKind = ParamKind::Scalar(Scalar::Primitive);

    fn to_query_value(&self) -> Option<QueryValue> {
        Some(QueryValue::Text(self.to_string()))
    }
}

/// A field value captured by a [`QueryField`] accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldValue {
    kind: ParamKind,
    type_name: &'static str,
    value: Option<QueryValue>,
}

impl FieldValue {
    /// Captures a field of an admissible type (or `Vec<T>`, which is rejected
    /// when mapped).
    #[must_use]
    pub fn of<T: QueryParam + ?Sized>(value: &T) -> Self {
        Self {
            kind: T::KIND,
            type_name: std::any::type_name::<T>(),
            value: value.to_query_value(),
        }
    }

    /// Captures a field of any other type. Mapping fails on it unless the
    /// field is ignored.
    #[must_use]
    pub fn unsupported<T: ?Sized>(_value: &T) -> Self {
        Self {
            kind: ParamKind::Unsupported,
            type_name: std::any::type_name::<T>(),
            value: None,
        }
    }

    /// Returns the kind of the captured type.
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        self.kind
    }
}

/// One entry of a query object's field table.
pub struct QueryField<Q> {
    name: &'static str,
    key: Option<&'static str>,
    format: Option<&'static str>,
    ignore: bool,
    value: fn(&Q) -> FieldValue,
}

impl<Q> QueryField<Q> {
    /// Declares a field by name with its accessor.
    #[must_use]
    pub const fn new(name: &'static str, value: fn(&Q) -> FieldValue) -> Self {
        Self {
            name,
            key: None,
            format: None,
            ignore: false,
            value,
        }
    }

    /// Overrides the output key (defaults to the field name).
    #[must_use]
    pub const fn key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    /// Overrides the date format (defaults to `yyyy-MM-dd`).
    #[must_use]
    pub const fn format(mut self, format: &'static str) -> Self {
        self.format = Some(format);
        self
    }

    /// Excludes the field from mapping.
    #[must_use]
    pub const fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Returns the declared field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<Q> std::fmt::Debug for QueryField<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryField")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("format", &self.format)
            .field("ignore", &self.ignore)
            .finish_non_exhaustive()
    }
}

/// A struct whose fields map to URL query parameters.
pub trait QueryObject: Sized + 'static {
    /// The fields, in declaration order.
    const FIELDS: &'static [QueryField<Self>];
}

/// Maps a query object to ordered `(key, value)` pairs.
///
/// # Errors
///
/// Returns [`QueryError::TypeNotAllowed`] for a non-ignored field of an
/// inadmissible type, or [`QueryError::InvalidFormat`] when a date format
/// cannot be applied.
pub fn map_to_query_pairs<Q: QueryObject>(query: &Q) -> Result<Vec<(String, String)>, QueryError> {
    let mut pairs = Vec::new();

    for field in Q::FIELDS {
        if field.ignore {
            continue;
        }

        let captured = (field.value)(query);
        if !captured.kind.is_allowed() {
            return Err(QueryError::TypeNotAllowed {
                field: field.name,
                type_name: captured.type_name,
            });
        }

        let rendered = match captured.value {
            None => continue,
            Some(QueryValue::Text(text)) => text.to_lowercase(),
            Some(QueryValue::DateTime(value)) => {
                let format = field.format.unwrap_or(DEFAULT_DATE_FORMAT);
                format_datetime(&value, format).ok_or(QueryError::InvalidFormat {
                    field: field.name,
                    format,
                })?
            }
        };
        if rendered.is_empty() {
            continue;
        }

        pairs.push((field.key.unwrap_or(field.name).to_string(), rendered));
    }

    Ok(pairs)
}

/// Maps a query object to a non-encoded `k=v&k=v` string.
///
/// # Errors
///
/// Fails like [`map_to_query_pairs`].
pub fn to_query_string<Q: QueryObject>(query: &Q) -> Result<String, QueryError> {
    Ok(map_to_query_pairs(query)?
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_kind_nullable_allows_one_level() {
        assert_eq!(
            <Option<u32> as QueryParam>::KIND,
            ParamKind::Nullable(Scalar::Primitive)
        );
        assert_eq!(
            <Option<Option<u32>> as QueryParam>::KIND,
            ParamKind::Unsupported
        );
        assert_eq!(<Option<Vec<u32>> as QueryParam>::KIND, ParamKind::Unsupported);
    }

    #[test]
    fn test_kinds_of_builtin_types() {
        assert_eq!(<String as QueryParam>::KIND, ParamKind::Scalar(Scalar::String));
        assert_eq!(<&str as QueryParam>::KIND, ParamKind::Scalar(Scalar::String));
        assert_eq!(<Decimal as QueryParam>::KIND, ParamKind::Scalar(Scalar::Decimal));
        assert_eq!(<NaiveDate as QueryParam>::KIND, ParamKind::Scalar(Scalar::DateTime));
        assert_eq!(
            <DateTime<chrono::Utc> as QueryParam>::KIND,
            ParamKind::Scalar(Scalar::DateTime)
        );
        assert_eq!(
            <std::time::Duration as QueryParam>::KIND,
            ParamKind::Scalar(Scalar::TimeSpan)
        );
        assert_eq!(<char as QueryParam>::KIND, ParamKind::Scalar(Scalar::Primitive));
    }

    #[test]
    fn test_field_value_captures_type_name() {
        let captured = FieldValue::of(&vec![1_u8]);
        assert_eq!(captured.kind(), ParamKind::Unsupported);
        assert!(captured.type_name.contains("Vec<u8>"));

        let captured = FieldValue::unsupported(&std::collections::HashMap::<u8, u8>::new());
        assert_eq!(captured.kind(), ParamKind::Unsupported);
        assert!(captured.type_name.contains("HashMap"));
    }

    #[test]
    fn test_chrono_duration_renders_as_time_span() {
        let value = chrono::Duration::milliseconds(-90_061_500).to_query_value();
        assert_eq!(
            value,
            Some(QueryValue::Text("-1.01:01:01.5000000".to_string()))
        );
    }

    #[test]
    fn test_decimal_keeps_scale() {
        let value: Decimal = "1.50".parse().unwrap();
        assert_eq!(
            value.to_query_value(),
            Some(QueryValue::Text("1.50".to_string()))
        );
    }

    #[test]
    fn test_query_field_debug_omits_accessor() {
        struct Empty;
        let field = QueryField::<Empty>::new("name", |_| FieldValue::of("x"))
            .key("n")
            .ignored();
        let debug = format!("{field:?}");
        assert!(debug.contains("\"name\""));
        assert!(debug.contains("ignore: true"));
    }
}

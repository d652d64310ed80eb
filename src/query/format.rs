//! Rendering of date/time and time-span query values.
//!
//! Date formats are accepted in two dialects. A format containing `%` is a
//! chrono `strftime` pattern and is used as is. Anything else is read as a
//! .NET-style custom pattern and translated token by token:
//!
//! | Token | Meaning | chrono |
//! |---|---|---|
//! | `yyyy` / `yy` | year | `%Y` / `%y` |
//! | `MMMM` / `MMM` / `MM` | month name / abbreviation / number | `%B` / `%b` / `%m` |
//! | `dddd` / `ddd` / `dd` | weekday name / abbreviation / day | `%A` / `%a` / `%d` |
//! | `HH` / `hh` | 24h / 12h hour | `%H` / `%I` |
//! | `mm` / `ss` | minute / second | `%M` / `%S` |
//! | `ffffff` / `fff` | micro / milliseconds | `%6f` / `%3f` |
//! | `tt` | AM/PM | `%p` |
//! | `zzz` | UTC offset | `%:z` |
//!
//! Text in single quotes is copied literally.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;

/// Format used for dates when a field has no override.
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-MM-dd";

const DOTNET_TOKENS: &[(&str, &str)] = &[
    ("yyyy", "%Y"),
    ("yy", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("dd", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("ffffff", "%6f"),
    ("fff", "%3f"),
    ("tt", "%p"),
    ("zzz", "%:z"),
];

/// Translates a format into chrono `strftime` syntax.
///
/// # Example
///
/// ```rust
/// use restify::query::to_strftime;
///
/// assert_eq!(to_strftime("yyyyMMdd"), "%Y%m%d");
/// assert_eq!(to_strftime("yyyy-MM-dd'T'HH:mm"), "%Y-%m-%dT%H:%M");
/// assert_eq!(to_strftime("%d/%m/%Y"), "%d/%m/%Y");
/// ```
#[must_use]
pub fn to_strftime(format: &str) -> String {
    if format.contains('%') {
        return format.to_string();
    }

    let mut out = String::with_capacity(format.len() * 2);
    let mut rest = format;
    while let Some(c) = rest.chars().next() {
        if c == '\'' {
            let literal = &rest[1..];
            let end = literal.find('\'').unwrap_or(literal.len());
            out.push_str(&literal[..end]);
            rest = literal.get(end + 1..).unwrap_or_default();
            continue;
        }

        if let Some((token, replacement)) = DOTNET_TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
        {
            out.push_str(replacement);
            rest = &rest[token.len()..];
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// Formats a date/time with a .NET-style or `strftime` format.
///
/// Returns `None` if the format is invalid or asks for information a naive
/// date/time does not have (such as a time zone).
#[must_use]
pub fn format_datetime(value: &NaiveDateTime, format: &str) -> Option<String> {
    let pattern = to_strftime(format);
    let items: Vec<Item<'_>> = StrftimeItems::new(&pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }

    let mut out = String::new();
    write!(out, "{}", value.format_with_items(items.iter())).ok()?;
    Some(out)
}

/// Renders a time span as `[-][d.]hh:mm:ss[.fffffff]`.
///
/// The fractional part is in 100-nanosecond ticks and only appears when
/// non-zero.
///
/// ```rust
/// use restify::query::format_time_span;
///
/// assert_eq!(format_time_span(false, 3_723, 0), "01:02:03");
/// assert_eq!(format_time_span(true, 90_061, 500_000_000), "-1.01:01:01.5000000");
/// ```
#[must_use]
pub fn format_time_span(negative: bool, seconds: u64, nanos: u32) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    let ticks = nanos / 100;

    let mut out = String::new();
    if negative && (seconds > 0 || ticks > 0) {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&format!("{days}."));
    }
    out.push_str(&format!("{hours:02}:{minutes:02}:{secs:02}"));
    if ticks > 0 {
        out.push_str(&format!(".{ticks:07}"));
    }
    out
}

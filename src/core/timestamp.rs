//! Timestamp layouts used by time formatters
//!
//! Provides the layouts a time attribute can be rendered with. Supports
//! RFC 3339, ISO 8601, Unix timestamps, custom strftime patterns and Go
//! reference layouts (translated to strftime).

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// Go reference-time tokens and their strftime equivalents, longest first
const GO_TOKENS: &[(&str, &str)] = &[
    (".000000000", "%.9f"),
    (".999999999", "%.9f"),
    (".000000", "%.6f"),
    (".999999", "%.6f"),
    ("January", "%B"),
    ("Monday", "%A"),
    ("Z07:00", "%:z"),
    ("-07:00", "%:z"),
    ("Z0700", "%z"),
    ("-0700", "%z"),
    (".000", "%.3f"),
    (".999", "%.3f"),
    ("2006", "%Y"),
    ("Jan", "%b"),
    ("Mon", "%a"),
    ("MST", "%Z"),
    ("01", "%m"),
    ("02", "%d"),
    ("_2", "%e"),
    ("15", "%H"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("PM", "%p"),
    ("pm", "%P"),
];

/// Layout a time attribute is rendered with
///
/// Configuration strings map onto layouts through [`FromStr`]: well-known
/// names (`RFC3339`, `RFC3339Nano`, `ISO8601`, `Unix`, `UnixMilli`), a
/// strftime pattern (anything containing `%`), or a Go reference layout such
/// as `2006-01-02 15:04:05`. Patterns are checked when parsed; one that
/// chrono cannot render, or that contains no date or time field, is an
/// [`LoggerError::InvalidConfiguration`].
///
/// # Examples
///
/// ```
/// use rust_structured_logger::core::TimeLayout;
/// use chrono::{TimeZone, Utc};
///
/// let time = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap().fixed_offset();
/// let layout: TimeLayout = "RFC3339".parse().unwrap();
/// assert_eq!(layout.format(&time).unwrap(), "2025-01-08T10:30:45Z");
///
/// let custom: TimeLayout = "%Y/%m/%d".parse().unwrap();
/// assert_eq!(custom.format(&time).unwrap(), "2025/01/08");
///
/// let go: TimeLayout = "2006-01-02 15:04:05".parse().unwrap();
/// assert_eq!(go.format(&time).unwrap(), "2025-01-08 10:30:45");
///
/// assert!("%Q".parse::<TimeLayout>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeLayout {
    /// RFC 3339 with whole seconds: `2025-01-08T10:30:45Z`
    Rfc3339,

    /// RFC 3339 with nanoseconds: `2025-01-08T10:30:45.123456789Z`
    Rfc3339Nano,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123+00:00`
    Iso8601,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimeLayout {
    /// Render `datetime` in its own offset according to this layout
    ///
    /// Returns `None` if a custom pattern cannot be rendered.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<FixedOffset>) -> Option<String> {
        let rendered = match self {
            TimeLayout::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimeLayout::Rfc3339Nano => datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            TimeLayout::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimeLayout::Unix => datetime.timestamp().to_string(),
            TimeLayout::UnixMillis => datetime.timestamp_millis().to_string(),
            TimeLayout::Custom(format_str) => {
                let mut out = String::new();
                write!(out, "{}", datetime.format(format_str)).ok()?;
                out
            }
        };
        Some(rendered)
    }

    /// Parse a configured layout, treating an empty string as "no layout"
    pub fn parse_optional(s: &str) -> Result<Option<Self>> {
        if s.trim().is_empty() {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }

    /// Check that `pattern` renders and contains at least one field
    fn validate_strftime(pattern: &str) -> Result<()> {
        let mut has_field = false;
        for item in StrftimeItems::new(pattern) {
            match item {
                Item::Error => {
                    return Err(LoggerError::config(
                        "TimeFormat",
                        format!("unsupported strftime pattern '{}'", pattern),
                    ))
                }
                Item::Numeric(..) | Item::Fixed(..) => has_field = true,
                _ => {}
            }
        }
        if has_field {
            Ok(())
        } else {
            Err(LoggerError::config(
                "TimeFormat",
                format!("layout '{}' contains no date or time field", pattern),
            ))
        }
    }
}

/// Translate a Go reference layout into a strftime pattern
fn go_layout_to_strftime(layout: &str) -> String {
    let mut out = String::with_capacity(layout.len() * 2);
    let mut rest = layout;
    'scan: while let Some(c) = rest.chars().next() {
        for (token, directive) in GO_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(directive);
                rest = tail;
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

impl FromStr for TimeLayout {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        let layout = match s.trim().to_ascii_uppercase().as_str() {
            "RFC3339" | "2006-01-02T15:04:05Z07:00" => TimeLayout::Rfc3339,
            "RFC3339NANO" | "2006-01-02T15:04:05.999999999Z07:00" => TimeLayout::Rfc3339Nano,
            "ISO8601" => TimeLayout::Iso8601,
            "UNIX" => TimeLayout::Unix,
            "UNIXMILLI" | "UNIXMILLIS" => TimeLayout::UnixMillis,
            _ => {
                let pattern = if s.contains('%') {
                    s.to_string()
                } else {
                    go_layout_to_strftime(s)
                };
                Self::validate_strftime(&pattern)?;
                TimeLayout::Custom(pattern)
            }
        };
        Ok(layout)
    }
}

impl fmt::Display for TimeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeLayout::Rfc3339 => write!(f, "RFC3339"),
            TimeLayout::Rfc3339Nano => write!(f, "RFC3339Nano"),
            TimeLayout::Iso8601 => write!(f, "ISO8601"),
            TimeLayout::Unix => write!(f, "Unix"),
            TimeLayout::UnixMillis => write!(f, "UnixMilli"),
            TimeLayout::Custom(format_str) => write!(f, "{}", format_str),
        }
    }
}

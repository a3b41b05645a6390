//! Value decoding for iCalendar properties (RFC 5545 §3.3).
//!
//! Only TEXT values are unescaped; every other value type is passed through
//! verbatim so that e.g. an RRULE keeps its `;` and `,` separators.

use super::options::ParseOptions;
use crate::rfc::ical::core::{ContentLine, Value};

/// Value data types (RFC 5545 §3.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
    Unknown,
}

impl ValueType {
    /// Parses a `VALUE=` parameter (case-insensitive).
    #[must_use]
    pub fn from_param(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "BINARY" => Self::Binary,
            "BOOLEAN" => Self::Boolean,
            "CAL-ADDRESS" => Self::CalAddress,
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "PERIOD" => Self::Period,
            "RECUR" => Self::Recur,
            "TEXT" => Self::Text,
            "TIME" => Self::Time,
            "URI" => Self::Uri,
            "UTC-OFFSET" => Self::UtcOffset,
            _ => Self::Unknown,
        }
    }

    /// Returns the default value type of a property.
    ///
    /// Unrecognized names, including `X-` properties, default to TEXT.
    #[must_use]
    pub fn default_for(name: &str) -> Self {
        match name {
            "DTSTART" | "DTEND" | "DTSTAMP" | "CREATED" | "LAST-MODIFIED" | "COMPLETED" | "DUE"
            | "RECURRENCE-ID" | "EXDATE" | "RDATE" => Self::DateTime,
            "DURATION" | "TRIGGER" => Self::Duration,
            "PERCENT-COMPLETE" | "PRIORITY" | "REPEAT" | "SEQUENCE" => Self::Integer,
            "RRULE" | "EXRULE" => Self::Recur,
            "TZOFFSETFROM" | "TZOFFSETTO" => Self::UtcOffset,
            "URL" | "TZURL" | "SOURCE" | "ATTACH" => Self::Uri,
            "FREEBUSY" => Self::Period,
            "ATTENDEE" | "ORGANIZER" => Self::CalAddress,
            "GEO" => Self::Float,
            _ => Self::Text,
        }
    }

    /// Resolves the value type of a content line: an explicit `VALUE=`
    /// parameter wins over the property default.
    #[must_use]
    pub fn of(cl: &ContentLine) -> Self {
        cl.value_type()
            .map_or_else(|| Self::default_for(&cl.name), Self::from_param)
    }

    /// Returns whether TEXT escaping rules apply.
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Decodes the value of a content line.
///
/// Properties on the multi-valued allow-list are split on unescaped commas
/// first, then each item is unescaped. Everything else yields a single value.
#[must_use]
pub fn decode_value(cl: &ContentLine, options: &ParseOptions) -> Value {
    let value_type = ValueType::of(cl);
    let decode = |raw: &str| {
        if value_type.is_text() {
            unescape_text(raw)
        } else {
            raw.to_string()
        }
    };

    if options.is_multi_valued(&cl.name) {
        if cl.raw_value.is_empty() {
            return Value::List(Vec::new());
        }
        Value::List(split_list(&cl.raw_value).into_iter().map(decode).collect())
    } else {
        Value::Text(decode(&cl.raw_value))
    }
}

/// Splits a raw value on commas that are not backslash-escaped.
///
/// A comma preceded by an odd number of backslashes is part of the item.
/// Escapes are left in place for [`unescape_text`].
#[must_use]
pub fn split_list(raw: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in raw.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ',' {
            items.push(&raw[start..i]);
            start = i + 1;
        }
    }
    items.push(&raw[start..]);

    items
}

/// Unescapes a TEXT value (RFC 5545 §3.3.11).
///
/// `\\`, `\;`, `\,`, `\n` and `\N` are decoded; any other backslash sequence
/// is kept verbatim.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    // Invalid escape, preserve as-is
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

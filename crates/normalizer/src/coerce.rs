//! Field-level coercions for raw issue payloads.
//!
//! Each function is total over `serde_json::Value` and reports why a value
//! could not be used. Callers fold the failure into `None` (or the number
//! sentinel) with [`or_null`], so one bad field never costs the record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

use crate::models::State;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoercionFailure {
    #[error("value is missing")]
    Missing,
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("unrecognized date {0:?}")]
    BadDate(String),
    #[error("not an integer: {0:?}")]
    BadNumber(String),
    #[error("unrecognized state {0:?}")]
    BadState(String),
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
];

const ZONE_NAMES: &[&str] = &["UTC", "GMT"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%d %H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub fn coerce_string(value: &Value) -> Result<String, CoercionFailure> {
    match value {
        Value::Null => Err(CoercionFailure::Missing),
        Value::String(s) => Ok(s.clone()),
        other => Err(CoercionFailure::WrongType {
            expected: "string",
            found: value_kind(other),
        }),
    }
}

/// Integer identifiers arrive as numbers or numeric strings.
pub fn coerce_number(value: &Value) -> Result<i64, CoercionFailure> {
    match value {
        Value::Null => Err(CoercionFailure::Missing),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.is_finite() => Ok(f.trunc() as i64),
                _ => Err(CoercionFailure::BadNumber(n.to_string())),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| CoercionFailure::BadNumber(s.clone())),
        other => Err(CoercionFailure::WrongType {
            expected: "integer",
            found: value_kind(other),
        }),
    }
}

pub fn coerce_date(value: &Value) -> Result<DateTime<Utc>, CoercionFailure> {
    match value {
        Value::Null => Err(CoercionFailure::Missing),
        Value::String(s) => parse_date(s),
        other => Err(CoercionFailure::WrongType {
            expected: "date string",
            found: value_kind(other),
        }),
    }
}

/// Permissive timestamp parser. Offsets are converted to UTC; timestamps
/// without an offset are taken as UTC; bare dates resolve to midnight.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, CoercionFailure> {
    let s = input.trim();
    if s.is_empty() {
        return Err(CoercionFailure::Missing);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    let s = strip_zone_name(s);
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }
    }

    Err(CoercionFailure::BadDate(s.to_string()))
}

/// Drops a trailing `UTC`/`GMT` token; both mean a zero offset.
fn strip_zone_name(s: &str) -> &str {
    let bytes = s.as_bytes();
    for zone in ZONE_NAMES {
        let cut = bytes.len().saturating_sub(zone.len());
        // the matched tail is ASCII, so `cut` is a char boundary
        if cut > 0 && bytes[cut..].eq_ignore_ascii_case(zone.as_bytes()) {
            return s[..cut].trim_end();
        }
    }
    s
}

/// Only the exact spellings `open` and `closed` are recognized.
pub fn coerce_state(value: &Value) -> Result<State, CoercionFailure> {
    match value {
        Value::Null => Err(CoercionFailure::Missing),
        Value::String(s) => match s.as_str() {
            "open" => Ok(State::Open),
            "closed" => Ok(State::Closed),
            _ => Err(CoercionFailure::BadState(s.clone())),
        },
        other => Err(CoercionFailure::WrongType {
            expected: "state string",
            found: value_kind(other),
        }),
    }
}

/// Arrays of strings; non-string elements are skipped.
pub fn coerce_string_list(value: &Value) -> Result<Vec<String>, CoercionFailure> {
    match value {
        Value::Null => Err(CoercionFailure::Missing),
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_owned))
            .collect()),
        other => Err(CoercionFailure::WrongType {
            expected: "array",
            found: value_kind(other),
        }),
    }
}

/// Folds a coercion result into an optional value. Missing fields are
/// expected and stay quiet; anything else is logged at debug.
pub fn or_null<T>(field: &'static str, result: Result<T, CoercionFailure>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(CoercionFailure::Missing) => None,
        Err(err) => {
            debug!(field, error = %err, "field coerced to null");
            None
        }
    }
}

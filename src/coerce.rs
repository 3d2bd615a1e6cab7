//! Defensive scalar coercion.
//!
//! Invoice batches arrive with OCR'd or hand-keyed fields: ids like `"1O0"`,
//! prices stored as strings, dates in whatever format the upstream system
//! produced. These helpers convert an untyped scalar into a typed value with
//! a documented fallback instead of an error channel:
//!
//! - [`safe_int`] returns `None` for unusable values; the caller uses that
//!   sentinel to exclude the record or item entirely
//! - [`safe_int_or_zero`] substitutes `0`, for call sites where garbage
//!   numeric data should participate in arithmetic as zero
//! - [`parse_timestamp`] returns `None` as the missing-timestamp marker
//!
//! All three are pure; they never fail the caller.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value as Json;

/// Datetime formats tried in order for textual timestamps. `%.f` also
/// matches the no-fraction case.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Date-only formats; parsed values land at midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Coerce an untyped scalar into an integer, returning `None` when the value
/// is unusable.
///
/// Textual values are trimmed and OCR-normalized first: the letters `O` and
/// `o` visually resemble the digit zero and are replaced with `0` before
/// parsing, so `"1O0"` and `"1o0"` both coerce to `100`. JSON integers pass
/// through, finite floats truncate toward zero, and booleans map to `0`/`1`.
/// Everything else (absent, null, arrays, objects, non-numeric text) is
/// unusable.
pub fn safe_int(value: Option<&Json>) -> Option<i64> {
    match value? {
        Json::Number(n) => {
            if let Some(v) = n.as_i64() {
                Some(v)
            } else {
                let f = n.as_f64()?;
                (f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64)
                    .then(|| f.trunc() as i64)
            }
        }
        Json::Bool(b) => Some(i64::from(*b)),
        Json::String(s) => s.trim().replace(['O', 'o'], "0").parse::<i64>().ok(),
        _ => None,
    }
}

/// [`safe_int`] with the arithmetic default: unusable values become `0`.
pub fn safe_int_or_zero(value: Option<&Json>) -> i64 {
    safe_int(value).unwrap_or(0)
}

/// Permissively parse an untyped scalar into a timestamp, returning `None`
/// (the missing-timestamp marker) on any failure.
///
/// Strings are tried as RFC 3339, then against [`DATETIME_FORMATS`] and
/// [`DATE_FORMATS`]; integer numbers are treated as Unix epoch seconds.
pub fn parse_timestamp(value: Option<&Json>) -> Option<NaiveDateTime> {
    match value? {
        Json::String(s) => parse_timestamp_str(s.trim()),
        Json::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

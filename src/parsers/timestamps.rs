//! Timestamp coercion for heterogeneous `created_at`-style fields.
//!
//! Values are tried against a fixed list of layouts, then as epoch seconds, then as RFC 3339.
//! Anything still unparseable is kept verbatim rather than rejected.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use super::fields::value_to_string;

/// Layout of every timestamp this crate writes
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalize a raw timestamp value into `YYYY-MM-DDTHH:MM:SS` (UTC)
///
/// Returns `None` only for absent or null input. Unparseable values come back unchanged.
pub fn coerce_timestamp(value: Option<&Value>) -> Option<String> {
    let raw = match value {
        None | Some(Value::Null) => return None,
        Some(v) => value_to_string(v),
    };

    Some(parse_timestamp(&raw).map(|dt| format_canonical(&dt)).unwrap_or(raw))
}

/// Parse any supported timestamp representation into a naive UTC datetime
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }

    if let Some(dt) = parse_epoch_seconds(raw) {
        return Some(dt);
    }

    DateTime::parse_from_rfc3339(raw.trim()).ok().map(|dt| dt.with_timezone(&Utc).naive_utc())
}

/// Epoch seconds, fractional part truncated
fn parse_epoch_seconds(raw: &str) -> Option<NaiveDateTime> {
    let secs = raw.trim().parse::<f64>().ok().filter(|s| s.is_finite())?;
    DateTime::from_timestamp(secs.trunc() as i64, 0).map(|dt| dt.naive_utc())
}

pub fn format_canonical(dt: &NaiveDateTime) -> String {
    dt.format(CANONICAL_FORMAT).to_string()
}

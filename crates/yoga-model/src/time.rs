use chrono::{DateTime, NaiveDate, Utc};

use crate::validation::ValidationError;

/// Storage and wire format for every timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub fn now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn format(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a session date. Accepts RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC)
/// and returns it in [`TIMESTAMP_FORMAT`].
pub fn parse_session_date(raw: &str) -> Result<String, ValidationError> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(format(ts.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| format(dt.and_utc()))
        .ok_or_else(|| ValidationError::new("date", "must be a valid date"))
}

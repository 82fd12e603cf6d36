//! Release timestamps used for "latest production" tracking.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use gvdb_catalog::types::Production;

/// Parse a stored date or datetime into epoch milliseconds (UTC).
///
/// Accepts `YYYY-MM-DD`, RFC 3339, and naive `YYYY-MM-DD[T ]HH:MM:SS[.f]`.
pub fn parse_millis(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Recency of a production: its release date, else its last update, else
/// the epoch. `None` when the chosen value does not parse.
pub fn production_millis(production: &Production) -> Option<i64> {
    let chosen = [&production.release_date, &production.updated_at]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty());
    match chosen {
        Some(value) => parse_millis(value),
        None => Some(0),
    }
}

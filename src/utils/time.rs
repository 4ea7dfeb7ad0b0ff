//! Clock instant parsing and display formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

/// Parse a clock instant for a given shift date. Accepts a bare `HH:MM`
/// (interpreted on the shift date, UTC) or a full RFC3339 timestamp.
pub fn parse_instant(date: NaiveDate, s: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M") {
        return Utc
            .from_local_datetime(&date.and_time(t))
            .single()
            .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

pub fn parse_optional_instant(date: NaiveDate, s: Option<&String>) -> AppResult<Option<DateTime<Utc>>> {
    match s {
        Some(raw) => Ok(Some(parse_instant(date, raw)?)),
        None => Ok(None),
    }
}

/// Parse a bare `HH:MM` wall-clock time.
pub fn parse_clock(s: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// `HH:MM` rendering of a clock instant, `-` for a missing one.
pub fn format_clock(instant: Option<DateTime<Utc>>) -> String {
    match instant {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Two-decimal hour rendering, the only place totals are rounded.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}")
}

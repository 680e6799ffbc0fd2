// src/core/clock.rs

//! Timestamp helpers shared by the parameter and token stores.
//!
//! Timestamps are stored as strings in the JSON files. Writing always uses
//! [`TIMESTAMP_FORMAT`] (microsecond precision, explicit `+0000` offset). Reading is
//! permissive: it also accepts RFC 3339 and the older `...UTC` suffix.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

/// The format used for every timestamp this crate writes.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f+0000";

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unrecognized timestamp '{0}'.")]
pub struct TimestampError(pub String);

/// Current time in UTC.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn time_to_str(t: &DateTime<Utc>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored timestamp into UTC.
pub fn str_to_time(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    let trimmed = s.trim();

    if let Ok(t) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(t.with_timezone(&Utc));
    }
    if let Some(naive_part) = trimmed.strip_suffix("UTC").or_else(|| trimmed.strip_suffix('Z'))
        && let Ok(naive) = NaiveDateTime::parse_from_str(naive_part, "%Y-%m-%dT%H:%M:%S%.f")
    {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    Err(TimestampError(s.to_string()))
}

/// Parses a stored timestamp into whole seconds since the Unix epoch.
pub fn str_to_timestamp(s: &str) -> Result<i64, TimestampError> {
    str_to_time(s).map(|t| t.timestamp())
}

/// Converts seconds since the Unix epoch into a UTC time. Out-of-range input yields `None`.
pub fn timestamp_to_time(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

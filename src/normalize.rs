//! Turns feed timestamps into UTC instants.
//!
//! Strings carrying an offset are converted directly. Offset-less strings are
//! read as wall-clock time in a fallback zone, DST-aware. The grouping code
//! only ever sees the resulting UTC instants.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::TimeParseError;

const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalize a feed timestamp to UTC, reading offset-less values in `zone`.
pub fn normalize_time(raw: &str, zone: Tz) -> Result<DateTime<Utc>, TimeParseError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(TimeParseError::Format(raw.to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for pat in OFFSET_FORMATS.iter() {
        if let Ok(dt) = DateTime::parse_from_str(s, pat) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    // A trailing Z without seconds slips past the RFC 3339 parser.
    if let Some(utc) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        if let Some(naive) = parse_naive(utc) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    let naive = parse_naive(s).ok_or_else(|| TimeParseError::Format(raw.to_string()))?;
    localize(naive, zone)
}

/// Resolve a wall-clock time in `zone` to UTC.
///
/// Ambiguous times (clocks going back) take the standard-time reading, i.e. the
/// later instant. Times inside a spring-forward gap are rejected.
pub fn localize(naive: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>, TimeParseError> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(a, b) => Ok(a.max(b).with_timezone(&Utc)),
        LocalResult::None => Err(TimeParseError::Nonexistent(naive.to_string(), zone.name().to_string())),
    }
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    for pat in NAIVE_FORMATS.iter() {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pat) {
            return Some(dt);
        }
    }
    // Date only: local midnight
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)
}

use chrono::{TimeZone, Utc};
use chrono_tz::Europe::Berlin;

use venue_match_lambda_rust::error::TimeParseError;
use venue_match_lambda_rust::normalize::normalize_time;

#[test]
fn keeps_explicit_offsets() {
    let expected = Utc.with_ymd_and_hms(2025, 8, 30, 14, 0, 0).unwrap();
    assert_eq!(normalize_time("2025-08-30T14:00:00Z", Berlin), Ok(expected));
    assert_eq!(normalize_time("2025-08-30T16:00:00+02:00", Berlin), Ok(expected));
    assert_eq!(normalize_time("2025-08-30T09:00:00-05:00", Berlin), Ok(expected));
    assert_eq!(normalize_time("2025-08-30T14:00Z", Berlin), Ok(expected));
}

#[test]
fn reads_offsetless_times_in_fallback_zone() {
    // Summer time, UTC+2
    assert_eq!(
        normalize_time("2025-08-30T16:00:00", Berlin),
        Ok(Utc.with_ymd_and_hms(2025, 8, 30, 14, 0, 0).unwrap())
    );
    // Winter time, UTC+1
    assert_eq!(
        normalize_time("2025-01-15 16:00", Berlin),
        Ok(Utc.with_ymd_and_hms(2025, 1, 15, 15, 0, 0).unwrap())
    );
    assert_eq!(
        normalize_time("  2025-08-30T16:00:00.500  ", Berlin),
        Ok(Utc.with_ymd_and_hms(2025, 8, 30, 14, 0, 0).unwrap() + chrono::Duration::milliseconds(500))
    );
}

#[test]
fn date_only_is_local_midnight() {
    assert_eq!(
        normalize_time("2025-08-30", Berlin),
        Ok(Utc.with_ymd_and_hms(2025, 8, 29, 22, 0, 0).unwrap())
    );
}

#[test]
fn ambiguous_local_time_takes_standard_time() {
    // Clocks go back at 03:00 CEST on 2025-10-26; 02:30 happens twice
    assert_eq!(
        normalize_time("2025-10-26T02:30:00", Berlin),
        Ok(Utc.with_ymd_and_hms(2025, 10, 26, 1, 30, 0).unwrap())
    );
}

#[test]
fn rejects_time_inside_dst_gap() {
    let result = normalize_time("2025-03-30T02:30:00", Berlin);
    assert!(matches!(result, Err(TimeParseError::Nonexistent(_, ref zone)) if zone == "Europe/Berlin"), "got {:?}", result);
}

#[test]
fn rejects_unreadable_strings() {
    for raw in ["", "   ", "Anstoß folgt", "30.08.2025 16:00", "2025-13-01"] {
        assert!(
            matches!(normalize_time(raw, Berlin), Err(TimeParseError::Format(_))),
            "expected format error for {:?}",
            raw
        );
    }
}

#[test]
fn utc_fallback_zone_reads_offsetless_as_utc() {
    assert_eq!(
        normalize_time("2025-08-30T16:00:00", chrono_tz::UTC),
        Ok(Utc.with_ymd_and_hms(2025, 8, 30, 16, 0, 0).unwrap())
    );
}

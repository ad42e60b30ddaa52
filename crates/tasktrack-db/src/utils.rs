//! Shared utility functions

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Parse a datetime string (RFC3339 format) or return current time
///
/// Rows are only ever written through [`format_timestamp`], so the fallback
/// is reached only when the table was edited by hand.
pub fn parse_datetime_or_now(s: &str) -> DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| {
            tracing::warn!("Unparsable timestamp in database: {}", s);
            Utc::now()
        })
}

/// Current time truncated to the precision kept in the database
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp for storage
///
/// Always emits microseconds and a `Z` suffix so that the stored strings
/// have a fixed width and sort lexically in chronological order.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(500);

        let a = format_timestamp(&whole);
        let b = format_timestamp(&fractional);

        assert_eq!(a, "2024-01-01T12:00:00.000000Z");
        assert_eq!(b, "2024-01-01T12:00:00.500000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn test_parse_datetime_or_now() {
        let valid_time = "2024-01-01T12:00:00.000000Z";
        let parsed = parse_datetime_or_now(valid_time);
        assert_eq!(parsed.to_rfc3339(), "2024-01-01T12:00:00+00:00");

        // Invalid time should return current time (just check it doesn't panic)
        let now_before = Utc::now();
        let parsed = parse_datetime_or_now("invalid");
        let now_after = Utc::now();
        assert!(parsed >= now_before && parsed <= now_after);
    }

    #[test]
    fn test_round_trip_through_storage_format() {
        let now = now_micros();
        assert_eq!(parse_datetime_or_now(&format_timestamp(&now)), now);
    }
}

//! Timestamp axes for national series.
//!
//! The core works in bare time indices; these helpers produce the matching
//! UTC timestamps so a series can be labelled when written out or joined
//! against observed records.

use chrono::{DateTime, Duration, Utc};

/// Hourly timestamps starting at `start`, one per time step
pub fn hourly_timestamps(start: DateTime<Utc>, len: usize) -> Vec<DateTime<Utc>> {
    (0..len).map(|i| start + Duration::hours(i as i64)).collect()
}

/// Daily timestamps starting at `start`, one per time step
pub fn daily_timestamps(start: DateTime<Utc>, len: usize) -> Vec<DateTime<Utc>> {
    (0..len).map(|i| start + Duration::days(i as i64)).collect()
}

/// Daily axis matching an hourly field after the hourly→daily reduction:
/// one timestamp per complete 24-hour block. Returns `None` when the
/// hourly length is not a whole number of days, mirroring the reduction's
/// shape check.
pub fn daily_axis_from_hourly(
    start: DateTime<Utc>,
    hourly_len: usize,
    hours_per_day: usize,
) -> Option<Vec<DateTime<Utc>>> {
    if hours_per_day == 0 || hourly_len % hours_per_day != 0 {
        return None;
    }
    Some(daily_timestamps(start, hourly_len / hours_per_day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_hourly_axis() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let axis = hourly_timestamps(start, 48);
        assert_eq!(axis.len(), 48);
        assert_eq!(axis[0], start);
        assert_eq!(axis[24], Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_daily_axis_from_hourly() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let axis = daily_axis_from_hourly(start, 72, 24).unwrap();
        assert_eq!(axis.len(), 3);
        assert_eq!(axis[2], Utc.with_ymd_and_hms(2020, 1, 3, 0, 0, 0).unwrap());

        assert!(daily_axis_from_hourly(start, 70, 24).is_none());
    }
}

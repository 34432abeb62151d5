//! Julian-date arithmetic and the sampled time grid.
//!
//! Pulled out of the screening components so they stay independently
//! testable, matching the source's free-standing `dateconv.go` helpers.

use chrono::{DateTime, Utc};

/// Offset between the Julian date epoch and the SGP4 "days since 1950" epoch.
pub const UTC50_EPOCH_OFFSET: f64 = 2_433_281.5;

/// Offset between the Julian date epoch and the Unix epoch (1970-01-01).
const UNIX_EPOCH_OFFSET: f64 = 2_440_587.5;

/// Build a Julian date from calendar fields (UTC), matching the source's
/// `createJulianDate`.
pub fn julian_date(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> f64 {
    let y = year as f64;
    let m = month as f64;
    367.0 * y - (7.0 * (y + ((m + 9.0) / 12.0).floor()) * 0.25).floor()
        + (275.0 * m / 9.0).floor()
        + day as f64
        + 1_721_013.5
        + ((second as f64 / 60.0 + minute as f64) / 60.0 + hour as f64) / 24.0
}

/// Shift a Julian date by a signed number of seconds.
pub fn add_seconds(julian_date: f64, seconds: f64) -> f64 {
    julian_date + seconds / 86_400.0
}

/// Signed difference between two Julian dates, in seconds (`j2 - j1`).
pub fn difference_seconds(j1: f64, j2: f64) -> f64 {
    (j2 - j1) * 86_400.0
}

/// Convert a Julian date to "days since 1950-01-01 UTC" (UTC50), the time
/// base the external propagator ultimately works from.
pub fn to_utc50(julian_date: f64) -> f64 {
    julian_date - UTC50_EPOCH_OFFSET
}

/// Convert a Julian date to a `chrono` UTC instant, needed to hand a time to
/// `sgp4::Elements::datetime_to_minutes_since_epoch`.
pub fn julian_to_datetime(julian_date: f64) -> DateTime<Utc> {
    let unix_seconds = (julian_date - UNIX_EPOCH_OFFSET) * 86_400.0;
    let secs = unix_seconds.floor() as i64;
    let nanos = ((unix_seconds - secs as f64) * 1e9).round() as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos).unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap())
}

/// Build the T-length uniformly spaced time grid described by the data model.
pub fn build_time_grid(start: f64, intervals: usize, step_minutes: f64) -> Vec<f64> {
    (0..intervals)
        .map(|i| add_seconds(start, i as f64 * 60.0 * step_minutes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_difference_round_trip() {
        let jd = julian_date(2025, 1, 12, 0, 0, 0);
        let shifted = add_seconds(jd, 321.0);
        assert!((difference_seconds(jd, shifted) - 321.0).abs() < 1e-6);
    }

    #[test]
    fn utc50_matches_documented_offset() {
        let jd = 2_460_687.5;
        assert!((to_utc50(jd) - (jd - 2_433_281.5)).abs() < 1e-9);
    }

    #[test]
    fn time_grid_has_expected_length_and_spacing() {
        let start = julian_date(2025, 1, 12, 0, 0, 0);
        let grid = build_time_grid(start, 360, 4.0);
        assert_eq!(grid.len(), 360);
        let step_seconds = difference_seconds(grid[0], grid[1]);
        assert!((step_seconds - 240.0).abs() < 1e-6);
    }

    #[test]
    fn julian_to_datetime_roundtrips_through_unix_epoch() {
        let jd = UNIX_EPOCH_OFFSET;
        let dt = julian_to_datetime(jd);
        assert_eq!(dt.timestamp(), 0);
    }
}

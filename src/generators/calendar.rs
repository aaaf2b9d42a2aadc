//! Calendar arithmetic and timestamp synthesis for generated records.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};

use super::random::seeded_random;

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
///
/// # Panics
///
/// Panics if `month` is outside `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    assert_valid_month(month);
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Builds a timestamp inside the given UTC month from a single seed.
///
/// Day, hour and minute come from three decorrelated draws (`seed`,
/// `seed * 7 + 13`, `seed * 17 + 29`); seconds are always zero.
///
/// # Panics
///
/// Panics if `month` is outside `1..=12`.
pub fn random_date_in_month(year: i32, month: u32, seed: i64) -> DateTime<Utc> {
    let dim = days_in_month(year, month);
    let r1 = seeded_random(seed);
    let r2 = seeded_random(seed.wrapping_mul(7).wrapping_add(13));
    let r3 = seeded_random(seed.wrapping_mul(17).wrapping_add(29));

    let day = ((r1 * f64::from(dim)).floor() as u32 + 1).clamp(1, dim);
    let hour = (r2 * 24.0).floor() as u32;
    let minute = (r3 * 60.0).floor() as u32;

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("day, hour and minute are derived within calendar bounds");
    Utc.from_utc_datetime(&naive)
}

/// Renders a timestamp as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn to_iso_string(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn assert_valid_month(month: u32) {
    assert!(
        (1..=12).contains(&month),
        "month must be within 1..=12, got {month}"
    );
}

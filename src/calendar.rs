//! UTC calendar and ISO-8601 week arithmetic.
//!
//! Every fetch window and every output key is derived from the functions in
//! this module. They only ever read UTC fields, so results never depend on the
//! host's local timezone. All of them are pure and total for valid instants.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::{FetchError, Result};

// ---

/// ISO-8601 week key. `year` is the ISO week-numbering year, which can differ
/// from the Gregorian year in the last days of December and first days of
/// January.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct IsoWeek {
    // ---
    pub year: i32,
    pub week: u32,
}

impl fmt::Display for IsoWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

/// Truncate an instant to 00:00:00.000 UTC on the same calendar date.
pub fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    // ---
    Utc.from_utc_datetime(&instant.date_naive().and_time(NaiveTime::MIN))
}

/// Calendar-correct day arithmetic. UTC has no DST, so a day is always 24h.
pub fn add_days(instant: DateTime<Utc>, n: i64) -> DateTime<Utc> {
    // ---
    instant + Duration::days(n)
}

/// ISO weekday number: Monday = 1 … Sunday = 7.
fn iso_weekday(instant: DateTime<Utc>) -> i64 {
    i64::from(instant.weekday().number_from_monday())
}

/// ISO week and week-year of an instant.
///
/// Moves to the Thursday of the instant's Monday-based week; that Thursday's
/// Gregorian year is the ISO year and its 1-based day-of-year, divided by 7
/// and rounded up, is the week number.
pub fn iso_week(instant: DateTime<Utc>) -> IsoWeek {
    // ---
    let day = start_of_day(instant);
    let thursday = add_days(day, 4 - iso_weekday(day));

    IsoWeek {
        year: thursday.year(),
        week: thursday.ordinal().div_ceil(7),
    }
}

/// Monday 00:00 UTC of the instant's ISO week.
pub fn iso_week_start(instant: DateTime<Utc>) -> DateTime<Utc> {
    // ---
    let day = start_of_day(instant);
    add_days(day, -(iso_weekday(day) - 1))
}

/// `YYYY-MM-DD` of the instant's UTC date.
pub fn format_date(instant: DateTime<Utc>) -> String {
    // ---
    format!(
        "{:04}-{:02}-{:02}",
        instant.year(),
        instant.month(),
        instant.day()
    )
}

/// `YYYY-Www` of the instant's ISO week.
pub fn format_week(instant: DateTime<Utc>) -> String {
    iso_week(instant).to_string()
}

/// Parse a strict `YYYY-MM-DD` string into UTC midnight.
///
/// Rejects anything else, including dates that do not exist (`2026-02-30`),
/// before any network call is made.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    // ---
    let invalid = || FetchError::InvalidDate {
        input: input.to_string(),
    };

    let bytes = input.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shape_ok {
        return Err(invalid());
    }

    let year: i32 = input[0..4].parse().map_err(|_| invalid())?;
    let month: u32 = input[5..7].parse().map_err(|_| invalid())?;
    let day: u32 = input[8..10].parse().map_err(|_| invalid())?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

// --- Output keys

/// Storage key of a daily digest: `<folder>/<year>/daily-<YYYY-MM-DD>`.
pub fn daily_key(date: DateTime<Utc>, folder: &str) -> String {
    // ---
    format!("{}/{:04}/daily-{}", folder, date.year(), format_date(date))
}

/// Storage key of a weekly digest: `<folder>/<isoYear>/weekly-<YYYY-Www>`.
///
/// The year folder is the ISO year so that a week never straddles two folders.
pub fn weekly_key(date: DateTime<Utc>, folder: &str) -> String {
    // ---
    let week = iso_week(date);
    format!("{}/{:04}/weekly-{}", folder, week.year, week)
}

/// Storage key of the rolling persona. There is only ever one.
pub fn persona_key(folder: &str) -> String {
    format!("{folder}/persona")
}

/// Keys of the day before and the day after `date`.
pub fn adjacent_daily_keys(date: DateTime<Utc>, folder: &str) -> (String, String) {
    // ---
    (
        daily_key(add_days(date, -1), folder),
        daily_key(add_days(date, 1), folder),
    )
}

/// Keys of the week before and the week after the one containing `date`.
pub fn adjacent_weekly_keys(date: DateTime<Utc>, folder: &str) -> (String, String) {
    // ---
    (
        weekly_key(add_days(date, -7), folder),
        weekly_key(add_days(date, 7), folder),
    )
}

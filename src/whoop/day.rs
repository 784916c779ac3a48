//! Assemble one [`DayData`] per UTC calendar day from the four collections.

use chrono::{DateTime, Duration, Utc};
use futures_util::future::try_join_all;
use tracing::debug;

use super::client::WhoopClient;
use crate::calendar::{add_days, format_date, iso_week_start, start_of_day};
use crate::error::{FetchError, Result};
use crate::models::DayData;

// ---

/// Days covered by the rolling persona.
pub const PERSONA_DAYS: usize = 30;

/// Largest window [`get_recent_days`] accepts.
pub const MAX_RECENT_DAYS: usize = 90;

/// How far before the cycle start the sleep query reaches, so the night that
/// opened the cycle is not missed.
const SLEEP_LOOKBACK_HOURS: i64 = 24;

/// Fetch everything for the UTC day containing `date`.
///
/// The first cycle returned for `[day, day + 1)` is authoritative. Without a
/// cycle the day is returned empty and nothing else is requested. With one,
/// recoveries, sleeps and workouts are fetched concurrently against the
/// cycle's window, and the recovery whose `cycle_id` matches is kept (first
/// match wins). Any failure fails the whole day.
pub async fn get_day_data(client: &WhoopClient, date: DateTime<Utc>) -> Result<DayData> {
    // ---
    let day = start_of_day(date);
    let next_day = add_days(day, 1);

    let cycles = client.cycles(day, next_day).await?;
    let Some(cycle) = cycles.into_iter().next() else {
        debug!("{}: no cycle, returning empty day", format_date(day));
        return Ok(DayData::empty(day));
    };

    let cycle_start = cycle.start;
    let cycle_end = cycle.end.unwrap_or(next_day);
    let sleep_start = cycle_start - Duration::hours(SLEEP_LOOKBACK_HOURS);

    let (recoveries, sleeps, workouts) = tokio::try_join!(
        client.recoveries(cycle_start, cycle_end),
        client.sleeps(sleep_start, cycle_end),
        client.workouts(cycle_start, cycle_end),
    )?;

    let recovery = recoveries.into_iter().find(|r| r.cycle_id == cycle.id);

    debug!(
        "{}: cycle {}, recovery {}, {} sleeps, {} workouts",
        format_date(day),
        cycle.id,
        if recovery.is_some() { "found" } else { "missing" },
        sleeps.len(),
        workouts.len()
    );

    Ok(DayData {
        date: day,
        cycle: Some(cycle),
        recovery,
        sleeps,
        workouts,
    })
}

/// `n` consecutive days ending at and including the day of `end`, oldest first.
///
/// All days are fetched concurrently; results keep calendar order regardless
/// of completion order. The first failing day fails the whole window.
pub async fn get_recent_days(
    client: &WhoopClient,
    end: DateTime<Utc>,
    n: usize,
) -> Result<Vec<DayData>> {
    // ---
    if n == 0 || n > MAX_RECENT_DAYS {
        return Err(FetchError::InvalidRange {
            reason: format!("day count must be between 1 and {MAX_RECENT_DAYS}, got {n}"),
        });
    }

    let last = start_of_day(end);
    let span = n as i64 - 1;
    let days = (0..=span).map(|i| add_days(last, i - span));

    try_join_all(days.map(|day| get_day_data(client, day))).await
}

/// Monday through Sunday of the ISO week containing `date`.
pub async fn get_week_days(client: &WhoopClient, date: DateTime<Utc>) -> Result<Vec<DayData>> {
    // ---
    let monday = iso_week_start(date);
    get_recent_days(client, add_days(monday, 6), 7).await
}

/// The [`PERSONA_DAYS`] days ending at `today`.
pub async fn get_persona_days(client: &WhoopClient, today: DateTime<Utc>) -> Result<Vec<DayData>> {
    get_recent_days(client, today, PERSONA_DAYS).await
}

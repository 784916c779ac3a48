//! Rolling 30-day "typical recent state" summary.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::format::primary_sleep;
use super::trend::{hrv_trend, HrvTrend};
use super::weekly::{avg, Tally};
use crate::calendar::format_date;
use crate::models::DayData;

// ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonaData {
    // ---
    pub generated_date: String,
    pub period_start: String,
    pub period_end: String,
    pub avg_recovery: f64,
    pub avg_hrv: f64,
    pub avg_rhr: f64,
    pub avg_strain: f64,
    pub avg_sleep_millis: f64,
    /// Mean performance of each day's primary sleep, where scored.
    pub avg_sleep_perf: f64,
    pub total_workouts: usize,
    pub green_days: u32,
    pub yellow_days: u32,
    pub red_days: u32,
    pub hrv_trend: HrvTrend,
    pub hrv_trend_label: String,
}

/// Same reduction as the weekly stats, plus the HRV trend over days with a
/// scored recovery and the average primary-sleep performance.
pub fn build_persona_data(days: &[DayData], generated: DateTime<Utc>) -> PersonaData {
    // ---
    let tally = Tally::over(days);

    let hrv_series: Vec<f64> = days
        .iter()
        .filter_map(|d| d.recovery_score())
        .map(|r| r.hrv_rmssd_milli)
        .collect();
    let trend = hrv_trend(&hrv_series);

    let (perf_sum, perf_count) = days
        .iter()
        .filter_map(|d| primary_sleep(&d.sleeps))
        .filter_map(|s| s.scored())
        .filter_map(|s| s.sleep_performance_percentage)
        .fold((0.0, 0u32), |(sum, count), p| (sum + p, count + 1));

    PersonaData {
        generated_date: format_date(generated),
        period_start: days.first().map(|d| format_date(d.date)).unwrap_or_default(),
        period_end: days.last().map(|d| format_date(d.date)).unwrap_or_default(),
        avg_recovery: tally.avg_recovery(),
        avg_hrv: tally.avg_hrv(),
        avg_rhr: tally.avg_rhr(),
        avg_strain: tally.avg_strain(),
        avg_sleep_millis: tally.avg_sleep_millis(),
        avg_sleep_perf: avg(perf_sum, perf_count),
        total_workouts: tally.total_workouts,
        green_days: tally.green_days,
        yellow_days: tally.yellow_days,
        red_days: tally.red_days,
        hrv_trend: trend,
        hrv_trend_label: trend.to_string(),
    }
}

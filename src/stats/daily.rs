//! Headline numbers for a single day.

use serde::Serialize;

use super::format::{
    millis_to_minutes, primary_sleep, recovery_color, strain_category, RecoveryColor,
};
use crate::calendar::format_date;
use crate::models::{DayData, Workout};

// ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSummary {
    // ---
    pub sport: String,
    pub strain: Option<f64>,
    pub duration: String,
}

/// Scored values of one day. Anything not yet scored is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    // ---
    pub date: String,
    pub recovery_score: Option<f64>,
    pub recovery_color: Option<RecoveryColor>,
    pub hrv_rmssd_milli: Option<f64>,
    pub resting_heart_rate: Option<f64>,
    pub strain: Option<f64>,
    pub strain_category: Option<&'static str>,
    /// In-bed time of the primary sleep.
    pub sleep_duration: Option<String>,
    pub sleep_performance: Option<f64>,
    pub nap_count: usize,
    pub workouts: Vec<WorkoutSummary>,
}

fn summarize_workout(workout: &Workout) -> WorkoutSummary {
    // ---
    let millis = (workout.end - workout.start).num_milliseconds();
    WorkoutSummary {
        sport: workout.display_name(),
        strain: workout.scored().map(|s| s.strain),
        duration: millis_to_minutes(millis),
    }
}

pub fn build_day_summary(day: &DayData) -> DaySummary {
    // ---
    let recovery = day.recovery_score();
    let strain = day.cycle.as_ref().and_then(|c| c.scored_strain());
    let main_sleep = primary_sleep(&day.sleeps).filter(|s| s.scored().is_some());

    DaySummary {
        date: format_date(day.date),
        recovery_score: recovery.map(|r| r.recovery_score),
        recovery_color: recovery.map(|r| recovery_color(r.recovery_score)),
        hrv_rmssd_milli: recovery.map(|r| r.hrv_rmssd_milli),
        resting_heart_rate: recovery.map(|r| r.resting_heart_rate),
        strain,
        strain_category: strain.map(strain_category),
        sleep_duration: main_sleep.map(|s| millis_to_minutes(s.in_bed_millis())),
        sleep_performance: main_sleep
            .and_then(|s| s.scored())
            .and_then(|s| s.sleep_performance_percentage),
        nap_count: day.sleeps.iter().filter(|s| s.nap).count(),
        workouts: day.workouts.iter().map(summarize_workout).collect(),
    }
}

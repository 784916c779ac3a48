//! Reduction of a run of days into averages, recovery tiers and extremes.

use serde::Serialize;

use super::format::{non_nap_sleeps, recovery_color, RecoveryColor};
use crate::calendar::format_date;
use crate::models::DayData;

// ---

/// `sum / count`, or 0 when nothing was counted.
pub(crate) fn avg(sum: f64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// Running totals over a sequence of days. Each metric keeps its own
/// denominator because days can be scored for one thing and not another.
#[derive(Debug, Default)]
pub(crate) struct Tally<'a> {
    // ---
    recovery_sum: f64,
    hrv_sum: f64,
    rhr_sum: f64,
    recovery_count: u32,
    strain_sum: f64,
    strain_count: u32,
    sleep_millis_sum: f64,
    sleep_count: u32,
    pub total_workouts: usize,
    pub green_days: u32,
    pub yellow_days: u32,
    pub red_days: u32,
    best: Option<(f64, &'a DayData)>,
    worst: Option<(f64, &'a DayData)>,
}

impl<'a> Tally<'a> {
    // ---
    pub fn over(days: &'a [DayData]) -> Self {
        let mut tally = Tally::default();
        for day in days {
            tally.add(day);
        }
        tally
    }

    fn add(&mut self, day: &'a DayData) {
        // ---
        self.total_workouts += day.workouts.len();

        if let Some(score) = day.recovery_score() {
            let value = score.recovery_score;
            self.recovery_sum += value;
            self.hrv_sum += score.hrv_rmssd_milli;
            self.rhr_sum += score.resting_heart_rate;
            self.recovery_count += 1;

            match recovery_color(value) {
                RecoveryColor::Green => self.green_days += 1,
                RecoveryColor::Yellow => self.yellow_days += 1,
                RecoveryColor::Red => self.red_days += 1,
            }

            // Strict comparisons: the first day seen keeps a tie.
            if self.best.map_or(true, |(best, _)| value > best) {
                self.best = Some((value, day));
            }
            if self.worst.map_or(true, |(worst, _)| value < worst) {
                self.worst = Some((value, day));
            }
        }

        if let Some(strain) = day.cycle.as_ref().and_then(|c| c.scored_strain()) {
            self.strain_sum += strain;
            self.strain_count += 1;
        }

        for sleep in non_nap_sleeps(&day.sleeps).filter(|s| s.scored().is_some()) {
            self.sleep_millis_sum += sleep.in_bed_millis() as f64;
            self.sleep_count += 1;
        }
    }

    pub fn avg_recovery(&self) -> f64 {
        avg(self.recovery_sum, self.recovery_count)
    }

    pub fn avg_hrv(&self) -> f64 {
        avg(self.hrv_sum, self.recovery_count)
    }

    pub fn avg_rhr(&self) -> f64 {
        avg(self.rhr_sum, self.recovery_count)
    }

    pub fn avg_strain(&self) -> f64 {
        avg(self.strain_sum, self.strain_count)
    }

    pub fn avg_sleep_millis(&self) -> f64 {
        avg(self.sleep_millis_sum, self.sleep_count)
    }

    pub fn best_day(&self) -> Option<&'a DayData> {
        self.best.map(|(_, day)| day)
    }

    pub fn worst_day(&self) -> Option<&'a DayData> {
        self.worst.map(|(_, day)| day)
    }
}

/// Summary of a week (or any run of days).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekStats {
    // ---
    /// `YYYY-MM-DD` of the first day, empty when there are no days.
    pub week_start: String,
    /// `YYYY-MM-DD` of the last day, empty when there are no days.
    pub week_end: String,
    pub days: Vec<DayData>,
    pub avg_recovery: f64,
    pub avg_hrv: f64,
    pub avg_rhr: f64,
    pub avg_strain: f64,
    pub avg_sleep_millis: f64,
    pub total_workouts: usize,
    pub green_days: u32,
    pub yellow_days: u32,
    pub red_days: u32,
    /// Highest scored recovery; first one wins a tie.
    pub best_day: Option<DayData>,
    /// Lowest scored recovery; first one wins a tie.
    pub worst_day: Option<DayData>,
}

/// Reduce `days` in the order given. The caller supplies the days in
/// chronological order; nothing is reordered or validated here.
pub fn build_week_stats(days: Vec<DayData>) -> WeekStats {
    // ---
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return WeekStats::default();
    };
    let week_start = format_date(first.date);
    let week_end = format_date(last.date);

    let tally = Tally::over(&days);
    let stats = WeekStats {
        week_start,
        week_end,
        days: Vec::new(),
        avg_recovery: tally.avg_recovery(),
        avg_hrv: tally.avg_hrv(),
        avg_rhr: tally.avg_rhr(),
        avg_strain: tally.avg_strain(),
        avg_sleep_millis: tally.avg_sleep_millis(),
        total_workouts: tally.total_workouts,
        green_days: tally.green_days,
        yellow_days: tally.yellow_days,
        red_days: tally.red_days,
        best_day: tally.best_day().cloned(),
        worst_day: tally.worst_day().cloned(),
    };

    WeekStats { days, ..stats }
}

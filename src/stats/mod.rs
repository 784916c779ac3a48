//! Aggregation of assembled days into daily, weekly and persona summaries.

mod daily;
mod format;
mod persona;
mod trend;
mod weekly;

pub use daily::{build_day_summary, DaySummary, WorkoutSummary};
pub use format::{
    millis_to_minutes, non_nap_sleeps, primary_sleep, recovery_color, strain_category,
    RecoveryColor,
};
pub use persona::{build_persona_data, PersonaData};
pub use trend::{hrv_trend, HrvTrend};
pub use weekly::{build_week_stats, WeekStats};

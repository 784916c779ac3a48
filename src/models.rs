//! WHOOP records as they arrive from the API, and the joined per-day unit.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ---

/// Whether a record's score has finished computing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreState {
    // ---
    Scored,
    PendingScore,
    Unscorable,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One page of a paginated collection.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    // ---
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
    #[serde(default)]
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Continuation cursor, if more pages remain. An empty string counts as absent.
    pub fn cursor(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Physiological day-boundary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    // ---
    pub id: i64,
    pub start: DateTime<Utc>,
    /// `None` while the cycle is still in progress.
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score_state: ScoreState,
    #[serde(default)]
    pub score: Option<CycleScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleScore {
    // ---
    pub strain: f64,
    #[serde(default)]
    pub kilojoule: f64,
    #[serde(default)]
    pub average_heart_rate: f64,
    #[serde(default)]
    pub max_heart_rate: f64,
}

impl Cycle {
    // ---
    /// Day strain, only once the cycle is scored.
    pub fn scored_strain(&self) -> Option<f64> {
        match (&self.score_state, &self.score) {
            (ScoreState::Scored, Some(score)) => Some(score.strain),
            _ => None,
        }
    }
}

/// Daily readiness score, linked to exactly one cycle by `cycle_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recovery {
    // ---
    pub cycle_id: i64,
    #[serde(default)]
    pub sleep_id: Option<String>,
    #[serde(default)]
    pub score_state: ScoreState,
    #[serde(default)]
    pub score: Option<RecoveryScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryScore {
    // ---
    #[serde(default)]
    pub user_calibrating: bool,
    pub recovery_score: f64,
    pub resting_heart_rate: f64,
    pub hrv_rmssd_milli: f64,
    #[serde(default)]
    pub spo2_percentage: Option<f64>,
    #[serde(default)]
    pub skin_temp_celsius: Option<f64>,
}

impl Recovery {
    // ---
    pub fn scored(&self) -> Option<&RecoveryScore> {
        match self.score_state {
            ScoreState::Scored => self.score.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sleep {
    // ---
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub nap: bool,
    #[serde(default)]
    pub score_state: ScoreState,
    #[serde(default)]
    pub score: Option<SleepScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepScore {
    // ---
    #[serde(default)]
    pub stage_summary: StageSummary,
    #[serde(default)]
    pub respiratory_rate: Option<f64>,
    #[serde(default)]
    pub sleep_performance_percentage: Option<f64>,
    #[serde(default)]
    pub sleep_consistency_percentage: Option<f64>,
    #[serde(default)]
    pub sleep_efficiency_percentage: Option<f64>,
}

/// Stage totals, all in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSummary {
    // ---
    pub total_in_bed_time_milli: i64,
    pub total_awake_time_milli: i64,
    pub total_no_data_time_milli: i64,
    pub total_light_sleep_time_milli: i64,
    pub total_slow_wave_sleep_time_milli: i64,
    pub total_rem_sleep_time_milli: i64,
    pub sleep_cycle_count: i64,
    pub disturbance_count: i64,
}

impl Sleep {
    // ---
    pub fn scored(&self) -> Option<&SleepScore> {
        match self.score_state {
            ScoreState::Scored => self.score.as_ref(),
            _ => None,
        }
    }

    /// In-bed time in milliseconds; 0 when there is no score yet.
    pub fn in_bed_millis(&self) -> i64 {
        self.score
            .as_ref()
            .map_or(0, |s| s.stage_summary.total_in_bed_time_milli)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    // ---
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub sport_id: i32,
    #[serde(default)]
    pub sport_name: Option<String>,
    #[serde(default)]
    pub score_state: ScoreState,
    #[serde(default)]
    pub score: Option<WorkoutScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutScore {
    // ---
    pub strain: f64,
    #[serde(default)]
    pub average_heart_rate: f64,
    #[serde(default)]
    pub max_heart_rate: f64,
    #[serde(default)]
    pub kilojoule: f64,
    #[serde(default)]
    pub distance_meter: Option<f64>,
    #[serde(default)]
    pub altitude_gain_meter: Option<f64>,
}

impl Workout {
    // ---
    /// Display name from the static sport table, ignoring any name the API sent.
    pub fn display_name(&self) -> String {
        sport_name(self.sport_id)
    }

    pub fn scored(&self) -> Option<&WorkoutScore> {
        match self.score_state {
            ScoreState::Scored => self.score.as_ref(),
            _ => None,
        }
    }
}

/// Everything known about one UTC calendar day.
///
/// `recovery` is only ever looked up when `cycle` is present. When no cycle
/// exists for the day the sleep and workout lists are left empty as well.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayData {
    // ---
    pub date: DateTime<Utc>,
    pub cycle: Option<Cycle>,
    pub recovery: Option<Recovery>,
    pub sleeps: Vec<Sleep>,
    pub workouts: Vec<Workout>,
}

impl DayData {
    // ---
    /// A day with no cycle: rest day, or no data yet.
    pub fn empty(date: DateTime<Utc>) -> Self {
        DayData {
            date,
            cycle: None,
            recovery: None,
            sleeps: Vec::new(),
            workouts: Vec::new(),
        }
    }

    /// The day's recovery score, when scored.
    pub fn recovery_score(&self) -> Option<&RecoveryScore> {
        self.recovery.as_ref().and_then(Recovery::scored)
    }
}

// --- Sport names

static SPORT_NAMES: Lazy<HashMap<i32, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (-1, "Activity"),
        (0, "Running"),
        (1, "Cycling"),
        (16, "Baseball"),
        (17, "Basketball"),
        (18, "Rowing"),
        (19, "Fencing"),
        (20, "Field Hockey"),
        (21, "Football"),
        (22, "Golf"),
        (24, "Ice Hockey"),
        (25, "Lacrosse"),
        (27, "Rugby"),
        (28, "Sailing"),
        (29, "Skiing"),
        (30, "Soccer"),
        (31, "Softball"),
        (32, "Squash"),
        (33, "Swimming"),
        (34, "Tennis"),
        (35, "Track & Field"),
        (36, "Volleyball"),
        (37, "Water Polo"),
        (38, "Wrestling"),
        (39, "Boxing"),
        (42, "Dance"),
        (43, "Pilates"),
        (44, "Yoga"),
        (45, "Weightlifting"),
        (47, "Cross Country Skiing"),
        (48, "Functional Fitness"),
        (49, "Duathlon"),
        (51, "Gymnastics"),
        (52, "Hiking/Rucking"),
        (53, "Horseback Riding"),
        (55, "Kayaking"),
        (56, "Martial Arts"),
        (57, "Mountain Biking"),
        (59, "Powerlifting"),
        (60, "Rock Climbing"),
        (61, "Paddleboarding"),
        (62, "Triathlon"),
        (63, "Walking"),
        (64, "Surfing"),
        (65, "Elliptical"),
        (66, "Stairmaster"),
        (70, "Meditation"),
        (71, "Other"),
        (73, "Diving"),
        (74, "Operations - Tactical"),
        (75, "Operations - Medical"),
        (76, "Operations - Flying"),
        (77, "Operations - Water"),
        (82, "Ultimate"),
        (83, "Climber"),
        (84, "Jumping Rope"),
        (85, "Australian Football"),
        (86, "Skateboarding"),
        (87, "Coaching"),
        (88, "Ice Bath"),
        (89, "Commuting"),
        (90, "Gaming"),
        (91, "Snowboarding"),
        (92, "Motocross"),
        (93, "Cricket"),
        (94, "Pickleball"),
        (95, "Badminton"),
        (96, "Obstacle Course Racing"),
        (97, "Motor Racing"),
        (98, "HIIT"),
        (99, "Spin"),
        (100, "Jiu Jitsu"),
        (101, "Manual Labor"),
        (103, "Archery"),
    ])
});

/// Display name of a WHOOP sport id; unknown ids render as `Sport(<id>)`.
pub fn sport_name(sport_id: i32) -> String {
    // ---
    match SPORT_NAMES.get(&sport_id) {
        Some(name) => (*name).to_string(),
        None => format!("Sport({sport_id})"),
    }
}

//! Record builders and a scripted WHOOP API shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::error::Result;
use crate::models::{
    Cycle, CycleScore, DayData, Recovery, RecoveryScore, ScoreState, Sleep, SleepScore,
    StageSummary, Workout, WorkoutScore,
};
use crate::whoop::{RawResponse, RetryPolicy, Transport, WhoopClient};

// ---

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn cycle(id: i64, strain: f64) -> Cycle {
    // ---
    Cycle {
        id,
        start: utc(2026, 2, 22, 8),
        end: Some(utc(2026, 2, 22, 23)),
        score_state: ScoreState::Scored,
        score: Some(CycleScore {
            strain,
            kilojoule: 8500.0,
            average_heart_rate: 68.0,
            max_heart_rate: 152.0,
        }),
    }
}

pub fn recovery(cycle_id: i64, score: f64, hrv: f64, rhr: f64) -> Recovery {
    // ---
    Recovery {
        cycle_id,
        sleep_id: Some("abc-123".to_string()),
        score_state: ScoreState::Scored,
        score: Some(RecoveryScore {
            user_calibrating: false,
            recovery_score: score,
            resting_heart_rate: rhr,
            hrv_rmssd_milli: hrv,
            spo2_percentage: Some(98.1),
            skin_temp_celsius: Some(34.2),
        }),
    }
}

pub fn sleep(id: &str, in_bed_millis: i64, nap: bool, performance: f64) -> Sleep {
    // ---
    Sleep {
        id: id.to_string(),
        start: utc(2026, 2, 22, 2),
        end: utc(2026, 2, 22, 9),
        nap,
        score_state: ScoreState::Scored,
        score: Some(SleepScore {
            stage_summary: StageSummary {
                total_in_bed_time_milli: in_bed_millis,
                total_awake_time_milli: 1_800_000,
                ..StageSummary::default()
            },
            respiratory_rate: Some(15.2),
            sleep_performance_percentage: Some(performance),
            sleep_consistency_percentage: Some(72.0),
            sleep_efficiency_percentage: Some(92.0),
        }),
    }
}

pub fn workout(id: &str, sport_id: i32, strain: f64) -> Workout {
    // ---
    Workout {
        id: id.to_string(),
        start: utc(2026, 2, 22, 12),
        end: utc(2026, 2, 22, 13),
        sport_id,
        sport_name: None,
        score_state: ScoreState::Scored,
        score: Some(WorkoutScore {
            strain,
            average_heart_rate: 142.0,
            max_heart_rate: 168.0,
            kilojoule: 2200.0,
            distance_meter: Some(8046.0),
            altitude_gain_meter: Some(45.0),
        }),
    }
}

/// A fully scored day: cycle 1 (strain 12.4), recovery 78 / HRV 67.3 /
/// RHR 52, one 7h sleep at 85% performance, one run.
pub fn day(date: DateTime<Utc>) -> DayData {
    // ---
    DayData {
        date,
        cycle: Some(cycle(1, 12.4)),
        recovery: Some(recovery(1, 78.0, 67.3, 52.0)),
        sleeps: vec![sleep("sleep-1", 25_200_000, false, 85.0)],
        workouts: vec![workout("workout-1", 0, 8.7)],
    }
}

/// Same as [`day`] with a different recovery score and HRV.
pub fn day_with_recovery(date: DateTime<Utc>, score: f64, hrv: f64) -> DayData {
    // ---
    DayData {
        recovery: Some(recovery(1, score, hrv, 52.0)),
        ..day(date)
    }
}

// --- Scripted API

/// One request seen by [`FakeApi`].
#[derive(Debug, Clone)]
pub struct Call {
    // ---
    pub path: String,
    pub query: Vec<(String, String)>,
    pub at: tokio::time::Instant,
}

impl Call {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

type Handler = dyn Fn(&Call, usize) -> RawResponse + Send + Sync;
type Latency = dyn Fn(&Call) -> Duration + Send + Sync;

/// In-memory [`Transport`]. The handler receives the call and its 0-based
/// sequence number across all paths.
///
/// A call is recorded when it is issued; the answer arrives after the
/// call's latency, so overlapping requests can be observed under a paused
/// clock.
pub struct FakeApi {
    // ---
    handler: Box<Handler>,
    latency: Box<Latency>,
    calls: Mutex<Vec<Call>>,
    seq: AtomicUsize,
}

impl FakeApi {
    // ---
    pub fn new(
        handler: impl Fn(&Call, usize) -> RawResponse + Send + Sync + 'static,
    ) -> Arc<Self> {
        Self::with_latency(handler, |_| Duration::ZERO)
    }

    pub fn with_latency(
        handler: impl Fn(&Call, usize) -> RawResponse + Send + Sync + 'static,
        latency: impl Fn(&Call) -> Duration + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(FakeApi {
            handler: Box::new(handler),
            latency: Box::new(latency),
            calls: Mutex::new(Vec::new()),
            seq: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }

    pub fn client(self: &Arc<Self>) -> WhoopClient {
        WhoopClient::new(self.clone(), RetryPolicy::default())
    }
}

#[async_trait]
impl Transport for FakeApi {
    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<RawResponse> {
        // ---
        let call = Call {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            at: tokio::time::Instant::now(),
        };
        let n = self.seq.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(call.clone());

        let latency = (self.latency)(&call);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        Ok((self.handler)(&call, n))
    }
}

pub fn status(code: u16) -> RawResponse {
    RawResponse {
        status: code,
        body: String::new(),
    }
}

/// 200 with a page of the given JSON records.
pub fn page(records: serde_json::Value, next_token: Option<&str>) -> RawResponse {
    // ---
    let body = serde_json::json!({ "records": records, "next_token": next_token });
    RawResponse {
        status: 200,
        body: body.to_string(),
    }
}

pub fn empty_page() -> RawResponse {
    page(serde_json::json!([]), None)
}

//! Single-day report and the N-day backfill window.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::{resolve_date, ApiError, AppState};
use crate::calendar::{adjacent_daily_keys, daily_key, start_of_day};
use crate::models::DayData;
use crate::stats::{build_day_summary, DaySummary};
use crate::whoop::{get_day_data, get_recent_days};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/daily/{date}", get(daily))
        .route("/days", get(days))
}

#[derive(Debug, Serialize)]
struct DailyReport {
    key: String,
    prev_key: String,
    next_key: String,
    summary: DaySummary,
    day: DayData,
}

fn report(day: DayData, folder: &str) -> DailyReport {
    // ---
    let (prev_key, next_key) = adjacent_daily_keys(day.date, folder);
    DailyReport {
        key: daily_key(day.date, folder),
        prev_key,
        next_key,
        summary: build_day_summary(&day),
        day,
    }
}

async fn daily(
    Path(date): Path<String>,
    State((client, config)): State<AppState>,
) -> Result<Json<DailyReport>, ApiError> {
    // ---
    let span = info_span!("daily", request_id = %Uuid::new_v4(), %date);

    async move {
        info!("GET /daily/{}", date);
        let day = resolve_date(&date)?;
        let data = get_day_data(&client, day).await?;
        Ok::<_, ApiError>(Json(report(data, &config.output_folder)))
    }
    .instrument(span)
    .await
}

/// Query parameters of `GET /days`.
#[derive(Debug, Deserialize)]
struct DaysQuery {
    /// Last day of the window, `YYYY-MM-DD` or `today` (default).
    end: Option<String>,
    /// Number of days (default 7).
    n: Option<usize>,
}

async fn days(
    Query(params): Query<DaysQuery>,
    State((client, config)): State<AppState>,
) -> Result<Json<Vec<DailyReport>>, ApiError> {
    // ---
    let span = info_span!("days", request_id = %Uuid::new_v4());

    async move {
        info!("GET /days {:?}", params);
        let end = match params.end.as_deref() {
            Some(end) => resolve_date(end)?,
            None => start_of_day(Utc::now()),
        };
        let n = params.n.unwrap_or(7);

        let data = get_recent_days(&client, end, n).await?;
        info!("Backfill window complete, {} days", data.len());

        let reports: Vec<DailyReport> = data
            .into_iter()
            .map(|d| report(d, &config.output_folder))
            .collect();
        Ok::<_, ApiError>(Json(reports))
    }
    .instrument(span)
    .await
}

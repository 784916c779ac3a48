//! Weekly report for the ISO week containing a date.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::{resolve_date, ApiError, AppState};
use crate::calendar::{adjacent_weekly_keys, format_week, iso_week_start, weekly_key};
use crate::stats::{build_week_stats, WeekStats};
use crate::whoop::get_week_days;

// ---

pub fn router() -> Router<AppState> {
    Router::new().route("/weekly/{date}", get(weekly))
}

#[derive(Debug, Serialize)]
struct WeeklyReport {
    week: String,
    key: String,
    prev_key: String,
    next_key: String,
    stats: WeekStats,
}

async fn weekly(
    Path(date): Path<String>,
    State((client, config)): State<AppState>,
) -> Result<Json<WeeklyReport>, ApiError> {
    // ---
    let span = info_span!("weekly", request_id = %Uuid::new_v4(), %date);

    async move {
        info!("GET /weekly/{}", date);
        let monday = iso_week_start(resolve_date(&date)?);
        let days = get_week_days(&client, monday).await?;
        let stats = build_week_stats(days);

        let folder = &config.output_folder;
        let (prev_key, next_key) = adjacent_weekly_keys(monday, folder);
        info!(
            "Week {} complete: {} green, {} yellow, {} red",
            format_week(monday),
            stats.green_days,
            stats.yellow_days,
            stats.red_days
        );

        Ok::<_, ApiError>(Json(WeeklyReport {
            week: format_week(monday),
            key: weekly_key(monday, folder),
            prev_key,
            next_key,
            stats,
        }))
    }
    .instrument(span)
    .await
}

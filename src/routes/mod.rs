//! HTTP gateway: merges the per-report subrouters and maps engine errors to
//! responses. `main.rs` only ever sees [`router`].

use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use chrono::Utc;
use serde_json::json;

use crate::calendar::{parse_date, start_of_day};
use crate::{Config, FetchError, WhoopClient};

mod daily;
mod health;
mod persona;
mod weekly;

/// Shared state of every route.
pub type AppState = (WhoopClient, Config);

// ---

pub fn router(client: WhoopClient, config: Config) -> Router {
    // ---
    Router::new()
        .merge(daily::router())
        .merge(weekly::router())
        .merge(persona::router())
        .merge(health::router())
        .with_state((client, config))
}

/// `today` or a strict `YYYY-MM-DD`, as UTC midnight.
fn resolve_date(input: &str) -> Result<chrono::DateTime<Utc>, FetchError> {
    // ---
    if input.eq_ignore_ascii_case("today") {
        Ok(start_of_day(Utc::now()))
    } else {
        parse_date(input)
    }
}

/// Engine failure rendered as `{ "error": "..." }`.
pub struct ApiError(FetchError);

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        // ---
        let status = match &self.0 {
            FetchError::InvalidDate { .. } | FetchError::InvalidRange { .. } => {
                StatusCode::BAD_REQUEST
            }
            FetchError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            FetchError::RateLimited { .. } => StatusCode::SERVICE_UNAVAILABLE,
            FetchError::Upstream { .. }
            | FetchError::Transport { .. }
            | FetchError::Decode { .. } => StatusCode::BAD_GATEWAY,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::warn!("Request rejected: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

//! Rolling 30-day persona ending today.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::calendar::{persona_key, start_of_day};
use crate::stats::{build_persona_data, PersonaData};
use crate::whoop::get_persona_days;

// ---

pub fn router() -> Router<AppState> {
    Router::new().route("/persona", get(persona))
}

#[derive(Debug, Serialize)]
struct PersonaReport {
    key: String,
    persona: PersonaData,
}

async fn persona(
    State((client, config)): State<AppState>,
) -> Result<Json<PersonaReport>, ApiError> {
    // ---
    let span = info_span!("persona", request_id = %Uuid::new_v4());

    async move {
        info!("GET /persona");
        let now = Utc::now();
        let days = get_persona_days(&client, start_of_day(now)).await?;
        let persona = build_persona_data(&days, now);
        info!("Persona complete, HRV trend: {}", persona.hrv_trend_label);

        Ok::<_, ApiError>(Json(PersonaReport {
            key: persona_key(&config.output_folder),
            persona,
        }))
    }
    .instrument(span)
    .await
}

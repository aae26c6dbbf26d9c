use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::matching::lineup_form::HERO_FIELD_COUNT;
use crate::matching::{validate_hero_fields, HeroNormalizer};
use crate::routes::AppState;

pub const CHECK_STRUCTURE_ERROR: &str =
    "Invalid input structure. Requires a heroes array of 10 names.";

#[derive(Debug, Deserialize)]
pub struct LineupCheckRequest {
    /// Field values in form order: your hero, allies, opponents
    pub heroes: Vec<String>,
    /// Submit-time check; empty fields only get a message when set
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

#[derive(Debug, Serialize)]
pub struct LineupCheckResponse {
    /// Auto-corrected field values
    pub heroes: Vec<String>,
    pub invalid: Vec<bool>,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `POST /api/lineup/check`: normalize and validate the form's hero fields
pub async fn check_lineup(
    State(state): State<AppState>,
    payload: Result<Json<LineupCheckRequest>, JsonRejection>,
) -> AppResult<Json<LineupCheckResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Unreadable lineup check: {}", rejection.body_text());
        AppError::BadRequest(CHECK_STRUCTURE_ERROR.to_string())
    })?;

    if request.heroes.len() != HERO_FIELD_COUNT {
        return Err(AppError::BadRequest(CHECK_STRUCTURE_ERROR.to_string()));
    }

    let data = state
        .coach
        .cache()
        .get()
        .await
        .map_err(AppError::GameDataUnavailable)?;
    let normalizer = HeroNormalizer::builtin(data.hero_names())?;

    let heroes: Vec<String> = request
        .heroes
        .iter()
        .map(|value| normalizer.normalize(value))
        .collect();
    let report = validate_hero_fields(&heroes, &normalizer, request.is_final);

    Ok(Json(LineupCheckResponse {
        valid: report.is_valid(),
        heroes,
        invalid: report.invalid,
        error: report.first_error,
    }))
}

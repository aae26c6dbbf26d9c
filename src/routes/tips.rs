use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::coach::validation::STRUCTURE_ERROR;
use crate::error::{AppError, AppResult};
use crate::models::TipsRequest;
use crate::render::render_markdown;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    /// Model output, verbatim
    pub tips: String,
    /// The same tips rendered to an HTML fragment
    pub html: String,
}

/// `POST /api/get-tips`
pub async fn get_tips(
    State(state): State<AppState>,
    payload: Result<Json<TipsRequest>, JsonRejection>,
) -> AppResult<Json<TipsResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Unreadable tips request: {}", rejection.body_text());
        AppError::BadRequest(STRUCTURE_ERROR.to_string())
    })?;

    let tips = state.coach.tips(&request).await?;
    let html = render_markdown(&tips);

    Ok(Json(TipsResponse { tips, html }))
}

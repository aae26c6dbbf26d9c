use axum::extract::State;
use axum::Json;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::Hero;
use crate::routes::AppState;

/// `GET /api/heroes`: every hero, alphabetically
pub async fn list_heroes(State(state): State<AppState>) -> AppResult<Json<Vec<Hero>>> {
    let data = state
        .coach
        .cache()
        .get()
        .await
        .map_err(AppError::HeroListUnavailable)?;

    info!("Serving {} heroes", data.heroes().len());

    Ok(Json(data.heroes().to_vec()))
}

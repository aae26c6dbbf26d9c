use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::routes::AppState;

/// Liveness plus a summary of the cached hero data
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let cache = state.coach.cache();

    let hero_data = match cache.peek().await {
        Some(data) => json!({
            "source": cache.source_name(),
            "loaded": true,
            "heroes": data.heroes().len(),
            "patch": data.patch,
            "fetched_at": data.fetched_at,
        }),
        None => json!({
            "source": cache.source_name(),
            "loaded": false,
        }),
    };

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "hero_data": hero_data,
    }))
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Why the language model did not produce tips
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The request never got an HTTP response
    #[error("Failed to get tips from AI model.")]
    Network(String),

    /// No response within the configured timeout, in seconds
    #[error("AI model request timed out after {0} seconds.")]
    Timeout(u64),

    /// The provider answered with a non-2xx status
    #[error("{}", status_text(.status, .message))]
    Status { status: u16, message: Option<String> },

    /// The provider refused the prompt or the candidate on safety grounds
    #[error("AI model blocked the prompt. Reason: {reason}{}", details_text(.details))]
    Blocked {
        reason: String,
        details: Option<String>,
    },

    /// 2xx response without any candidate text
    #[error("Failed to parse response from AI model.")]
    Malformed,
}

fn status_text(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("AI Model Error: {}", message),
        None => format!("AI Model request failed with status: {}", status),
    }
}

fn details_text(details: &Option<String>) -> String {
    details
        .as_ref()
        .map(|d| format!(" Details: {}", d))
        .unwrap_or_default()
}

impl ModelError {
    /// Status relayed to the page: the provider's own when it sent one
    pub fn status_code(&self) -> StatusCode {
        match self {
            ModelError::Status { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error type for HTTP handlers, rendered as `{"error": "..."}`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request itself is wrong; the message names the offending value
    #[error("{0}")]
    BadRequest(String),

    /// Hero data could not be fetched and nothing was cached
    #[error("Failed to load hero data.")]
    GameDataUnavailable(anyhow::Error),

    /// The hero list endpoint could not get any data
    #[error("Failed to provide hero list.")]
    HeroListUnavailable(anyhow::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Internal server error.")]
    Internal(#[from] anyhow::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                StatusCode::BAD_REQUEST
            }
            AppError::GameDataUnavailable(err) => {
                tracing::error!("Game data unavailable: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::HeroListUnavailable(err) => {
                tracing::error!("Error fetching hero list: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Model(err) => {
                tracing::error!("Model call failed: {:?}", err);
                err.status_code()
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::selection::orchestrator::GenerationFailure;
use crate::selection::validator::ValidationFailure;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    SelectionInvalid(#[from] ValidationFailure),

    #[error(transparent)]
    Generation(#[from] GenerationFailure),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::SelectionInvalid(failure) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "SELECTION_INVALID",
                failure.to_string(),
                Some(failure.messages()),
            ),
            AppError::Generation(GenerationFailure::InvalidMaxAttempts(_)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
                None,
            ),
            AppError::Generation(GenerationFailure::Exhausted { attempts }) => {
                tracing::error!("{self}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    format!(
                        "Selection generation failed after {} attempts",
                        attempts.len()
                    ),
                    Some(
                        attempts
                            .iter()
                            .map(|a| format!("attempt {}: {}", a.attempt, a.message))
                            .collect(),
                    ),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = json!(details);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

//! Axum route handlers for the Job API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::job::{extract_job, JobDocument};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractJobRequest {
    pub raw_text: String,
    /// Overrides `MAX_KEYWORDS` for this request.
    #[serde(default)]
    pub max_keywords: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ExtractJobResponse {
    pub job: JobDocument,
}

/// POST /api/v1/jobs/extract
///
/// Cleans a pasted job posting and returns it with its extracted keywords.
pub async fn handle_extract_job(
    State(state): State<AppState>,
    Json(request): Json<ExtractJobRequest>,
) -> Result<Json<ExtractJobResponse>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }

    let max_keywords = request.max_keywords.unwrap_or(state.config.max_keywords);
    let job = extract_job(&request.raw_text, &state.lexicon, max_keywords);

    Ok(Json(ExtractJobResponse { job }))
}

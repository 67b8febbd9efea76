//! Axum route handlers for the Selection API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::job::{extract_job, JobDocument};
use crate::models::profile::Profile;
use crate::models::selection::SelectionPlan;
use crate::selection::orchestrator::{generate_selection_plan, SelectionOptions};
use crate::selection::validator::{validate_selection, ValidationError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_strict() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ValidateSelectionRequest {
    pub profile: Profile,
    pub plan: SelectionPlan,
    #[serde(default = "default_strict")]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct ValidateSelectionResponse {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateSelectionRequest {
    pub profile: Profile,
    pub job_text: String,
    /// Overrides `MAX_ATTEMPTS` for this request.
    #[serde(default)]
    pub max_attempts: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateSelectionResponse {
    pub plan: SelectionPlan,
    pub job: JobDocument,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/selections/validate
///
/// Checks a plan against a profile. In strict mode (the default) any error is a 422;
/// otherwise the error list is returned with `valid: false`.
pub async fn handle_validate_selection(
    Json(request): Json<ValidateSelectionRequest>,
) -> Result<Json<ValidateSelectionResponse>, AppError> {
    let errors = validate_selection(&request.profile, &request.plan, request.strict)?;

    Ok(Json(ValidateSelectionResponse {
        valid: errors.is_empty(),
        errors,
    }))
}

/// POST /api/v1/selections/generate
///
/// Extracts the job, then runs the bounded generate-and-validate loop.
pub async fn handle_generate_selection(
    State(state): State<AppState>,
    Json(request): Json<GenerateSelectionRequest>,
) -> Result<Json<GenerateSelectionResponse>, AppError> {
    if request.job_text.trim().is_empty() {
        return Err(AppError::Validation("job_text cannot be empty".to_string()));
    }

    let job = extract_job(&request.job_text, &state.lexicon, state.config.max_keywords);
    let options = SelectionOptions {
        max_attempts: request.max_attempts.unwrap_or(state.config.max_attempts),
        max_job_chars: state.config.max_job_chars,
    };

    info!(
        "Generating selection plan ({} keywords, up to {} attempts)",
        job.keywords.len(),
        options.max_attempts
    );

    let plan =
        generate_selection_plan(&request.profile, &job, state.generator.as_ref(), &options).await?;

    Ok(Json(GenerateSelectionResponse { plan, job }))
}

//! Selection Orchestrator: asks a generation backend for a `SelectionPlan`, validates it
//! strictly, and retries with feedback until a plan passes or attempts run out.
//!
//! Flow per attempt: build invocation → generate → validate → success | retry.
//! Only the previous attempt's feedback is sent back, never the full history.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::job::JobDocument;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};
use crate::llm_client::provider::{
    generate_structured, LlmInvocation, OutputShape, StructuredGenerator,
};
use crate::models::profile::Profile;
use crate::models::selection::{SelectionPlan, SECTION_TITLES};
use crate::selection::prompts::{SELECTION_RULES, SELECTION_SYSTEM, SELECTION_TASK};
use crate::selection::validator::validate_selection;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_MAX_JOB_CHARS: usize = 8000;

/// Keywords beyond this many are left out of the prompt.
const MAX_PROMPT_KEYWORDS: usize = 40;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Must be at least 1.
    pub max_attempts: u32,
    /// Cap on cleaned job text characters included in the prompt.
    pub max_job_chars: usize,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_job_chars: DEFAULT_MAX_JOB_CHARS,
        }
    }
}

/// Why one attempt failed. `attempt` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub attempt: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationFailure {
    #[error("max_attempts must be >= 1 (got {0})")]
    InvalidMaxAttempts(u32),

    #[error(
        "Selection generation failed after {} attempts: {}",
        .attempts.len(),
        describe_attempts(.attempts)
    )]
    Exhausted { attempts: Vec<AttemptRecord> },
}

fn describe_attempts(attempts: &[AttemptRecord]) -> String {
    attempts
        .iter()
        .map(|a| format!("attempt {}: {}", a.attempt, a.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Retry loop states. `Idle` only exists before the first attempt.
#[derive(Debug)]
enum AttemptState {
    Idle,
    Invoking {
        attempt: u32,
        feedback: Vec<String>,
    },
    Validating {
        attempt: u32,
        plan: SelectionPlan,
    },
    RetryWithFeedback {
        attempt: u32,
        message: String,
        feedback: Vec<String>,
    },
    Success(SelectionPlan),
    Failed,
}

// ────────────────────────────────────────────────────────────────────────────
// Retry loop
// ────────────────────────────────────────────────────────────────────────────

/// Generates a strictly valid selection plan for `job` from `profile`.
///
/// Each attempt makes exactly one call to `generator`. Provider errors and validation
/// failures are recorded and fed back into the next attempt; only after `max_attempts`
/// failures does the caller see `GenerationFailure::Exhausted` with every attempt listed.
pub async fn generate_selection_plan(
    profile: &Profile,
    job: &JobDocument,
    generator: &dyn StructuredGenerator,
    options: &SelectionOptions,
) -> Result<SelectionPlan, GenerationFailure> {
    let shape = OutputShape::of::<SelectionPlan>();
    let mut attempts: Vec<AttemptRecord> = Vec::new();
    let mut state = AttemptState::Idle;

    loop {
        state = match state {
            AttemptState::Idle => {
                if options.max_attempts < 1 {
                    return Err(GenerationFailure::InvalidMaxAttempts(options.max_attempts));
                }
                AttemptState::Invoking {
                    attempt: 1,
                    feedback: Vec::new(),
                }
            }

            AttemptState::Invoking { attempt, feedback } => {
                info!(
                    "Selection attempt {}/{} ({} feedback items)",
                    attempt,
                    options.max_attempts,
                    feedback.len()
                );
                let invocation =
                    build_selection_invocation(profile, job, &feedback, options.max_job_chars);

                match generate_structured::<SelectionPlan>(generator, &invocation, &shape).await {
                    Ok(plan) => AttemptState::Validating { attempt, plan },
                    Err(e) => {
                        let message = format!("Provider failure: {e}");
                        AttemptState::RetryWithFeedback {
                            attempt,
                            feedback: vec![message.clone()],
                            message,
                        }
                    }
                }
            }

            AttemptState::Validating { attempt, plan } => {
                match validate_selection(profile, &plan, true) {
                    Ok(_) => AttemptState::Success(plan),
                    Err(failure) => {
                        let feedback = failure.messages();
                        let message =
                            format!("Selection validation failed: {}", feedback.join(" | "));
                        AttemptState::RetryWithFeedback {
                            attempt,
                            message,
                            feedback,
                        }
                    }
                }
            }

            AttemptState::RetryWithFeedback {
                attempt,
                message,
                feedback,
            } => {
                warn!(
                    "Selection attempt {}/{} failed: {}",
                    attempt, options.max_attempts, message
                );
                attempts.push(AttemptRecord { attempt, message });
                if attempt >= options.max_attempts {
                    AttemptState::Failed
                } else {
                    AttemptState::Invoking {
                        attempt: attempt + 1,
                        feedback,
                    }
                }
            }

            AttemptState::Success(plan) => {
                info!(
                    "Selection plan accepted after {} failed attempt(s)",
                    attempts.len()
                );
                return Ok(plan);
            }

            AttemptState::Failed => {
                return Err(GenerationFailure::Exhausted { attempts });
            }
        };
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Invocation payload
// ────────────────────────────────────────────────────────────────────────────

/// Builds the provider-agnostic prompt for one attempt.
///
/// `feedback` is the previous attempt's failure messages; it is omitted when empty.
pub fn build_selection_invocation(
    profile: &Profile,
    job: &JobDocument,
    feedback: &[String],
    max_job_chars: usize,
) -> LlmInvocation {
    let excerpt: String = job.cleaned_text.chars().take(max_job_chars).collect();
    let keywords: Vec<&String> = job.keywords.iter().take(MAX_PROMPT_KEYWORDS).collect();

    let mut payload = json!({
        "task": SELECTION_TASK,
        "allowed_values": allowed_values(profile),
        "profile": profile_summary(profile),
        "job": {
            "keywords": keywords,
            "cleaned_text_excerpt": excerpt,
        },
        "output_template": {
            "selected_experience_ids": ["exp_id_1"],
            "selected_project_ids": ["proj_id_1"],
            "selected_education_ids": ["edu_id_1"],
            "selected_skill_labels": ["Languages"],
            "bullet_overrides": {"exp_id_1": ["Optional rewritten bullet"]},
            "section_order": SECTION_TITLES,
        },
    });

    if !feedback.is_empty() {
        payload["retry_feedback"] = json!(feedback);
    }

    let user_prompt =
        serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());

    LlmInvocation {
        system_prompt: format!(
            "{SELECTION_SYSTEM} {JSON_ONLY_SYSTEM}\n\n{NO_INVENTION_INSTRUCTION}\n\n{SELECTION_RULES}"
        ),
        user_prompt,
    }
}

fn allowed_values(profile: &Profile) -> Value {
    json!({
        "experience_ids": profile.experience_ids(),
        "project_ids": profile.project_ids(),
        "education_ids": profile.education_ids(),
        "skill_labels": profile.skill_labels(),
        "section_order_titles": SECTION_TITLES,
    })
}

fn profile_summary(profile: &Profile) -> Value {
    json!({
        "meta": {
            "name": profile.meta.name,
            "headline": profile.meta.headline,
            "location": profile.meta.location,
        },
        "experience": profile.experience.iter().map(|e| json!({
            "id": e.id,
            "company": e.company,
            "position": e.position,
            "summary": e.summary,
            "highlights": e.highlights,
            "tags": e.tags,
        })).collect::<Vec<_>>(),
        "projects": profile.projects.iter().map(|p| json!({
            "id": p.id,
            "name": p.name,
            "summary": p.summary,
            "highlights": p.highlights,
            "tags": p.tags,
        })).collect::<Vec<_>>(),
        "education": profile.education.iter().map(|e| json!({
            "id": e.id,
            "institution": e.institution,
            "area": e.area,
            "degree": e.degree,
            "summary": e.summary,
            "highlights": e.highlights,
            "tags": e.tags,
        })).collect::<Vec<_>>(),
        "skills": profile.skills.iter().map(|s| json!({
            "label": s.label,
            "details": s.details,
        })).collect::<Vec<_>>(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

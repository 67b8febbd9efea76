//! Selection Validator: referential checks of a `SelectionPlan` against a `Profile`.
//!
//! Every check runs; errors accumulate and are reported together. Read-only over both
//! inputs.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::profile::Profile;
use crate::models::selection::SelectionPlan;

/// A single problem found in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Strict-mode failure carrying every error found, never just the first.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Selection plan failed validation.")]
pub struct ValidationFailure {
    pub errors: Vec<ValidationError>,
}

impl ValidationFailure {
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

/// Validates `plan` against `profile`.
///
/// Non-strict mode always returns `Ok` with the (possibly empty) error list. Strict mode
/// returns `Err(ValidationFailure)` when any error was found.
pub fn validate_selection(
    profile: &Profile,
    plan: &SelectionPlan,
    strict: bool,
) -> Result<Vec<ValidationError>, ValidationFailure> {
    let errors = collect_selection_errors(profile, plan);
    if strict && !errors.is_empty() {
        return Err(ValidationFailure { errors });
    }
    Ok(errors)
}

/// Runs every check and returns all errors in a stable order:
/// experience, projects, education, skills, bullet overrides, emptiness.
pub fn collect_selection_errors(profile: &Profile, plan: &SelectionPlan) -> Vec<ValidationError> {
    let experience_ids = profile.experience_ids();
    let project_ids = profile.project_ids();
    let education_ids = profile.education_ids();
    let skill_labels = profile.skill_labels();

    let entry_ids: HashSet<&str> = experience_ids
        .iter()
        .chain(&project_ids)
        .chain(&education_ids)
        .copied()
        .collect();

    unknown_values(&plan.selected_experience_ids, &experience_ids, "experience id")
        .chain(unknown_values(&plan.selected_project_ids, &project_ids, "projects id"))
        .chain(unknown_values(
            &plan.selected_education_ids,
            &education_ids,
            "education id",
        ))
        .chain(unknown_values(&plan.selected_skill_labels, &skill_labels, "skills label"))
        .chain(
            plan.bullet_overrides
                .keys()
                .filter(|id| !entry_ids.contains(id.as_str()))
                .map(|id| ValidationError::new(format!("Unknown bullet_overrides id: '{id}'."))),
        )
        .chain(empty_resume_error(profile, plan))
        .collect()
}

fn unknown_values<'a>(
    provided: &'a [String],
    known: &[&str],
    kind: &'a str,
) -> impl Iterator<Item = ValidationError> + 'a {
    let known: HashSet<String> = known.iter().map(|k| k.to_string()).collect();
    provided
        .iter()
        .filter(move |value| !known.contains(value.as_str()))
        .map(move |value| ValidationError::new(format!("Unknown {kind}: '{value}'.")))
}

/// An empty explicit selection means "everything in the category", so the resume is only
/// empty when every category is empty in both the plan and the profile. Profile entries
/// count even when they carry no id: the projector still renders them.
fn empty_resume_error(profile: &Profile, plan: &SelectionPlan) -> Option<ValidationError> {
    let nothing_selected = plan.selected_experience_ids.is_empty()
        && profile.experience.is_empty()
        && plan.selected_project_ids.is_empty()
        && profile.projects.is_empty()
        && plan.selected_education_ids.is_empty()
        && profile.education.is_empty()
        && plan.selected_skill_labels.is_empty()
        && profile.skills.is_empty();

    nothing_selected.then(|| ValidationError::new("Selection plan results in an empty resume."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::fixtures::*;

    fn plan_with_experience(ids: &[&str]) -> SelectionPlan {
        SelectionPlan {
            selected_experience_ids: ids.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn messages(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_known_experience_id_validates() {
        let profile = single_experience_profile();
        let plan = plan_with_experience(&["exp_1"]);
        assert_eq!(validate_selection(&profile, &plan, true), Ok(vec![]));
    }

    #[test]
    fn test_unknown_experience_id_yields_exactly_one_error() {
        let profile = single_experience_profile();
        let plan = plan_with_experience(&["missing_id"]);
        let errors = collect_selection_errors(&profile, &plan);
        assert_eq!(messages(&errors), vec!["Unknown experience id: 'missing_id'."]);
    }

    #[test]
    fn test_strict_mode_fails_with_full_list() {
        let profile = single_experience_profile();
        let plan = SelectionPlan {
            selected_experience_ids: vec!["nope".to_string()],
            selected_skill_labels: vec!["Cooking".to_string()],
            ..Default::default()
        };
        let failure = validate_selection(&profile, &plan, true).unwrap_err();
        assert_eq!(failure.errors.len(), 2);
        assert_eq!(failure.to_string(), "Selection plan failed validation.");
    }

    #[test]
    fn test_non_strict_mode_returns_errors_without_failing() {
        let profile = single_experience_profile();
        let plan = plan_with_experience(&["nope"]);
        let errors = validate_selection(&profile, &plan, false).unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("nope"));
    }

    #[test]
    fn test_all_categories_checked_without_short_circuit() {
        let profile = full_profile();
        let plan = SelectionPlan {
            selected_experience_ids: vec!["exp_1".to_string(), "exp_9".to_string()],
            selected_project_ids: vec!["proj_9".to_string()],
            selected_education_ids: vec!["edu_9".to_string()],
            selected_skill_labels: vec!["Languages".to_string(), "Cooking".to_string()],
            bullet_overrides: [("ghost".to_string(), vec!["x".to_string()])].into(),
            section_order: vec![],
        };
        let errors = collect_selection_errors(&profile, &plan);
        assert_eq!(
            messages(&errors),
            vec![
                "Unknown experience id: 'exp_9'.",
                "Unknown projects id: 'proj_9'.",
                "Unknown education id: 'edu_9'.",
                "Unknown skills label: 'Cooking'.",
                "Unknown bullet_overrides id: 'ghost'.",
            ]
        );
    }

    #[test]
    fn test_ids_are_category_scoped() {
        let profile = full_profile();
        // proj_1 exists, but not as an experience.
        let plan = plan_with_experience(&["proj_1"]);
        let errors = collect_selection_errors(&profile, &plan);
        assert_eq!(messages(&errors), vec!["Unknown experience id: 'proj_1'."]);
    }

    #[test]
    fn test_bullet_overrides_accept_any_entry_category() {
        let profile = full_profile();
        let plan = SelectionPlan {
            bullet_overrides: [
                ("exp_2".to_string(), vec!["a".to_string()]),
                ("proj_1".to_string(), vec!["b".to_string()]),
                ("edu_1".to_string(), vec!["c".to_string()]),
            ]
            .into(),
            ..Default::default()
        };
        assert!(collect_selection_errors(&profile, &plan).is_empty());
    }

    #[test]
    fn test_entries_without_ids_never_match() {
        let mut profile = empty_profile();
        profile.experience = vec![experience(None)];
        let plan = SelectionPlan {
            bullet_overrides: [(String::new(), vec!["a".to_string()])].into(),
            ..Default::default()
        };
        let errors = collect_selection_errors(&profile, &plan);
        assert_eq!(messages(&errors), vec!["Unknown bullet_overrides id: ''."]);
    }

    #[test]
    fn test_empty_plan_and_empty_profile_is_empty_resume() {
        let errors = collect_selection_errors(&empty_profile(), &SelectionPlan::default());
        assert_eq!(
            messages(&errors),
            vec!["Selection plan results in an empty resume."]
        );
    }

    #[test]
    fn test_empty_plan_means_unrestricted() {
        let profile = Profile {
            skills: vec![skill("Languages")],
            ..empty_profile()
        };
        assert!(collect_selection_errors(&profile, &SelectionPlan::default()).is_empty());
    }

    #[test]
    fn test_idless_entries_still_count_as_content() {
        let profile = Profile {
            experience: vec![experience(None)],
            ..empty_profile()
        };
        assert!(collect_selection_errors(&profile, &SelectionPlan::default()).is_empty());
    }
}

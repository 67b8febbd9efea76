use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Section titles a plan may use in `section_order`.
pub const SECTION_TITLES: [&str; 4] = ["Experience", "Projects", "Education", "Skills"];

/// Which profile entries go into a tailored resume.
///
/// Every field is optional on the wire. An empty selection list for a category means
/// "no explicit restriction", not "exclude the category".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionPlan {
    /// Experience entry ids to include.
    #[serde(default)]
    pub selected_experience_ids: Vec<String>,
    /// Project entry ids to include.
    #[serde(default)]
    pub selected_project_ids: Vec<String>,
    /// Education entry ids to include.
    #[serde(default)]
    pub selected_education_ids: Vec<String>,
    /// Skill labels to include.
    #[serde(default)]
    pub selected_skill_labels: Vec<String>,
    /// Rewritten bullets keyed by experience/project/education id.
    #[serde(default)]
    pub bullet_overrides: BTreeMap<String, Vec<String>>,
    /// Preferred section ordering.
    #[serde(default)]
    pub section_order: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_a_valid_plan() {
        let plan: SelectionPlan = serde_json::from_str("{}").unwrap();
        assert_eq!(plan, SelectionPlan::default());
    }

    #[test]
    fn test_plan_deserializes_all_fields() {
        let json = r#"{
            "selected_experience_ids": ["exp_1"],
            "selected_skill_labels": ["Languages"],
            "bullet_overrides": {"exp_1": ["Cut p99 latency by 40%"]},
            "section_order": ["Experience", "Skills"]
        }"#;
        let plan: SelectionPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.selected_experience_ids, vec!["exp_1"]);
        assert!(plan.selected_project_ids.is_empty());
        assert_eq!(plan.bullet_overrides["exp_1"].len(), 1);
        assert_eq!(plan.section_order, vec!["Experience", "Skills"]);
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let json = r#"{"selected_experience_ids": "exp_1"}"#;
        assert!(serde_json::from_str::<SelectionPlan>(json).is_err());
    }

    #[test]
    fn test_schema_names_every_field() {
        let schema = serde_json::to_value(schemars::schema_for!(SelectionPlan)).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for field in [
            "selected_experience_ids",
            "selected_project_ids",
            "selected_education_ids",
            "selected_skill_labels",
            "bullet_overrides",
            "section_order",
        ] {
            assert!(properties.contains_key(field), "schema is missing {field}");
        }
    }
}

// All LLM prompt constants for the Selection module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Role line of the selection system prompt.
pub const SELECTION_SYSTEM: &str = "You are an assistant that selects resume content \
    from a provided profile for a specific job.";

/// Hard rules for plan generation. Appended to the system prompt.
pub const SELECTION_RULES: &str = "Rules:
- Use only IDs and labels present in the provided allowed lists.
- If a section should include everything, you may omit that section's selection key.
- section_order may only use: Experience, Projects, Education, Skills.
- bullet_overrides keys must be valid entry IDs from experience/project/education.
- Keep bullet_overrides concise and tailored to the job description.
- When retry_feedback is present, fix every listed problem before answering.";

/// Task line placed at the top of the user payload.
pub const SELECTION_TASK: &str =
    "Select the most relevant profile items for this job and return JSON matching SelectionPlan.";

// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "Return only valid JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction that forbids identifiers the caller did not supply.
pub const NO_INVENTION_INSTRUCTION: &str = "\
    CRITICAL: You must never invent IDs or labels. \
    Use only values present in the provided allowed lists. \
    If a value is not listed, leave it out entirely.";

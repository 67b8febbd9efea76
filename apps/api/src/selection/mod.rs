// Selection: validates selection plans against a profile and drives the bounded
// generate-validate-retry loop that produces them.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod validator;

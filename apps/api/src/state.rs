use std::sync::Arc;

use crate::config::Config;
use crate::job::lexicon::Lexicon;
use crate::llm_client::provider::StructuredGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; empty when no lexicon file was found.
    pub lexicon: Arc<Lexicon>,
    /// Pluggable generation backend. Production: `LlmClient`.
    pub generator: Arc<dyn StructuredGenerator>,
}

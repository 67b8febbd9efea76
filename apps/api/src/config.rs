use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::job::DEFAULT_MAX_KEYWORDS;
use crate::llm_client::DEFAULT_MODEL;
use crate::selection::orchestrator::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_JOB_CHARS};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub llm_model: String,
    /// Explicit lexicon file. `None` means the bundled default location.
    pub lexicon_path: Option<PathBuf>,
    pub max_keywords: usize,
    pub max_attempts: u32,
    pub max_job_chars: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_attempts = parse_env("MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        if max_attempts < 1 {
            bail!("MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            lexicon_path: std::env::var("LEXICON_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            max_keywords: parse_env("MAX_KEYWORDS", DEFAULT_MAX_KEYWORDS)?,
            max_attempts,
            max_job_chars: parse_env("MAX_JOB_CHARS", DEFAULT_MAX_JOB_CHARS)?,
            port: parse_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional numeric variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number (got '{raw}')")),
        Err(_) => Ok(default),
    }
}

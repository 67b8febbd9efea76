// Job intake: cleans pasted job postings and extracts prioritized keywords.
// Deterministic, no LLM calls. Keywords feed the selection prompt.

pub mod handlers;
pub mod keywords;
pub mod lexicon;
pub mod normalizer;

use serde::{Deserialize, Serialize};

use crate::job::keywords::extract_keywords;
use crate::job::lexicon::Lexicon;
use crate::job::normalizer::clean_text;

/// Default cap on extracted keywords.
pub const DEFAULT_MAX_KEYWORDS: usize = 50;

/// A job posting after cleaning and keyword extraction. Built once per job input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDocument {
    pub raw_text: String,
    pub cleaned_text: String,
    /// Unique, highest priority first.
    pub keywords: Vec<String>,
}

/// Cleans `raw_text` and extracts up to `max_keywords` keywords.
pub fn extract_job(raw_text: &str, lexicon: &Lexicon, max_keywords: usize) -> JobDocument {
    let cleaned_text = clean_text(raw_text);
    let keywords = extract_keywords(&cleaned_text, lexicon, max_keywords);

    JobDocument {
        raw_text: raw_text.to_string(),
        cleaned_text,
        keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTING: &str = "
        Senior Rust Engineer
        Share Job
        You will build distributed systems in Rust and run them on Kubernetes.
        Contact hiring@example.com or see https://example.com/jobs/123 for details.
        Requirements: Rust, Kafka, PostgreSQL. Kafka experience a plus.
        Privacy Policy
    ";

    #[test]
    fn test_extract_job_keeps_raw_and_cleans() {
        let job = extract_job(POSTING, &Lexicon::default(), DEFAULT_MAX_KEYWORDS);
        assert_eq!(job.raw_text, POSTING);
        assert!(!job.cleaned_text.contains("Share Job"));
        assert!(!job.cleaned_text.contains("Privacy"));
        assert!(!job.cleaned_text.contains("hiring@example.com"));
        assert!(job.cleaned_text.len() <= job.raw_text.len());
    }

    #[test]
    fn test_extract_job_ranks_lexicon_terms_first() {
        let lexicon = Lexicon::from_terms(["kubernetes", "kafka", "distributed systems"]);
        let job = extract_job(POSTING, &lexicon, DEFAULT_MAX_KEYWORDS);
        assert_eq!(
            &job.keywords[..3],
            ["distributed systems", "kubernetes", "kafka"]
        );
        assert!(job.keywords.contains(&"rust".to_string()));
    }

    #[test]
    fn test_extract_job_respects_cap() {
        let job = extract_job(POSTING, &Lexicon::default(), 2);
        assert_eq!(job.keywords.len(), 2);
        assert_eq!(job.keywords[0], "rust");
    }
}

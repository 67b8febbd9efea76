//! Lexicon loading. A lexicon is a curated list of tech terms and phrases that keyword
//! extraction prefers over raw frequency.
//!
//! File format: one term per line, blank lines ignored, `#` at line start or after whitespace
//! starts a comment. Terms are compared lowercased with inner whitespace collapsed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

/// Default lexicon location, tried relative to the working directory and then the crate root.
pub const DEFAULT_LEXICON_PATH: &str = "resources/tech_lexicon.txt";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered, duplicate-free lexicon terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    terms: Vec<String>,
}

impl Lexicon {
    /// Loads the first existing candidate lexicon file.
    ///
    /// A missing lexicon is not an error: extraction falls back to frequency-only mode.
    pub fn load(path: Option<&Path>) -> Result<Self, LoadError> {
        for candidate in candidate_paths(path) {
            if candidate.is_file() {
                let lexicon = Self::from_file(&candidate)?;
                info!(
                    "Loaded lexicon with {} terms from {}",
                    lexicon.len(),
                    candidate.display()
                );
                return Ok(lexicon);
            }
        }

        warn!("No lexicon file found; keyword extraction will be frequency-only");
        Ok(Self::default())
    }

    /// Reads and parses a single lexicon file.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // Invalid UTF-8 sequences are dropped, not replaced.
        let content: String = String::from_utf8_lossy(&bytes)
            .chars()
            .filter(|&c| c != char::REPLACEMENT_CHARACTER)
            .collect();
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        Self::from_terms(content.lines().map(strip_comment))
    }

    /// Builds a lexicon from already-split terms. No comment handling is applied.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let terms = terms
            .into_iter()
            .map(|term| normalize_term(term.as_ref()))
            .filter(|term| !term.is_empty())
            .filter(|term| seen.insert(term.clone()))
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => vec![
            PathBuf::from(DEFAULT_LEXICON_PATH),
            Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_LEXICON_PATH),
        ],
    }
}

/// A `#` opens a comment at line start or after whitespace, so `c#` survives as a term.
fn strip_comment(line: &str) -> &str {
    let mut prev_is_space = true;
    for (i, c) in line.char_indices() {
        if c == '#' && prev_is_space {
            return &line[..i];
        }
        prev_is_space = c.is_whitespace();
    }
    line
}

fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let lexicon = Lexicon::parse(
            "# languages\n\nRust\nGo   # systems\n   \n# trailing comment only\nPython\n",
        );
        assert_eq!(lexicon.terms(), ["rust", "go", "python"]);
    }

    #[test]
    fn test_parse_normalizes_and_dedupes_in_order() {
        let lexicon = Lexicon::parse("Machine   Learning\nrust\nmachine learning\nRUST\nkafka\n");
        assert_eq!(lexicon.terms(), ["machine learning", "rust", "kafka"]);
    }

    #[test]
    fn test_hash_inside_term_is_not_a_comment() {
        let lexicon = Lexicon::parse("c#\nc++\nf# # functional\n#c\n");
        assert_eq!(lexicon.terms(), ["c#", "c++", "f#"]);
    }

    #[test]
    fn test_from_file_reads_terms() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "kubernetes  # orchestration").unwrap();
        writeln!(file, "node.js").unwrap();
        let lexicon = Lexicon::from_file(file.path()).unwrap();
        assert_eq!(lexicon.terms(), ["kubernetes", "node.js"]);
    }

    #[test]
    fn test_from_file_drops_invalid_utf8_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"kube\xffrnetes\n\xfe\xfekafka\n").unwrap();
        let lexicon = Lexicon::from_file(file.path()).unwrap();
        assert_eq!(lexicon.terms(), ["kubernetes", "kafka"]);
    }

    #[test]
    fn test_from_file_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(matches!(
            Lexicon::from_file(&missing),
            Err(LoadError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_with_missing_explicit_path_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lexicon = Lexicon::load(Some(&dir.path().join("absent.txt"))).unwrap();
        assert!(lexicon.is_empty());
    }

    #[test]
    fn test_load_default_finds_bundled_lexicon() {
        let lexicon = Lexicon::load(None).unwrap();
        assert!(lexicon.terms().iter().any(|t| t == "rust"));
    }

    #[test]
    fn test_from_terms_normalizes() {
        let lexicon = Lexicon::from_terms(["  Distributed  Systems ", "Rust", "rust", "C#"]);
        assert_eq!(lexicon.terms(), ["distributed systems", "rust", "c#"]);
    }
}

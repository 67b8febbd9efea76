//! Keyword extraction from cleaned job text.
//!
//! Two sources, merged in priority order:
//! 1. Lexicon hits, ordered by where they first appear in the posting
//! 2. Frequent tokens the lexicon does not know about, with junk filtered out
//!
//! Pure and deterministic: the same text and lexicon always yield the same list.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::job::lexicon::Lexicon;

/// How many frequency-ranked tokens are considered before merging.
const MAX_FREQUENCY_CANDIDATES: usize = 80;

const MIN_TOKEN_CHARS: usize = 3;
const MAX_TOKEN_CHARS: usize = 32;
const MIN_VOWELLESS_ID_CHARS: usize = 12;

const STOPWORDS: &[&str] = &[
    "the",
    "and",
    "or",
    "to",
    "of",
    "in",
    "for",
    "with",
    "on",
    "at",
    "is",
    "are",
    "as",
    "an",
    "a",
    "by",
    "this",
    "that",
    "will",
    "be",
    "you",
    "your",
    "we",
    "our",
    "us",
    "from",
    "they",
    "their",
    "it",
    "about",
    "role",
    "team",
    "work",
    "working",
    "ability",
    "skills",
    "experience",
    "required",
    "preferred",
    "responsibilities",
    "qualifications",
    "including",
    "within",
    "across",
];

/// Generic words that survive stopword filtering but carry no signal.
const FILLER_WORDS: &[&str] = &["team", "work", "role", "great", "able"];

/// Short tech tokens that the junk heuristics would otherwise discard.
const ALLOWED_SHORT_TOKENS: &[&str] = &["k8s", "c++", "c#"];

/// Starts on a letter, continues through letters, digits and `+ # . - /` so that
/// `c++`, `ci/cd`, `node.js` and `react-native` stay whole.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z][a-z0-9+#./-]*").unwrap());

/// Ticket or requisition ids like `jr202518329`.
static ID_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]{1,2}\d{3,}$").unwrap());

/// Extracts up to `max_keywords` unique keywords from cleaned job text.
///
/// Lexicon hits always come first; frequency tokens fill the remaining slots.
pub fn extract_keywords(cleaned_text: &str, lexicon: &Lexicon, max_keywords: usize) -> Vec<String> {
    let text_lower = cleaned_text.to_lowercase();

    let lexicon_hits = find_lexicon_hits(&text_lower, lexicon);
    let frequency_tokens = frequency_keywords(&text_lower);

    let mut seen = HashSet::new();
    lexicon_hits
        .into_iter()
        .chain(frequency_tokens)
        .filter(|k| seen.insert(k.clone()))
        .take(max_keywords)
        .collect()
}

/// Returns lexicon terms present in the text, ordered by first occurrence.
///
/// Phrases (terms containing whitespace) use plain substring search. Single tokens must not
/// be glued to an ASCII letter or digit on either side; punctuation such as `.`, `+`, `#`
/// and `/` counts as a boundary so `c++` and `node.js` are found inside normal prose.
pub fn find_lexicon_hits(text_lower: &str, lexicon: &Lexicon) -> Vec<String> {
    let mut hits: Vec<(usize, &str)> = lexicon
        .terms()
        .iter()
        .filter(|term| !term.is_empty())
        .filter_map(|term| {
            let offset = if term.contains(char::is_whitespace) {
                text_lower.find(term.as_str())
            } else {
                find_bounded(text_lower, term)
            };
            offset.map(|o| (o, term.as_str()))
        })
        .collect();

    // Stable: terms at the same offset keep lexicon order.
    hits.sort_by_key(|(offset, _)| *offset);
    hits.into_iter().map(|(_, term)| term.to_string()).collect()
}

/// First offset where `term` occurs without an alphanumeric neighbour.
fn find_bounded(text: &str, term: &str) -> Option<usize> {
    let mut start = 0;
    while let Some(found) = text[start..].find(term) {
        let offset = start + found;
        let end = offset + term.len();

        let before_ok = !text[..offset]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        let after_ok = !text[end..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        if before_ok && after_ok {
            return Some(offset);
        }

        // Advance by one character so overlapping candidates are still considered.
        start = offset + text[offset..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Ranks surviving tokens by frequency, most common first. Ties keep first-seen order.
pub fn frequency_keywords(text_lower: &str) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for token in TOKEN_RE
        .find_iter(text_lower)
        .map(|m| m.as_str().trim_matches(['.', '_', '-', '/']))
        .filter(|t| keep_token(t))
    {
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // sort_by is stable, which preserves first-seen order within equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));

    order
        .into_iter()
        .take(MAX_FREQUENCY_CANDIDATES)
        .filter(|t| !FILLER_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

fn keep_token(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    if ALLOWED_SHORT_TOKENS.contains(&token) {
        return true;
    }
    if token.contains('@') || token.starts_with("http") || token.starts_with("www") {
        return false;
    }
    if STOPWORDS.contains(&token) {
        return false;
    }

    let len = token.chars().count();
    if !(MIN_TOKEN_CHARS..=MAX_TOKEN_CHARS).contains(&len) {
        return false;
    }

    !is_junk(token, len)
}

fn is_junk(token: &str, len: usize) -> bool {
    let numeric = token.chars().all(|c| c.is_ascii_digit());
    let vowelless_id =
        len >= MIN_VOWELLESS_ID_CHARS && !token.chars().any(|c| "aeiou".contains(c));
    numeric || ID_LIKE_RE.is_match(token) || vowelless_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon(terms: &[&str]) -> Lexicon {
        Lexicon::from_terms(terms)
    }

    #[test]
    fn test_lexicon_hits_ordered_by_first_occurrence() {
        let text = "we use kafka daily, rust for services, c++ for legacy and node.js for tooling";
        let hits = find_lexicon_hits(text, &lexicon(&["rust", "node.js", "c++", "kafka", "go"]));
        assert_eq!(hits, vec!["kafka", "rust", "c++", "node.js"]);
    }

    #[test]
    fn test_single_token_needs_alphanumeric_boundary() {
        let lex = lexicon(&["go"]);
        assert!(find_lexicon_hits("google cloud and mongodb", &lex).is_empty());
        assert_eq!(find_lexicon_hits("google cloud, go services", &lex), vec!["go"]);
    }

    #[test]
    fn test_punctuation_counts_as_boundary() {
        let lex = lexicon(&["c#", "ci/cd"]);
        let hits = find_lexicon_hits("(c#) and ci/cd.", &lex);
        assert_eq!(hits, vec!["c#", "ci/cd"]);
    }

    #[test]
    fn test_phrase_uses_substring_search() {
        let lex = lexicon(&["machine learning", "rust"]);
        let hits = find_lexicon_hits("rust for applied machine learning pipelines", &lex);
        assert_eq!(hits, vec!["rust", "machine learning"]);
    }

    #[test]
    fn test_frequency_orders_by_count_then_first_seen() {
        let tokens = frequency_keywords("postgres kafka rust rust kafka rust terraform");
        assert_eq!(tokens, vec!["rust", "kafka", "postgres", "terraform"]);
    }

    #[test]
    fn test_frequency_drops_stopwords_and_filler() {
        let tokens = frequency_keywords("the team will work with great people and able rust");
        assert_eq!(tokens, vec!["people", "rust"]);
    }

    #[test]
    fn test_frequency_drops_ids_and_random_strings() {
        let tokens = frequency_keywords("jr202518329 xkcdqwrtzplsm grpc backend");
        assert_eq!(tokens, vec!["grpc", "backend"]);
    }

    #[test]
    fn test_allow_listed_tech_tokens_survive() {
        let tokens = frequency_keywords("k8s c++ c# go");
        assert_eq!(tokens, vec!["k8s", "c++", "c#"]);
    }

    #[test]
    fn test_trailing_punctuation_is_stripped() {
        let tokens = frequency_keywords("rust. rust- ci/cd/ react-native");
        assert_eq!(tokens, vec!["rust", "ci/cd", "react-native"]);
    }

    #[test]
    fn test_overlong_tokens_are_dropped() {
        let long = "a".repeat(MAX_TOKEN_CHARS + 1);
        let tokens = frequency_keywords(&format!("{long} rust"));
        assert_eq!(tokens, vec!["rust"]);
    }

    #[test]
    fn test_lexicon_hits_precede_frequency_tokens() {
        let text = "Backend backend backend engineer with Rust and Kafka";
        let keywords = extract_keywords(text, &lexicon(&["kafka", "rust"]), 10);
        assert_eq!(keywords, vec!["rust", "kafka", "backend", "engineer"]);
    }

    #[test]
    fn test_merge_dedupes_and_caps() {
        let text = "rust rust rust kafka kafka postgres redis grpc";
        let keywords = extract_keywords(text, &lexicon(&["kafka"]), 3);
        assert_eq!(keywords, vec!["kafka", "rust", "postgres"]);
    }

    #[test]
    fn test_no_lexicon_falls_back_to_frequency() {
        let keywords = extract_keywords("Distributed systems engineer", &Lexicon::default(), 50);
        assert_eq!(keywords, vec!["distributed", "systems", "engineer"]);
    }

    #[test]
    fn test_zero_cap_yields_nothing() {
        assert!(extract_keywords("rust kafka", &lexicon(&["rust"]), 0).is_empty());
    }

    #[test]
    fn test_keywords_never_repeat() {
        let text = "Rust rust RUST node.js Node.js kafka streams kafka";
        let keywords = extract_keywords(text, &lexicon(&["node.js", "kafka"]), 50);
        let unique: HashSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
    }
}

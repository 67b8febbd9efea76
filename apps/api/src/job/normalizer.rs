//! Text normalizer: strips page chrome and contact artifacts from pasted job text.
//!
//! Works line by line; no attempt is made to find sections. Lines that look like
//! navigation, cookie banners, or legal footers are dropped whole. Emails and URLs are
//! cut out of otherwise useful lines.

use std::sync::LazyLock;

use regex::Regex;

/// Lines of this many characters or fewer are treated as navigation ("OK", "Top").
const MAX_CHROME_LINE_CHARS: usize = 3;

/// Boilerplate phrases. A line containing any of them is dropped.
const NOISE_PHRASES: &[&str] = &[
    "cookie",
    "privacy",
    "terms",
    "equal opportunity",
    "all qualified applicants",
    "accessibility",
    "all rights reserved",
    "subscribe",
    "sign up",
    "get notified",
    "accept all",
    "more options",
    "share job",
    "save job",
    "apply now",
    "back to",
    "view all",
    "fraudulent",
    "site map",
];

static NOISE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = NOISE_PHRASES
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
});

pub(crate) static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[\w.-]+@[\w.-]+\.\w+\b").unwrap());

pub(crate) static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bhttps?://\S+|\bwww\.\S+").unwrap());

/// Every character that ends a line, including bare `\r` and the Unicode line and paragraph
/// separators. `\r\n` splits into an empty piece that the blank-line filter drops.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Cleans raw job text into a single line suitable for tokenization.
///
/// Never fails; arbitrary input yields a possibly empty string.
pub fn clean_text(raw: &str) -> String {
    let text = raw.replace(['\u{200b}', '\u{feff}'], " ");

    let kept: Vec<String> = text
        .split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| line.chars().count() > MAX_CHROME_LINE_CHARS)
        .filter(|line| !NOISE_LINE_RE.is_match(line))
        .map(strip_contact_artifacts)
        .collect();

    WHITESPACE_RE
        .replace_all(&kept.join(" "), " ")
        .trim()
        .to_string()
}

fn strip_contact_artifacts(line: &str) -> String {
    let without_email = EMAIL_RE.replace_all(line, " ");
    URL_RE.replace_all(&without_email, " ").into_owned()
}

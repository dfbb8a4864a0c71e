//! Text normalization for headings and passages
//!
//! Two families of cleanup live here:
//!
//! - [`normalize_punctuation`] and [`strip_inline_bold`] turn a markdown heading line into
//!   plain ASCII-punctuated heading text (typographic quotes and dashes, inline code,
//!   bold markers, glued page numbers and dot leaders).
//! - [`clean_text`] turns a raw passage extracted from a PDF into a single readable
//!   line (ligatures, bullets, markdown emphasis, hard line breaks).

use regex::Regex;
use std::sync::LazyLock;

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static BOLD_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_?\*\*(.*?)\*\*_?").unwrap());
static TRAILING_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+$").unwrap());
static PUNCTUATION_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[.\-,"=]{2,}"#).unwrap());

static HASH_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#+").unwrap());
static STRONG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static UNDERSCORE_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ ]{2,}").unwrap());
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\n+\s*").unwrap());

const PUNCTUATION: [(&str, &str); 7] = [
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
    ("\u{2013}", "-"),
    ("\u{2014}", "-"),
    ("\u{2026}", "..."),
];

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "ft"),
    ("\u{FB06}", "st"),
];

// Real bullet, its escaped spelling as found in some extractions, and its UTF-8/cp1252 mojibake.
const BULLETS: [&str; 3] = ["\u{2022}", "\\u2022", "\u{E2}\u{20AC}\u{A2}"];

/// Replace typographic quotes, dashes and ellipses with ASCII equivalents
pub fn normalize_punctuation(s: &str) -> String {
    PUNCTUATION
        .iter()
        .fold(s.to_string(), |acc, &(from, to)| acc.replace(from, to))
}

/// Reduce a markdown heading body to its plain text
///
/// Removes inline code and bold markers, a trailing page number, runs of leader
/// punctuation (`....`, `----`, `==`) and redundant whitespace.
pub fn strip_inline_bold(s: &str) -> String {
    let s = normalize_punctuation(s);
    let s = INLINE_CODE.replace_all(&s, "$1").replace('`', "");
    let s = BOLD_MARKERS.replace_all(&s, "$1");
    let s = TRAILING_NUMBER.replace(&s, "");
    let s = PUNCTUATION_RUN.replace_all(&s, "");
    collapse_whitespace(&s)
}

/// Clean a raw PDF passage into one readable sentence run
///
/// Cleanup repeats until the text stops changing, so nested markup (`-..`, `a__b__c`)
/// is fully removed and cleaning the result again is a no-op.
pub fn clean_text(text: &str) -> String {
    let mut current = clean_pass(text);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let mut text = LIGATURES
        .iter()
        .fold(text.to_string(), |acc, &(from, to)| acc.replace(from, to));

    for bullet in BULLETS {
        text = text.replace(bullet, "-");
    }
    text = text
        .replace("-.", "-")
        .replace('\u{2019}', "'")
        .replace('\u{201C}', "\"")
        .replace('\u{201D}', "\"");

    let text = HASH_RUN.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = STRONG.replace_all(&text, "$1");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = UNDERSCORE_EMPHASIS.replace_all(&text, "$1");
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = LINE_BREAKS.replace_all(&text, " ");

    let joined = text
        .split(". ")
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(". ");

    capitalize_first(joined.trim_matches(|c| c == ' ' || c == '.'))
}

/// Whether text starts with a lowercase ASCII letter
///
/// Heading candidates that do are treated as wrapped body text.
pub fn starts_lowercase(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

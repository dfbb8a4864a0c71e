//! Heading detection over page markdown
//!
//! Pages come from [`crate::indexer::extract_page_chunks`] as markdown with `#` markers.
//! Headings are read off those markers (and off whole-line bold text), cleaned with
//! [`strip_inline_bold`], and merged with the PDF's own bookmarks. Candidates that start
//! with a lowercase letter are dropped as wrapped body text.

mod collection;

pub use collection::{
    CollectionOutcome, ProcessingSummary, output_file_name, process_all_collections,
    process_collection, process_named_collection,
};

use crate::indexer::{PageChunk, extract_page_chunks};
use crate::normalize::{normalize_punctuation, starts_lowercase, strip_inline_bold};
use crate::types::{DocumentOutline, HeadingLevel, OutlineEntry};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

/// Title used when no page has a usable `#` line
pub const UNTITLED: &str = "Untitled";

static SEPARATOR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[.\-*,="']{2,}\s*$"#).unwrap());
static BOLD_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^_?\*\*(.*?)\*\*_?$").unwrap());

const HEADING_MARKERS: [(&str, HeadingLevel); 4] = [
    ("# ", HeadingLevel::H1),
    ("## ", HeadingLevel::H1),
    ("### ", HeadingLevel::H2),
    ("#### ", HeadingLevel::H3),
];

/// Classify one trimmed, punctuation-normalized markdown line
///
/// Returns the level and cleaned heading text, which may be empty. Lines with five or
/// more `#` are body text.
pub fn classify_heading(line: &str) -> Option<(HeadingLevel, String)> {
    for (marker, level) in HEADING_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some((level, strip_inline_bold(rest.trim())));
        }
    }

    if BOLD_LINE.is_match(line) {
        return Some((HeadingLevel::H3, strip_inline_bold(line)));
    }

    None
}

/// Detect the headings of one page of markdown
///
/// `page_index` is 0-based; entries carry the 1-based page number.
pub fn parse_markdown_outline(markdown: &str, page_index: usize) -> Vec<OutlineEntry> {
    markdown
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if SEPARATOR_LINE.is_match(trimmed) {
                return None;
            }

            let (level, text) = classify_heading(&normalize_punctuation(trimmed))?;
            if text.is_empty() || starts_lowercase(&text) {
                return None;
            }

            Some(OutlineEntry {
                level,
                text,
                page: page_index + 1,
            })
        })
        .collect()
}

/// Find the document title and the full outline across all pages
pub fn extract_outline_and_title(pages: &[PageChunk]) -> DocumentOutline {
    let title = find_title(pages).unwrap_or_else(|| UNTITLED.to_string());

    let mut outline = Vec::new();
    for (idx, page) in pages.iter().enumerate() {
        let mut entries = parse_markdown_outline(&page.text, idx);
        let mut seen: HashSet<String> = entries.iter().map(|e| e.text.clone()).collect();

        for item in &page.toc_items {
            let text = strip_inline_bold(&item.title);
            if text.is_empty() || starts_lowercase(&text) || seen.contains(&text) {
                continue;
            }
            seen.insert(text.clone());
            entries.push(OutlineEntry {
                level: HeadingLevel::from_depth(item.level),
                text,
                page: idx + 1,
            });
        }

        outline.extend(entries);
    }

    DocumentOutline { title, outline }
}

fn find_title(pages: &[PageChunk]) -> Option<String> {
    pages
        .iter()
        .flat_map(|page| page.text.lines())
        .filter_map(|line| {
            let line = normalize_punctuation(line.trim());
            line.strip_prefix("# ")
                .map(|rest| strip_inline_bold(rest.trim()))
        })
        .find(|candidate| !candidate.is_empty() && !starts_lowercase(candidate))
}

/// Extract the title and outline of a PDF
pub fn extract_outline_from_pdf(path: &Path) -> Result<DocumentOutline> {
    let pages = extract_page_chunks(path)
        .with_context(|| format!("Failed to extract outline from {}", path.display()))?;

    let outline = extract_outline_and_title(&pages);
    tracing::debug!(
        "{}: title '{}', {} headings",
        path.display(),
        outline.title,
        outline.outline.len()
    );
    Ok(outline)
}

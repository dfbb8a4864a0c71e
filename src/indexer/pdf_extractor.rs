use crate::error::ExtractionError;
use anyhow::Result;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

// "1 Overview", "2.3 Scope", "4.1.2. Details"
static NUMBERED_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+){0,3})\.?\s+[A-Z]").unwrap());

/// One PDF page rendered as markdown, with the bookmarks that point at it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageChunk {
    pub text: String,
    pub toc_items: Vec<TocItem>,
}

/// A PDF bookmark entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    /// Nesting depth, 1 for top-level bookmarks
    pub level: usize,
    pub title: String,
}

/// Extract the raw text of every page of a PDF
pub fn extract_pages(path: &Path) -> Result<Vec<String>> {
    let file = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| ExtractionError::ReadFailed {
        file: file.clone(),
        reason: e.to_string(),
    })?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
        ExtractionError::TextFailed {
            file,
            reason: e.to_string(),
        }
    })?;

    tracing::debug!("Extracted {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

/// Read the document outline (bookmarks) as `(page, item)` pairs
///
/// PDFs without bookmarks, or with an unreadable outline tree, yield an empty list.
pub fn extract_toc(path: &Path) -> Vec<(usize, TocItem)> {
    let document = match lopdf::Document::load(path) {
        Ok(document) => document,
        Err(e) => {
            tracing::debug!("Could not load {} for bookmarks: {}", path.display(), e);
            return Vec::new();
        }
    };

    match document.get_toc() {
        Ok(toc) => {
            for error in &toc.errors {
                tracing::debug!("Bookmark issue in {}: {}", path.display(), error);
            }
            toc.toc
                .into_iter()
                .map(|entry| {
                    (
                        entry.page,
                        TocItem {
                            level: entry.level,
                            title: entry.title,
                        },
                    )
                })
                .collect()
        }
        Err(e) => {
            tracing::debug!("No bookmarks in {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Extract a PDF as per-page markdown plus bookmarks
pub fn extract_page_chunks(path: &Path) -> Result<Vec<PageChunk>> {
    let pages = extract_pages(path)?;
    let toc = extract_toc(path);

    let chunks = pages
        .iter()
        .enumerate()
        .map(|(idx, text)| PageChunk {
            text: format_as_markdown(text, idx == 0),
            toc_items: toc
                .iter()
                .filter(|(page, _)| *page == idx + 1)
                .map(|(_, item)| item.clone())
                .collect(),
        })
        .collect();

    Ok(chunks)
}

/// Format extracted page text as Markdown
///
/// Adds heading markers and table rows to the plain text layout. On the first page the
/// leading title-like line becomes the `#` document title.
pub fn format_as_markdown(text: &str, first_page: bool) -> String {
    let mut markdown = String::new();
    let mut in_table = false;
    let mut awaiting_title = first_page;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if in_table {
                markdown.push('\n');
                in_table = false;
            }
            markdown.push('\n');
            continue;
        }

        if is_likely_table_row(trimmed) {
            if !in_table {
                markdown.push_str(&format_table_row(trimmed));
                markdown.push('\n');
                markdown.push_str(&create_table_separator(trimmed));
                markdown.push('\n');
                in_table = true;
            } else {
                markdown.push_str(&format_table_row(trimmed));
                markdown.push('\n');
            }
            continue;
        }

        if in_table {
            markdown.push('\n');
            in_table = false;
        }

        if awaiting_title {
            awaiting_title = false;
            if is_likely_title(trimmed) {
                markdown.push_str(&format!("# {}\n\n", trimmed));
                continue;
            }
        }

        if let Some(depth) = numbered_section_depth(trimmed) {
            let marker = "#".repeat((depth + 1).min(4));
            markdown.push_str(&format!("{} {}\n\n", marker, trimmed));
        } else if is_likely_heading(trimmed) {
            let level = if trimmed.len() < 30 { "##" } else { "###" };
            markdown.push_str(&format!("{} {}\n\n", level, trimmed.trim_end_matches(':')));
        } else {
            markdown.push_str(trimmed);
            markdown.push('\n');
        }
    }

    markdown
}

/// Check if a line looks like a table row
fn is_likely_table_row(line: &str) -> bool {
    // 3+ columns separated by tabs or runs of spaces
    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() >= 3 {
        return line.contains('\t') || line.contains("  ");
    }
    false
}

/// Format a line as a markdown table row
fn format_table_row(line: &str) -> String {
    format!("| {} |", split_columns(line).join(" | "))
}

/// Create a markdown table separator
fn create_table_separator(header: &str) -> String {
    let separators = vec!["---"; split_columns(header).len()];
    format!("| {} |", separators.join(" | "))
}

fn split_columns(line: &str) -> Vec<&str> {
    if line.contains('\t') {
        line.split('\t').map(str::trim).collect()
    } else {
        line.split("  ")
            .filter(|s| !s.trim().is_empty())
            .map(str::trim)
            .collect()
    }
}

/// Check if the first line of a document reads like its title
fn is_likely_title(line: &str) -> bool {
    let starts_well = line
        .chars()
        .next()
        .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit());
    let alpha_count = line.chars().filter(|c| c.is_alphabetic()).count();

    starts_well && alpha_count >= 2 && line.chars().count() < 100 && !line.ends_with('.')
}

/// Numbering depth of a section heading such as "2.1 Scope", if the line is one
fn numbered_section_depth(line: &str) -> Option<usize> {
    if line.len() >= 80 || line.ends_with('.') {
        return None;
    }
    NUMBERED_SECTION
        .captures(line)
        .map(|caps| caps[1].split('.').count())
}

/// Check if a line looks like a heading
fn is_likely_heading(line: &str) -> bool {
    let uppercase_count = line.chars().filter(|c| c.is_uppercase()).count();
    let alpha_count = line.chars().filter(|c| c.is_alphabetic()).count();

    // Mostly uppercase
    if alpha_count >= 2 {
        let uppercase_ratio = uppercase_count as f64 / alpha_count as f64;
        if uppercase_ratio > 0.8 && line.len() < 100 {
            return true;
        }
    }

    // Section labels ending with a colon
    line.ends_with(':') && line.len() < 80 && !line.contains("://")
}

use super::TextChunk;
use super::chunker::TextSplitter;
use super::pdf_extractor::extract_pages;
use crate::error::ExtractionError;
use crate::types::ChunkMetadata;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the PDF files directly inside `dir`, sorted by file name
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ExtractionError::DirectoryNotFound(dir.display().to_string()).into());
    }

    let mut pdfs = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if entry.file_type().is_file() && has_pdf_extension(entry.path()) {
            pdfs.push(entry.into_path());
        }
    }

    Ok(pdfs)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
}

/// Extract every PDF in `data_path` page by page and split the pages into chunks
///
/// Each chunk is cut after its last full stop so passages end on a sentence boundary.
pub fn load_and_split_documents(data_path: &Path, splitter: &TextSplitter) -> Result<Vec<TextChunk>> {
    let mut chunks = Vec::new();

    for pdf in list_pdfs(data_path)? {
        let source = pdf
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let pages = extract_pages(&pdf)
            .with_context(|| format!("Failed to load {}", pdf.display()))?;

        let before = chunks.len();
        for (idx, page_text) in pages.iter().enumerate() {
            chunks.extend(split_page(&source, idx + 1, page_text, splitter));
        }

        tracing::info!(
            "Loaded {} ({} pages, {} chunks)",
            source,
            pages.len(),
            chunks.len() - before
        );
    }

    Ok(chunks)
}

/// Split one page into chunks tagged with their source and page
pub fn split_page(source: &str, page: usize, text: &str, splitter: &TextSplitter) -> Vec<TextChunk> {
    splitter
        .split_text(text)
        .into_iter()
        .map(|content| TextChunk {
            content: truncate_after_last_period(&content).to_string(),
            metadata: ChunkMetadata {
                source: source.to_string(),
                page,
                id: String::new(),
            },
        })
        .collect()
}

/// Cut text right after its last `.`; text without one is returned whole
pub fn truncate_after_last_period(text: &str) -> &str {
    match text.rfind('.') {
        Some(idx) => &text[..=idx],
        None => text,
    }
}

/// Assign `source:page:n` ids, numbering consecutive chunks of the same page from 0
pub fn calculate_chunk_ids(chunks: &mut [TextChunk]) {
    let mut last_key: Option<String> = None;
    let mut index = 0usize;

    for chunk in chunks.iter_mut() {
        let key = format!("{}:{}", chunk.metadata.source, chunk.metadata.page);
        index = if last_key.as_deref() == Some(key.as_str()) {
            index + 1
        } else {
            0
        };
        chunk.metadata.id = format!("{}:{}", key, index);
        last_key = Some(key);
    }
}

//! PDF extraction and text chunking
//!
//! Turns PDF pages into markdown with heading markers for the outline flow, and into
//! size-bounded text chunks for the embedding flow.

mod chunker;
mod loader;
mod pdf_extractor;

pub use chunker::{DEFAULT_SEPARATORS, TextSplitter};
pub use loader::{
    calculate_chunk_ids, list_pdfs, load_and_split_documents, split_page,
    truncate_after_last_period,
};
pub use pdf_extractor::{
    PageChunk, TocItem, extract_page_chunks, extract_pages, extract_toc, format_as_markdown,
};

use crate::types::ChunkMetadata;

/// A passage of page text ready for embedding
#[derive(Debug, Clone)]
pub struct TextChunk {
    pub content: String,
    /// Source file, page and id of this chunk
    pub metadata: ChunkMetadata,
}

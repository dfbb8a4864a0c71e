//! # doc-intel - Persona-Driven Document Intelligence
//!
//! Turns collections of PDFs into structured JSON for a persona/job-to-be-done
//! challenge.
//!
//! ## Overview
//!
//! Two independent flows share the PDF extraction and text cleanup code:
//!
//! - **Outline extraction** (`doc-outline`): each page is rendered as markdown with
//!   heading markers, headings are detected with pattern rules and merged with the
//!   PDF's bookmarks, and every collection gets a ranked section list.
//! - **Semantic search** (`doc-search`): page text is split into overlapping chunks,
//!   embedded locally with FastEmbed, stored in an embedded LanceDB index, and the
//!   passages nearest to the persona's query are reported.
//!
//! ## Architecture
//!
//! ```text
//!                 PDFs
//!                  │
//!          ┌───────▼────────┐
//!          │    indexer     │  pages, markdown, bookmarks, chunks
//!          └───┬────────┬───┘
//!              │        │
//!     ┌────────▼──┐  ┌──▼──────────┐
//!     │  outline  │  │   search    │
//!     └────────┬──┘  └──┬───────┬──┘
//!              │        │       │
//!              │   ┌────▼───┐ ┌─▼───────┐
//!              │   │FastEmb │ │LanceDB  │
//!              │   └────────┘ └─────────┘
//!              ▼        ▼
//!          outline    search
//!           JSON       JSON
//! ```
//!
//! ## Modules
//!
//! - [`normalize`]: punctuation, ligature and markdown cleanup
//! - [`outline`]: heading classification and collection processing
//! - [`indexer`]: PDF extraction, markdown conversion and chunking
//! - [`embedding`]: embedding generation using FastEmbed
//! - [`vector_db`]: vector index abstraction backed by LanceDB
//! - [`search`]: spec resolution, indexing and result formatting
//! - [`config`]: configuration with environment variable support
//! - [`types`]: challenge input and JSON report types
//! - [`error`]: error types
//! - [`paths`]: platform data, cache and config directories
//! - [`cli`]: argument parsing and logging setup for the binaries
//!
//! ## Usage Example
//!
//! ```no_run
//! use doc_intel::config::Config;
//! use doc_intel::search::{InputSource, SemanticSearch};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let search = SemanticSearch::new(Config::load(None)?)?;
//!
//!     let report = search
//!         .run(
//!             InputSource::Path("challenge1b_input.json".into()),
//!             Some(Path::new("outline.json")),
//!         )
//!         .await?;
//!
//!     for section in &report.extracted_sections {
//!         println!("{}. {} ({})", section.rank, section.section_title, section.document);
//!     }
//!     Ok(())
//! }
//! ```

/// Argument parsing and tracing setup for the binaries
pub mod cli;

/// Configuration management with environment variable overrides
pub mod config;

/// Embedding generation using FastEmbed
pub mod embedding;

/// Error types and utilities
pub mod error;

/// PDF extraction, page markdown and text chunking
pub mod indexer;

/// Text cleanup for headings and passages
pub mod normalize;

/// Heading detection and per-collection outline reports
pub mod outline;

/// Platform directories
pub mod paths;

/// Semantic search pipeline
pub mod search;

/// Challenge input and report types
pub mod types;

/// Vector database abstraction backed by LanceDB
pub mod vector_db;

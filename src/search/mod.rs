//! Semantic passage search over a folder of PDFs
//!
//! A run reads a challenge spec, rebuilds a LanceDB index from the PDFs next to it,
//! embeds a query derived from the spec and formats the nearest passages as a
//! [`SearchReport`].

use crate::config::Config;
use crate::embedding::{EmbeddingProvider, FastEmbedManager};
use crate::error::ValidationError;
use crate::indexer::{TextChunk, TextSplitter, calculate_chunk_ids, load_and_split_documents};
use crate::normalize::clean_text;
use crate::types::{
    ChallengeInput, RankedSection, SearchHit, SearchMetadata, SearchReport, SubsectionAnalysis,
};
use crate::vector_db::{LanceVectorDB, VectorDatabase};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Folders looked for next to the spec when it names no `data_path`
pub const DATA_DIR_CANDIDATES: [&str; 5] = ["data", "PDFs", "pdfs", "documents", "docs"];

/// Where the search spec comes from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// A JSON file; relative paths inside it resolve against its directory
    Path(PathBuf),
    /// An already parsed spec; relative paths resolve against the working directory
    Inline(ChallengeInput),
}

/// Read the spec and the directory its relative paths resolve against
pub fn load_spec(input: InputSource) -> Result<(ChallengeInput, PathBuf)> {
    match input {
        InputSource::Path(path) => {
            let path = std::path::absolute(&path)
                .with_context(|| format!("Invalid input path {}", path.display()))?;
            if !path.is_file() {
                return Err(ValidationError::InputNotFound(path.display().to_string()).into());
            }

            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let spec: ChallengeInput = serde_json::from_str(&content)
                .map_err(|e| ValidationError::InvalidSpec(format!("{}: {}", path.display(), e)))?;

            let spec_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((spec, spec_dir))
        }
        InputSource::Inline(spec) => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            Ok((spec, cwd))
        }
    }
}

/// The query text: `query` if given, else the trimmed challenge description
pub fn resolve_query(spec: &ChallengeInput) -> Result<String> {
    let query = spec
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .or_else(|| spec.description().map(str::trim).filter(|d| !d.is_empty()));

    query
        .map(str::to_string)
        .ok_or_else(|| ValidationError::MissingQuery.into())
}

/// The PDF folder: `data_path` if given, else the first existing conventional folder
pub fn resolve_data_path(spec: &ChallengeInput, spec_dir: &Path) -> PathBuf {
    if let Some(data_path) = spec.data_path.as_deref().filter(|p| !p.is_empty()) {
        return spec_dir.join(data_path);
    }

    DATA_DIR_CANDIDATES
        .iter()
        .map(|name| spec_dir.join(name))
        .find(|candidate| candidate.exists())
        .unwrap_or_else(|| spec_dir.join("data"))
}

/// The index folder: `persist_dir` if given, else the configured default
pub fn resolve_persist_dir(spec: &ChallengeInput, spec_dir: &Path, config: &Config) -> PathBuf {
    match spec.persist_dir.as_deref().filter(|p| !p.is_empty()) {
        Some(persist_dir) => spec_dir.join(persist_dir),
        None => config.vector_db.persist_dir.clone(),
    }
}

/// First non-blank line of a passage, trimmed
pub fn section_title(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// The leading `max_chars` of a passage, cut after its last full stop and cleaned
pub fn snippet(content: &str, max_chars: usize) -> String {
    let head: String = content.chars().take(max_chars).collect();
    let head = match head.rfind('.') {
        Some(idx) => &head[..=idx],
        None => head.as_str(),
    };
    clean_text(head)
}

/// Shape search hits into the report, ranked in hit order
pub fn format_report(spec: &ChallengeInput, hits: &[SearchHit], snippet_chars: usize) -> SearchReport {
    SearchReport {
        metadata: SearchMetadata {
            input_documents: spec.documents.iter().map(|d| d.base_name()).collect(),
            persona: spec.persona_role().unwrap_or_default().to_string(),
            job_to_be_done: spec.job_task().unwrap_or_default().to_string(),
        },
        extracted_sections: hits
            .iter()
            .enumerate()
            .map(|(idx, hit)| RankedSection {
                document: hit.source.clone(),
                section_title: section_title(&hit.content),
                rank: idx + 1,
            })
            .collect(),
        subsection_analysis: hits
            .iter()
            .map(|hit| SubsectionAnalysis {
                document: hit.source.clone(),
                text: snippet(&hit.content, snippet_chars),
            })
            .collect(),
    }
}

/// Runs the index-and-query pipeline with one embedding model
pub struct SemanticSearch {
    provider: Arc<dyn EmbeddingProvider>,
    config: Config,
}

impl SemanticSearch {
    /// Load the configured fastembed model
    pub fn new(config: Config) -> Result<Self> {
        let provider = FastEmbedManager::from_config(&config.embedding)
            .context("Failed to load embedding model")?;
        Ok(Self::with_provider(Arc::new(provider), config))
    }

    pub fn with_provider(provider: Arc<dyn EmbeddingProvider>, config: Config) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Index the spec's PDFs, search them, and optionally write the report as JSON
    pub async fn run(&self, input: InputSource, output: Option<&Path>) -> Result<SearchReport> {
        let (spec, spec_dir) = load_spec(input)?;

        let query = resolve_query(&spec)?;
        let data_path = resolve_data_path(&spec, &spec_dir);
        let persist_dir = resolve_persist_dir(&spec, &spec_dir, &self.config);

        if !data_path.exists() {
            return Err(ValidationError::DataDirNotFound(data_path.display().to_string()).into());
        }

        tracing::info!("Query: {}", query);
        tracing::info!("Loading PDFs from {}", data_path.display());

        let splitter = TextSplitter::new(
            self.config.chunking.chunk_size,
            self.config.chunking.chunk_overlap,
        );
        let chunks =
            tokio::task::spawn_blocking(move || load_and_split_documents(&data_path, &splitter))
                .await
                .context("Document loading task panicked")??;

        let db = self.build_index(chunks, &persist_dir).await?;
        let report = self.query_and_format(&db, &spec, &query).await?;

        if let Some(output) = output {
            write_report(&report, output)?;
        }

        Ok(report)
    }

    /// Recreate the index at `persist_dir` and fill it with the embedded chunks
    pub async fn build_index(
        &self,
        mut chunks: Vec<TextChunk>,
        persist_dir: &Path,
    ) -> Result<LanceVectorDB> {
        LanceVectorDB::reset(persist_dir)?;

        let db = LanceVectorDB::with_path(&persist_dir.to_string_lossy()).await?;
        db.initialize(self.provider.dimension()).await?;

        calculate_chunk_ids(&mut chunks);

        let batch_size = self.config.embedding.batch_size.max(1);
        let total_batches = chunks.len().div_ceil(batch_size);
        let mut stored = 0;

        for (batch_idx, batch) in chunks.chunks(batch_size).enumerate() {
            let texts: Vec<String> = batch.iter().map(|c| c.content.clone()).collect();

            let provider = self.provider.clone();
            let embeddings = tokio::task::spawn_blocking(move || provider.embed_batch(texts))
                .await
                .context("Embedding task panicked")?
                .context("Failed to generate embeddings")?;

            let metadata = batch.iter().map(|c| c.metadata.clone()).collect();
            let contents = batch.iter().map(|c| c.content.clone()).collect();
            stored += db.store_embeddings(embeddings, metadata, contents).await?;

            tracing::debug!("Embedded batch {}/{}", batch_idx + 1, total_batches);
        }

        tracing::info!("Indexed {} chunks at {}", stored, persist_dir.display());
        Ok(db)
    }

    /// Embed the query, fetch the top-k passages and format the report
    pub async fn query_and_format(
        &self,
        db: &dyn VectorDatabase,
        spec: &ChallengeInput,
        query: &str,
    ) -> Result<SearchReport> {
        let provider = self.provider.clone();
        let query_text = query.to_string();
        let query_embedding = tokio::task::spawn_blocking(move || provider.embed_batch(vec![query_text]))
            .await
            .context("Embedding task panicked")?
            .context("Failed to generate query embedding")?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No embedding generated"))?;

        let hits = db.search(query_embedding, self.config.search.top_k).await?;
        tracing::info!("Found {} matching passages", hits.len());

        Ok(format_report(spec, &hits, self.config.search.snippet_chars))
    }
}

/// Write the report as pretty-printed JSON
pub fn write_report(report: &SearchReport, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))
}

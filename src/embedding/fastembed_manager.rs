use super::EmbeddingProvider;
use crate::config::EmbeddingConfig;
use crate::error::EmbeddingError;
use anyhow::Result;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Model name used when none is configured
pub const DEFAULT_MODEL_NAME: &str = "BAAI/bge-small-en-v1.5";

/// Supported models: (canonical name, short alias, fastembed model, dimension)
const MODELS: &[(&str, &str, EmbeddingModel, usize)] = &[
    (
        "BAAI/bge-small-en-v1.5",
        "bge-small-en-v1.5",
        EmbeddingModel::BGESmallENV15,
        384,
    ),
    (
        "BAAI/bge-base-en-v1.5",
        "bge-base-en-v1.5",
        EmbeddingModel::BGEBaseENV15,
        768,
    ),
    (
        "BAAI/bge-large-en-v1.5",
        "bge-large-en-v1.5",
        EmbeddingModel::BGELargeENV15,
        1024,
    ),
    (
        "sentence-transformers/all-MiniLM-L6-v2",
        "all-MiniLM-L6-v2",
        EmbeddingModel::AllMiniLML6V2,
        384,
    ),
    (
        "sentence-transformers/all-MiniLM-L12-v2",
        "all-MiniLM-L12-v2",
        EmbeddingModel::AllMiniLML12V2,
        384,
    ),
    (
        "nomic-ai/nomic-embed-text-v1.5",
        "nomic-embed-text-v1.5",
        EmbeddingModel::NomicEmbedTextV15,
        768,
    ),
];

/// Look up a model by canonical name or short alias (case-insensitive)
fn lookup_model(name: &str) -> Option<(&'static str, EmbeddingModel, usize)> {
    let name = name.trim();
    MODELS
        .iter()
        .find(|(canonical, alias, _, _)| {
            canonical.eq_ignore_ascii_case(name) || alias.eq_ignore_ascii_case(name)
        })
        .map(|(canonical, _, model, dimension)| (*canonical, model.clone(), *dimension))
}

/// FastEmbed-based embedding provider
///
/// fastembed needs `&mut` access to run a batch, so the model sits behind a mutex and
/// batches are embedded one at a time.
pub struct FastEmbedManager {
    model: Mutex<TextEmbedding>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedManager {
    /// Create a manager with the default model (bge-small-en-v1.5) in the default cache
    pub fn new() -> Result<Self> {
        Self::from_model_name(DEFAULT_MODEL_NAME, None)
    }

    /// Create a manager for a model name such as `BAAI/bge-small-en-v1.5`
    ///
    /// `cache_dir` is where fastembed looks for (and downloads) model files. Pointing it
    /// at a directory that already holds the model avoids any network access.
    pub fn from_model_name(name: &str, cache_dir: Option<&Path>) -> Result<Self> {
        let (canonical, model, dimension) =
            lookup_model(name).ok_or_else(|| EmbeddingError::UnknownModel(name.to_string()))?;

        let cache_dir = cache_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(crate::paths::PlatformPaths::default_model_cache_dir);

        Self::with_model(model, canonical, dimension, cache_dir)
    }

    /// Create a manager from the `[embedding]` config section
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self> {
        Self::from_model_name(&config.model_name, config.model_path.as_deref())
    }

    fn with_model(
        model: EmbeddingModel,
        model_name: &str,
        dimension: usize,
        cache_dir: PathBuf,
    ) -> Result<Self> {
        tracing::info!(
            "Initializing FastEmbed model: {} (cache: {})",
            model_name,
            cache_dir.display()
        );

        let options = InitOptions::new(model)
            .with_cache_dir(cache_dir)
            .with_show_download_progress(true);

        let embedding_model = TextEmbedding::try_new(options)
            .map_err(|e| EmbeddingError::InitializationFailed(e.to_string()))?;

        Ok(Self {
            model: Mutex::new(embedding_model),
            model_name: model_name.to_string(),
            dimension,
        })
    }
}

impl EmbeddingProvider for FastEmbedManager {
    fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        tracing::debug!("Generating embeddings for {} texts", texts.len());

        let mut model = self
            .model
            .lock()
            .map_err(|e| EmbeddingError::LockPoisoned(e.to_string()))?;
        let embeddings = model
            .embed(texts, None)
            .map_err(|e| EmbeddingError::GenerationFailed(e.to_string()))?;

        if let Some(first) = embeddings.first()
            && first.len() != self.dimension
        {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimension,
                actual: first.len(),
            }
            .into());
        }

        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

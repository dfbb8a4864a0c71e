/// Configuration system for doc-intel
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::error::{ConfigError, DocIntelError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Embedding model configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    /// Text splitting for the search index
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Query and result shaping
    #[serde(default)]
    pub search: SearchConfig,

    /// Vector index location
    #[serde(default)]
    pub vector_db: VectorDbConfig,

    /// Collection layout for the outline extractor
    #[serde(default)]
    pub outline: OutlineConfig,
}

/// Embedding model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Model name (e.g., "BAAI/bge-small-en-v1.5", "all-MiniLM-L6-v2")
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Batch size for embedding generation
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Local directory holding pre-downloaded model files
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

/// Chunking configuration (sizes are in characters)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of passages returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Characters of each passage used for the subsection text
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

/// Vector database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// LanceDB directory used when the input spec names none
    #[serde(default = "default_persist_dir")]
    pub persist_dir: PathBuf,
}

/// Outline extractor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineConfig {
    /// Name of the per-collection challenge input file
    #[serde(default = "default_input_file_name")]
    pub input_file_name: String,

    /// Name of the per-collection folder holding the PDFs
    #[serde(default = "default_pdf_dir_name")]
    pub pdf_dir_name: String,

    /// Only directories starting with this prefix are processed by `--all`
    #[serde(default = "default_collection_prefix")]
    pub collection_prefix: String,
}

fn default_model_name() -> String {
    "BAAI/bge-small-en-v1.5".to_string()
}

fn default_batch_size() -> usize {
    32
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    100
}

fn default_top_k() -> usize {
    5
}

fn default_snippet_chars() -> usize {
    200
}

fn default_persist_dir() -> PathBuf {
    crate::paths::PlatformPaths::default_persist_dir()
}

fn default_input_file_name() -> String {
    "challenge1b_input.json".to_string()
}

fn default_pdf_dir_name() -> String {
    "PDFs".to_string()
}

fn default_collection_prefix() -> String {
    "Collection".to_string()
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            batch_size: default_batch_size(),
            model_path: None,
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            persist_dir: default_persist_dir(),
        }
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            input_file_name: default_input_file_name(),
            pdf_dir_name: default_pdf_dir_name(),
            collection_prefix: default_collection_prefix(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, DocIntelError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, DocIntelError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), DocIntelError> {
        let positive = [
            ("embedding.batch_size", self.embedding.batch_size),
            ("chunking.chunk_size", self.chunking.chunk_size),
            ("search.top_k", self.search.top_k),
            ("search.snippet_chars", self.search.snippet_chars),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "must be greater than 0".to_string(),
                }
                .into());
            }
        }

        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(ConfigError::InvalidValue {
                key: "chunking.chunk_overlap".to_string(),
                reason: format!(
                    "must be smaller than chunk_size ({}), got {}",
                    self.chunking.chunk_size, self.chunking.chunk_overlap
                ),
            }
            .into());
        }

        if self.embedding.model_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "embedding.model_name".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if self.outline.input_file_name.is_empty() || self.outline.pdf_dir_name.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "outline".to_string(),
                reason: "input_file_name and pdf_dir_name must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(model) = std::env::var("DOC_INTEL_MODEL") {
            self.embedding.model_name = model;
        }

        if let Ok(path) = std::env::var("FASTEMBED_EMBEDDING_MODEL")
            && !path.is_empty()
        {
            self.embedding.model_path = Some(PathBuf::from(path));
        }

        if let Ok(batch_size) = std::env::var("DOC_INTEL_BATCH_SIZE")
            && let Ok(size) = batch_size.parse()
        {
            self.embedding.batch_size = size;
        }

        if let Ok(chunk_size) = std::env::var("DOC_INTEL_CHUNK_SIZE")
            && let Ok(size) = chunk_size.parse()
        {
            self.chunking.chunk_size = size;
        }

        if let Ok(overlap) = std::env::var("DOC_INTEL_CHUNK_OVERLAP")
            && let Ok(size) = overlap.parse()
        {
            self.chunking.chunk_overlap = size;
        }

        if let Ok(top_k) = std::env::var("DOC_INTEL_TOP_K")
            && let Ok(k) = top_k.parse()
        {
            self.search.top_k = k;
        }

        if let Ok(path) = std::env::var("DOC_INTEL_PERSIST_DIR") {
            self.vector_db.persist_dir = PathBuf::from(path);
        }
    }

    /// Load from `path` (or the default location), then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, DocIntelError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::load_or_default()?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

/// Centralized error types for doc-intel using thiserror
///
/// Internal plumbing mostly returns `anyhow::Result`; these types are raised where a
/// caller needs to tell failures apart (bad input spec, invalid config, missing paths).
use thiserror::Error;

/// Main error type for the document pipeline
#[derive(Error, Debug)]
pub enum DocIntelError {
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Vector database error: {0}")]
    VectorDb(#[from] VectorDbError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Failed to initialize embedding model: {0}")]
    InitializationFailed(String),

    #[error("Failed to generate embeddings: {0}")]
    GenerationFailed(String),

    #[error("Unknown embedding model: {0}")]
    UnknownModel(String),

    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Model lock was poisoned: {0}")]
    LockPoisoned(String),
}

/// Errors related to vector index operations
#[derive(Error, Debug)]
pub enum VectorDbError {
    #[error("Failed to open vector index at '{path}': {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Failed to reset vector index at '{path}': {reason}")]
    ResetFailed { path: String, reason: String },

    #[error("Embeddings, metadata and contents differ in length: {embeddings}/{metadata}/{contents}")]
    LengthMismatch {
        embeddings: usize,
        metadata: usize,
        contents: usize,
    },

    #[error("Vector index is not initialized")]
    NotInitialized,
}

/// Errors related to reading PDF documents
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to read PDF '{file}': {reason}")]
    ReadFailed { file: String, reason: String },

    #[error("Failed to extract text from '{file}': {reason}")]
    TextFailed { file: String, reason: String },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Errors related to challenge inputs and CLI arguments
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Input file not found: {0}")]
    InputNotFound(String),

    #[error("Data directory not found: {0}")]
    DataDirNotFound(String),

    #[error("Collection '{name}' not found in {dir}")]
    CollectionNotFound { name: String, dir: String },

    #[error("Specification must include a 'query' field or a 'challenge_info.description'.")]
    MissingQuery,

    #[error("Invalid input specification: {0}")]
    InvalidSpec(String),
}

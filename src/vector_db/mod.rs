// LanceDB is the embedded vector index (no server required)
pub mod lance_client;
pub use lance_client::LanceVectorDB;

use crate::types::{ChunkMetadata, SearchHit};
use anyhow::Result;

/// Trait for vector database operations
#[async_trait::async_trait]
pub trait VectorDatabase: Send + Sync {
    /// Initialize the database and create the chunk table if needed
    async fn initialize(&self, dimension: usize) -> Result<()>;

    /// Store embeddings with their chunk metadata and text, returning the number stored
    async fn store_embeddings(
        &self,
        embeddings: Vec<Vec<f32>>,
        metadata: Vec<ChunkMetadata>,
        contents: Vec<String>,
    ) -> Result<usize>;

    /// Return the `limit` nearest chunks, closest first
    async fn search(&self, query_vector: Vec<f32>, limit: usize) -> Result<Vec<SearchHit>>;

    /// Number of stored chunks
    async fn count(&self) -> Result<usize>;

    /// Drop all stored chunks
    async fn clear(&self) -> Result<()>;
}

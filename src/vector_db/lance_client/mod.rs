//! LanceDB vector database client
//!
//! One table of page chunks per index directory. The search flow rebuilds the index
//! from scratch on every run, so there is no incremental update or deletion support.

use crate::error::VectorDbError;
use crate::types::{ChunkMetadata, SearchHit};
use crate::vector_db::VectorDatabase;
use anyhow::{Context, Result};
use arrow_array::{
    Array, FixedSizeListArray, Float32Array, RecordBatch, RecordBatchIterator, StringArray,
    UInt32Array, types::Float32Type,
};
use arrow_schema::{DataType, Field, Schema};
use futures::stream::TryStreamExt;
use lancedb::Table;
use lancedb::connection::Connection;
use lancedb::query::{ExecutableQuery, QueryBase};
use std::path::Path;
use std::sync::Arc;

/// Name of the chunk table
pub const TABLE_NAME: &str = "chunks";

/// LanceDB vector database implementation (embedded, no server required)
pub struct LanceVectorDB {
    connection: Connection,
    table_name: String,
    db_path: String,
}

impl LanceVectorDB {
    /// Open (or create) the index at a custom path
    pub async fn with_path(db_path: &str) -> Result<Self> {
        tracing::info!("Connecting to LanceDB at: {}", db_path);

        let connection = lancedb::connect(db_path)
            .execute()
            .await
            .map_err(|e| VectorDbError::OpenFailed {
                path: db_path.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            connection,
            table_name: TABLE_NAME.to_string(),
            db_path: db_path.to_string(),
        })
    }

    /// Delete an index directory and everything in it; a missing directory is fine
    pub fn reset(path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        tracing::info!("Removing existing index at {}", path.display());
        std::fs::remove_dir_all(path).map_err(|e| VectorDbError::ResetFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Create schema for the chunk table
    fn create_schema(dimension: usize) -> Arc<Schema> {
        Arc::new(Schema::new(vec![
            Field::new(
                "vector",
                DataType::FixedSizeList(
                    Arc::new(Field::new("item", DataType::Float32, true)),
                    dimension as i32,
                ),
                false,
            ),
            Field::new("id", DataType::Utf8, false),
            Field::new("source", DataType::Utf8, false),
            Field::new("page", DataType::UInt32, false),
            Field::new("content", DataType::Utf8, false),
        ]))
    }

    async fn table_exists(&self) -> Result<bool> {
        let table_names = self
            .connection
            .table_names()
            .execute()
            .await
            .context("Failed to list tables")?;
        Ok(table_names.contains(&self.table_name))
    }

    async fn get_table(&self) -> Result<Table> {
        if !self.table_exists().await? {
            return Err(VectorDbError::NotInitialized.into());
        }
        self.connection
            .open_table(&self.table_name)
            .execute()
            .await
            .context("Failed to open table")
    }

    /// Convert embeddings and metadata to a RecordBatch
    fn create_record_batch(
        embeddings: Vec<Vec<f32>>,
        metadata: &[ChunkMetadata],
        contents: &[String],
        schema: Arc<Schema>,
    ) -> Result<RecordBatch> {
        let dimension = embeddings.first().map(Vec::len).unwrap_or_default();

        let vector_array = FixedSizeListArray::from_iter_primitive::<Float32Type, _, _>(
            embeddings
                .into_iter()
                .map(|v| Some(v.into_iter().map(Some))),
            dimension as i32,
        );
        let id_array = StringArray::from(metadata.iter().map(|m| m.id.as_str()).collect::<Vec<_>>());
        let source_array =
            StringArray::from(metadata.iter().map(|m| m.source.as_str()).collect::<Vec<_>>());
        let page_array =
            UInt32Array::from(metadata.iter().map(|m| m.page as u32).collect::<Vec<_>>());
        let content_array =
            StringArray::from(contents.iter().map(|s| s.as_str()).collect::<Vec<_>>());

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(vector_array),
                Arc::new(id_array),
                Arc::new(source_array),
                Arc::new(page_array),
                Arc::new(content_array),
            ],
        )
        .context("Failed to create RecordBatch")
    }

    /// Turn search result batches into hits
    fn collect_hits(batches: &[RecordBatch]) -> Result<Vec<SearchHit>> {
        let mut hits = Vec::new();

        for batch in batches {
            let id_array = string_column(batch, "id")?;
            let source_array = string_column(batch, "source")?;
            let content_array = string_column(batch, "content")?;
            let page_array = batch
                .column_by_name("page")
                .context("Missing page column")?
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid page type")?;
            let distance_array = batch
                .column_by_name("_distance")
                .context("Missing _distance column")?
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("Invalid _distance type")?;

            for i in 0..batch.num_rows() {
                let distance = distance_array.value(i);
                hits.push(SearchHit {
                    id: id_array.value(i).to_string(),
                    source: source_array.value(i).to_string(),
                    page: page_array.value(i) as usize,
                    content: content_array.value(i).to_string(),
                    score: 1.0 / (1.0 + distance),
                });
            }
        }

        Ok(hits)
    }
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Missing {} column", name))?
        .as_any()
        .downcast_ref::<StringArray>()
        .with_context(|| format!("Invalid {} type", name))
}

#[async_trait::async_trait]
impl VectorDatabase for LanceVectorDB {
    async fn initialize(&self, dimension: usize) -> Result<()> {
        tracing::info!(
            "Initializing LanceDB with dimension {} at {}",
            dimension,
            self.db_path
        );

        if self.table_exists().await? {
            tracing::info!("Table '{}' already exists", self.table_name);
            return Ok(());
        }

        let schema = Self::create_schema(dimension);
        let empty_batch = RecordBatch::new_empty(schema.clone());
        let batches =
            RecordBatchIterator::new(vec![empty_batch].into_iter().map(Ok), schema.clone());

        self.connection
            .create_table(&self.table_name, Box::new(batches))
            .execute()
            .await
            .context("Failed to create table")?;

        tracing::info!("Created table '{}'", self.table_name);
        Ok(())
    }

    async fn store_embeddings(
        &self,
        embeddings: Vec<Vec<f32>>,
        metadata: Vec<ChunkMetadata>,
        contents: Vec<String>,
    ) -> Result<usize> {
        if embeddings.len() != metadata.len() || embeddings.len() != contents.len() {
            return Err(VectorDbError::LengthMismatch {
                embeddings: embeddings.len(),
                metadata: metadata.len(),
                contents: contents.len(),
            }
            .into());
        }
        if embeddings.is_empty() {
            return Ok(0);
        }

        let dimension = embeddings[0].len();
        let schema = Self::create_schema(dimension);
        let table = self.get_table().await?;

        let batch = Self::create_record_batch(embeddings, &metadata, &contents, schema.clone())?;
        let count = batch.num_rows();
        let batches = RecordBatchIterator::new(vec![batch].into_iter().map(Ok), schema);

        table
            .add(Box::new(batches))
            .execute()
            .await
            .context("Failed to add records to table")?;

        tracing::debug!("Stored {} embeddings", count);
        Ok(count)
    }

    async fn search(&self, query_vector: Vec<f32>, limit: usize) -> Result<Vec<SearchHit>> {
        let table = self.get_table().await?;

        // Nothing to rank in an empty table
        if limit == 0 || table.count_rows(None).await.context("Failed to count rows")? == 0 {
            return Ok(Vec::new());
        }

        let stream = table
            .vector_search(query_vector)
            .context("Failed to create vector search")?
            .limit(limit)
            .execute()
            .await
            .context("Failed to execute search")?;

        let results: Vec<RecordBatch> = stream
            .try_collect()
            .await
            .context("Failed to collect search results")?;

        let mut hits = Self::collect_hits(&results)?;
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn count(&self) -> Result<usize> {
        if !self.table_exists().await? {
            return Ok(0);
        }
        let table = self.get_table().await?;
        table
            .count_rows(None)
            .await
            .context("Failed to count rows")
    }

    async fn clear(&self) -> Result<()> {
        if !self.table_exists().await? {
            return Ok(());
        }

        // Empty namespace array for the default namespace
        self.connection
            .drop_table(&self.table_name, &[])
            .await
            .context("Failed to drop table")?;

        tracing::info!("Dropped table '{}'", self.table_name);
        Ok(())
    }
}

//! Corpus index trait for ranked chunk retrieval

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::types::ChunkMetadata;

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    /// Chunk text
    pub text: String,
    /// Metadata stored with the chunk
    pub metadata: ChunkMetadata,
    /// Similarity score (higher is more similar)
    pub score: f32,
}

/// Trait for a nearest-neighbor text store over document chunks
///
/// The pipeline consumes this purely as a ranked-retrieval oracle;
/// embedding model choice and distance metric are the implementation's
/// concern. Loading a persisted index is a constructor on the concrete
/// type (e.g. [`crate::retrieval::LexicalIndex::load`]).
#[async_trait]
pub trait CorpusIndex: Send + Sync {
    /// Return the top-k most similar stored chunks, most similar first
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>>;

    /// Extend the store with chunk texts and their metadata
    async fn add_texts(&self, texts: Vec<String>, metadatas: Vec<ChunkMetadata>) -> Result<()>;

    /// Persist the index to a directory
    async fn save(&self, dir: &Path) -> Result<()>;

    /// Get total number of chunks stored
    async fn len(&self) -> Result<usize>;

    /// Check if the store is empty
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Get index name for logging
    fn name(&self) -> &str;
}

//! Document chunk types

use serde::{Deserialize, Serialize};

/// A bounded substring of a source document prepared for indexing.
///
/// Immutable once created. Ordering within a source is significant
/// (`index` runs 0..total-1) and adjacent chunks of the same source
/// intentionally overlap; consumers must not deduplicate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text
    pub text: String,
    /// Identifier of the source document (title or filename)
    pub source_id: String,
    /// Position of this chunk within its source
    pub index: usize,
    /// Total number of chunks produced from the source
    pub total: usize,
}

impl Chunk {
    /// Metadata record stored alongside the chunk text in the corpus index
    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            source_id: self.source_id.clone(),
            chunk_index: self.index,
            total_chunks: self.total,
            tags: Vec::new(),
        }
    }
}

/// Metadata attached to an indexed chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Identifier of the source document
    pub source_id: String,
    /// Position of the chunk within its source
    pub chunk_index: usize,
    /// Total number of chunks produced from the source
    pub total_chunks: usize,
    /// Free-form tags (clause types, topics)
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ChunkMetadata {
    /// Attach tags to the metadata
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

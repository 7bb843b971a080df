//! Error types for the legal Q&A pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline and evaluation errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query rejected before entering the pipeline
    #[error("Query must not be empty")]
    EmptyQuery,

    /// Chunking parameters that would prevent forward progress
    #[error("Chunk overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    ChunkOverlap { chunk_size: usize, overlap: usize },

    /// Corpus index error
    #[error("Corpus index error: {0}")]
    Index(String),

    /// Text-generation provider error
    #[error("Generation failed: {0}")]
    Generation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a corpus index error
    pub fn index(message: impl Into<String>) -> Self {
        Self::Index(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }
}

//! Document ingestion: chunking source text for indexing

pub mod chunker;

pub use chunker::{chunk_text, DocumentChunker};

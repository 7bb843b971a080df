//! Provider abstractions for text generation and corpus retrieval
//!
//! Trait-based seams that let the pipeline run against a live Ollama server,
//! a cloud backend, or stubs in tests.

pub mod completion;
pub mod corpus;
pub mod ollama;

pub use completion::CompletionProvider;
pub use corpus::{CorpusIndex, ScoredChunk};
pub use ollama::OllamaClient;

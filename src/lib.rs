//! lexrag: legal document Q&A with a retrieve-reason-explain pipeline
//!
//! This crate answers natural-language questions about legal documents by
//! running a fixed three-stage agent pipeline over a chunked corpus and can
//! score the pipeline's output against grounding, readability, and retrieval
//! metrics. Language generation is delegated to an external completion
//! provider; HTTP serving, persistence, and authentication are the caller's
//! concern.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod types;

pub use config::LexRagConfig;
pub use error::{Error, Result};
pub use pipeline::{Orchestrator, PipelineResponse, PipelineState};
pub use types::{Chunk, ChunkMetadata, EvidenceItem, VerificationStatus};

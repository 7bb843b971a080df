//! Core types for the legal Q&A pipeline

pub mod chunk;
pub mod evidence;

pub use chunk::{Chunk, ChunkMetadata};
pub use evidence::{EvidenceItem, VerificationStatus};

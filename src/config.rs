//! Configuration for the legal Q&A system

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexRagConfig {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Corpus index configuration
    #[serde(default)]
    pub index: IndexConfig,
}

impl LexRagConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| {
            Error::config(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between adjacent chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2000,
            chunk_overlap: 200,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.2:3b".to_string(),
            temperature: 0.0, // factual answers over creative ones
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

/// Corpus index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Directory where the index is persisted
    pub storage_dir: PathBuf,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let storage_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexrag")
            .join("index");

        Self { storage_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = LexRagConfig::default();
        assert!(config.chunking.chunk_overlap < config.chunking.chunk_size);
        assert_eq!(config.llm.base_url, "http://localhost:11434");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: LexRagConfig =
            toml::from_str("[chunking]\nchunk_size = 500\nchunk_overlap = 50\n")
                .expect("parse");
        assert_eq!(parsed.chunking.chunk_size, 500);
        assert_eq!(parsed.llm.timeout_secs, 120);
    }
}

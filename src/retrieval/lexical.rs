//! In-memory lexical corpus index with JSON persistence
//!
//! Ranks chunks by term-frequency cosine similarity against the query. This
//! is the in-tree retrieval oracle for the CLI and tests; embedding-backed
//! stores plug in through the same [`CorpusIndex`] trait.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::providers::corpus::{CorpusIndex, ScoredChunk};
use crate::types::ChunkMetadata;

const PERSIST_FILE: &str = "corpus.json";

/// One indexed chunk with its precomputed term vector
#[derive(Debug, Clone)]
struct IndexedChunk {
    text: String,
    metadata: ChunkMetadata,
    terms: HashMap<String, f32>,
    norm: f32,
}

impl IndexedChunk {
    fn new(text: String, metadata: ChunkMetadata) -> Self {
        let terms = term_frequencies(&text);
        let norm = l2_norm(&terms);
        Self {
            text,
            metadata,
            terms,
            norm,
        }
    }
}

/// Persisted form of the index; term vectors are rebuilt on load
#[derive(Serialize, Deserialize)]
struct PersistedIndex {
    version: u32,
    texts: Vec<String>,
    metadatas: Vec<ChunkMetadata>,
}

/// In-memory lexical index
#[derive(Default)]
pub struct LexicalIndex {
    entries: RwLock<Vec<IndexedChunk>>,
}

impl LexicalIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a saved index exists in the directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(PERSIST_FILE).is_file()
    }

    /// Load a previously saved index from a directory
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(PERSIST_FILE);
        let raw = std::fs::read_to_string(&path).map_err(|e| {
            Error::index(format!("failed to read {}: {}", path.display(), e))
        })?;
        let persisted: PersistedIndex = serde_json::from_str(&raw)?;

        if persisted.version != 1 {
            return Err(Error::index(format!(
                "unsupported index version {} at {}",
                persisted.version,
                path.display()
            )));
        }

        if persisted.texts.len() != persisted.metadatas.len() {
            return Err(Error::index(format!(
                "corrupt index at {}: {} texts but {} metadata records",
                path.display(),
                persisted.texts.len(),
                persisted.metadatas.len()
            )));
        }

        let entries = persisted
            .texts
            .into_iter()
            .zip(persisted.metadatas)
            .map(|(text, metadata)| IndexedChunk::new(text, metadata))
            .collect();

        Ok(Self {
            entries: RwLock::new(entries),
        })
    }
}

#[async_trait]
impl CorpusIndex for LexicalIndex {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let query_terms = term_frequencies(query);
        let query_norm = l2_norm(&query_terms);

        if query_norm == 0.0 {
            return Ok(Vec::new());
        }

        let entries = self.entries.read();
        let mut results: Vec<ScoredChunk> = entries
            .iter()
            .filter(|entry| entry.norm > 0.0)
            .filter_map(|entry| {
                let score = cosine_similarity(&query_terms, query_norm, entry);
                (score > 0.0).then(|| ScoredChunk {
                    text: entry.text.clone(),
                    metadata: entry.metadata.clone(),
                    score,
                })
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        results.truncate(k);

        Ok(results)
    }

    async fn add_texts(&self, texts: Vec<String>, metadatas: Vec<ChunkMetadata>) -> Result<()> {
        if texts.len() != metadatas.len() {
            return Err(Error::index(format!(
                "add_texts requires matching lengths, got {} texts and {} metadata records",
                texts.len(),
                metadatas.len()
            )));
        }

        let mut entries = self.entries.write();
        for (text, metadata) in texts.into_iter().zip(metadatas) {
            entries.push(IndexedChunk::new(text, metadata));
        }

        Ok(())
    }

    async fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        let entries = self.entries.read();
        let persisted = PersistedIndex {
            version: 1,
            texts: entries.iter().map(|e| e.text.clone()).collect(),
            metadatas: entries.iter().map(|e| e.metadata.clone()).collect(),
        };

        let path = dir.join(PERSIST_FILE);
        let raw = serde_json::to_string_pretty(&persisted)?;
        std::fs::write(&path, raw)?;

        tracing::info!("Saved {} chunks to {}", entries.len(), path.display());
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.read().len())
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

/// Lowercased alphanumeric term frequencies
fn term_frequencies(text: &str) -> HashMap<String, f32> {
    let mut terms: HashMap<String, f32> = HashMap::new();

    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        *terms.entry(token.to_lowercase()).or_insert(0.0) += 1.0;
    }

    terms
}

fn l2_norm(terms: &HashMap<String, f32>) -> f32 {
    terms.values().map(|v| v * v).sum::<f32>().sqrt()
}

fn cosine_similarity(
    query_terms: &HashMap<String, f32>,
    query_norm: f32,
    entry: &IndexedChunk,
) -> f32 {
    let dot: f32 = query_terms
        .iter()
        .filter_map(|(term, qv)| entry.terms.get(term).map(|ev| qv * ev))
        .sum();

    dot / (query_norm * entry.norm)
}

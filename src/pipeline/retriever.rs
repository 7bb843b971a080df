//! Retrieval stage: ranked evidence from the corpus index

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::providers::{CompletionProvider, CorpusIndex};
use crate::types::EvidenceItem;

use super::prompt::{PromptBuilder, RETRIEVER_SYSTEM};
use super::{PipelineStage, PipelineState};

/// Number of chunks requested from the corpus index
pub const RETRIEVAL_TOP_K: usize = 5;

/// Evidence placeholder when no corpus index is configured
pub const NO_INDEX_SENTINEL: &str = "No corpus index is available.";

/// Retrieval stage.
///
/// Queries the corpus index for the top matches and renders them as ranked
/// evidence. A missing index degrades to a single sentinel item rather than
/// failing. The relevance summary requested from the provider is recorded in
/// the trace only; it never changes which documents are kept.
pub struct Retriever {
    index: Option<Arc<dyn CorpusIndex>>,
    provider: Arc<dyn CompletionProvider>,
}

impl Retriever {
    pub fn new(
        index: Option<Arc<dyn CorpusIndex>>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self { index, provider }
    }
}

#[async_trait]
impl PipelineStage for Retriever {
    fn name(&self) -> &'static str {
        "retriever"
    }

    async fn run(&self, mut state: PipelineState) -> Result<PipelineState> {
        let rendered: Vec<String> = match &self.index {
            Some(index) => {
                let hits = index
                    .similarity_search(&state.user_query, RETRIEVAL_TOP_K)
                    .await?;
                tracing::debug!(hits = hits.len(), "similarity search complete");

                hits.iter()
                    .enumerate()
                    .map(|(i, hit)| {
                        EvidenceItem::new(i + 1, hit.metadata.source_id.clone(), &hit.text)
                            .render()
                    })
                    .collect()
            }
            None => {
                tracing::warn!("no corpus index configured, degrading to sentinel evidence");
                vec![NO_INDEX_SENTINEL.to_string()]
            }
        };

        let documents = rendered.join("\n\n");
        let analysis = self
            .provider
            .complete(
                RETRIEVER_SYSTEM,
                &PromptBuilder::retriever_user(&state.user_query, &documents),
            )
            .await?;

        state.push_trace(format!(
            "[Retriever] Found {} documents.\n{}",
            rendered.len(),
            analysis
        ));
        state.retrieved_documents = rendered;

        Ok(state)
    }
}

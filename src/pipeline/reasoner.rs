//! Reasoning stage: cited reasoning chain and verification verdict

use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;

use crate::error::Result;
use crate::providers::CompletionProvider;
use crate::types::VerificationStatus;

use super::prompt::{PromptBuilder, REASONER_SYSTEM};
use super::{PipelineStage, PipelineState};

/// Reasoning stage.
///
/// Sends the query and evidence to the provider with a citation instruction,
/// splits the response into one reasoning step per non-empty line, and
/// derives the verification status from the response text.
pub struct Reasoner {
    provider: Arc<dyn CompletionProvider>,
}

impl Reasoner {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl PipelineStage for Reasoner {
    fn name(&self) -> &'static str {
        "reasoner"
    }

    async fn run(&self, mut state: PipelineState) -> Result<PipelineState> {
        let documents = state.retrieved_documents.join("\n\n");
        let response = self
            .provider
            .complete(
                REASONER_SYSTEM,
                &PromptBuilder::reasoner_user(&state.user_query, &documents),
            )
            .await?;

        let reasoning_chain: Vec<String> = response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        let status = VerificationStatus::from_response(&response);

        let cited = cited_documents(&response);
        if !cited.is_empty() {
            tracing::debug!(?cited, "reasoning cites documents");
        }

        state.push_trace(format!("[Reasoner] Status: {}\n\n{}", status, response));
        state.reasoning_chain = reasoning_chain;
        state.verification_status = Some(status);

        Ok(state)
    }
}

/// Document ranks cited in a reasoning response, in first-mention order
fn cited_documents(response: &str) -> Vec<u32> {
    let pattern = Regex::new(r"\[Document\s+(\d+)").expect("Invalid regex");

    let mut cited = Vec::new();
    for cap in pattern.captures_iter(response) {
        if let Some(rank) = cap.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
            if !cited.contains(&rank) {
                cited.push(rank);
            }
        }
    }

    cited
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_cited_ranks_in_order() {
        let response = "CLAIM: notice is required.\n\
                        EVIDENCE: [Document 2] states a 30 day notice period.\n\
                        [Document 1] and [Document 2] agree on the remedy.";
        assert_eq!(cited_documents(response), vec![2, 1]);
    }

    #[test]
    fn no_citations_yields_empty() {
        assert!(cited_documents("No bracketed references here.").is_empty());
    }
}

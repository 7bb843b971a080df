//! Explanation stage: plain-language answer with disclaimer

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::providers::CompletionProvider;

use super::prompt::{PromptBuilder, DISCLAIMER, EXPLAINER_SYSTEM};
use super::{PipelineStage, PipelineState};

/// Explanation stage.
///
/// Asks the provider for a plain-language rewrite of the reasoning chain and
/// appends the fixed disclaimer block verbatim.
pub struct Explainer {
    provider: Arc<dyn CompletionProvider>,
}

impl Explainer {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl PipelineStage for Explainer {
    fn name(&self) -> &'static str {
        "explainer"
    }

    async fn run(&self, mut state: PipelineState) -> Result<PipelineState> {
        let reasoning = state.reasoning_chain.join("\n");
        let status = state
            .verification_status
            .map(|s| s.as_str())
            .unwrap_or("UNKNOWN");

        let response = self
            .provider
            .complete(
                EXPLAINER_SYSTEM,
                &PromptBuilder::explainer_user(&state.user_query, &reasoning, status),
            )
            .await?;

        let final_explanation = format!("{}{}", response, DISCLAIMER);

        state.push_trace(format!("[Explainer]\n\n{}", final_explanation));
        state.final_explanation = final_explanation;

        Ok(state)
    }
}

//! The retrieve-reason-explain agent pipeline

pub mod explainer;
pub mod orchestrator;
pub mod prompt;
pub mod reasoner;
pub mod retriever;
pub mod state;

pub use explainer::Explainer;
pub use orchestrator::{format_response, Orchestrator};
pub use prompt::{PromptBuilder, DISCLAIMER};
pub use reasoner::Reasoner;
pub use retriever::{Retriever, NO_INDEX_SENTINEL, RETRIEVAL_TOP_K};
pub use state::{PipelinePhase, PipelineResponse, PipelineState};

use async_trait::async_trait;
use crate::error::Result;

/// One stage of the pipeline.
///
/// A stage consumes the current state by value and returns the next state:
/// the prior state plus its own additions. Stages never delete or reorder
/// what an earlier stage wrote.
#[async_trait]
pub trait PipelineStage: Send + Sync {
    /// Stage name for logging
    fn name(&self) -> &'static str;

    /// Run the stage to completion
    async fn run(&self, state: PipelineState) -> Result<PipelineState>;
}

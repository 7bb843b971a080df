//! Orchestrator: wires the three stages into a linear state machine

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{CompletionProvider, CorpusIndex};

use super::explainer::Explainer;
use super::reasoner::Reasoner;
use super::retriever::Retriever;
use super::state::{PipelinePhase, PipelineState};
use super::PipelineStage;

/// Runs a query through retrieve, reason, and explain.
///
/// Transitions are strictly linear and unconditional; a failure in any stage
/// aborts the run and no partial result is returned. The corpus index and
/// completion provider are injected at construction and owned by the caller.
pub struct Orchestrator {
    retriever: Retriever,
    reasoner: Reasoner,
    explainer: Explainer,
}

impl Orchestrator {
    /// Create an orchestrator over an optional corpus index and a provider
    pub fn new(
        index: Option<Arc<dyn CorpusIndex>>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            retriever: Retriever::new(index, Arc::clone(&provider)),
            reasoner: Reasoner::new(Arc::clone(&provider)),
            explainer: Explainer::new(provider),
        }
    }

    /// Run a query to the terminal state
    pub async fn run(&self, query: &str) -> Result<PipelineState> {
        let mut state = PipelineState::new(query)?;
        tracing::info!(run_id = %state.run_id, "starting pipeline run");

        while !state.phase.is_terminal() {
            let stage: &dyn PipelineStage = match state.phase {
                PipelinePhase::Init => &self.retriever,
                PipelinePhase::Retrieved => &self.reasoner,
                PipelinePhase::Reasoned => &self.explainer,
                PipelinePhase::Explained => break,
            };

            tracing::info!(stage = stage.name(), "running stage");
            state = stage.run(state).await?;
            state.phase = state.phase.next();
        }

        tracing::info!(
            run_id = %state.run_id,
            status = ?state.verification_status,
            "pipeline run complete"
        );
        Ok(state)
    }
}

/// Format a terminal state for display
pub fn format_response(state: &PipelineState) -> String {
    let status = state
        .verification_status
        .map(|s| s.as_str())
        .unwrap_or("PENDING");

    let lines = [
        "=".repeat(60),
        "LEGAL ASSISTANT ANALYSIS".to_string(),
        "=".repeat(60),
        format!("\nQUESTION: {}\n", state.user_query),
        format!(
            "DOCUMENTS: Found {} relevant documents\n",
            state.retrieved_documents.len()
        ),
        format!("STATUS: {}\n", status),
        "EXPLANATION:".to_string(),
        "-".repeat(60),
        state.final_explanation.clone(),
        "=".repeat(60),
    ];

    lines.join("\n")
}

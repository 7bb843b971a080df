//! Shared pipeline state

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::VerificationStatus;

/// Progress of a pipeline run through its linear state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelinePhase {
    Init,
    Retrieved,
    Reasoned,
    Explained,
}

impl PipelinePhase {
    /// The phase that follows this one; terminal phase is a fixed point
    pub fn next(self) -> PipelinePhase {
        match self {
            PipelinePhase::Init => PipelinePhase::Retrieved,
            PipelinePhase::Retrieved => PipelinePhase::Reasoned,
            PipelinePhase::Reasoned => PipelinePhase::Explained,
            PipelinePhase::Explained => PipelinePhase::Explained,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == PipelinePhase::Explained
    }
}

/// The single record threaded through all pipeline stages.
///
/// Owned exclusively by the orchestrator for the duration of one query.
/// Each stage consumes the state by value and returns it with its additions;
/// nothing is shared between concurrent runs, so no locking is needed.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineState {
    /// Run identifier for logs and audit
    pub run_id: Uuid,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Current position in the state machine
    pub phase: PipelinePhase,
    /// The question being answered
    pub user_query: String,
    /// Rendered evidence strings in relevance-rank order
    pub retrieved_documents: Vec<String>,
    /// One reasoning step per non-empty response line
    pub reasoning_chain: Vec<String>,
    /// Verdict derived by the reasoning stage
    pub verification_status: Option<VerificationStatus>,
    /// Plain-language answer with the disclaimer appended
    pub final_explanation: String,
    /// Append-only log of stage outputs
    trace: Vec<String>,
}

impl PipelineState {
    /// Build the initial state from the raw query.
    ///
    /// Rejects blank queries before the state machine starts.
    pub fn new(query: &str) -> Result<Self> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        Ok(Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            phase: PipelinePhase::Init,
            user_query: query.to_string(),
            retrieved_documents: Vec::new(),
            reasoning_chain: Vec::new(),
            verification_status: None,
            final_explanation: String::new(),
            trace: vec![query.to_string()],
        })
    }

    /// Append an entry to the trace log
    pub fn push_trace(&mut self, entry: impl Into<String>) {
        self.trace.push(entry.into());
    }

    /// The trace log, oldest entry first
    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    /// Caller-visible projection of a terminal state
    pub fn response(&self) -> PipelineResponse {
        PipelineResponse {
            retrieved_documents: self.retrieved_documents.clone(),
            reasoning_chain: self.reasoning_chain.clone(),
            verification_status: self.verification_status,
            final_explanation: self.final_explanation.clone(),
        }
    }
}

/// Terminal projection of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResponse {
    pub retrieved_documents: Vec<String>,
    pub reasoning_chain: Vec<String>,
    pub verification_status: Option<VerificationStatus>,
    pub final_explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_queries_are_rejected() {
        assert!(matches!(PipelineState::new(""), Err(Error::EmptyQuery)));
        assert!(matches!(PipelineState::new("   \n"), Err(Error::EmptyQuery)));
    }

    #[test]
    fn trace_is_seeded_with_the_query() {
        let state = PipelineState::new("What are the termination conditions?").expect("state");
        assert_eq!(state.trace(), ["What are the termination conditions?"]);
        assert_eq!(state.phase, PipelinePhase::Init);
    }

    #[test]
    fn phases_advance_linearly_to_a_terminal_fixed_point() {
        let mut phase = PipelinePhase::Init;
        let mut seen = vec![phase];
        while !phase.is_terminal() {
            phase = phase.next();
            seen.push(phase);
        }
        assert_eq!(
            seen,
            [
                PipelinePhase::Init,
                PipelinePhase::Retrieved,
                PipelinePhase::Reasoned,
                PipelinePhase::Explained,
            ]
        );
        assert_eq!(PipelinePhase::Explained.next(), PipelinePhase::Explained);
    }
}

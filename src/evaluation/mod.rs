//! Evaluation of pipeline runs
//!
//! Measures retrieval performance (precision, recall, F1, MRR), evidence
//! grounding of the reasoning chain, and readability of the explanation,
//! and aggregates results across a batch of runs.

pub mod metrics;
pub mod report;
pub mod runner;

pub use metrics::{
    evaluate_response, EvaluationResult, GroundingMetrics, ReadabilityMetrics, RetrievalMetrics,
};
pub use report::{format_aggregate_summary, format_evaluation_report};
pub use runner::{AggregateMetrics, EvaluationRunner, MetricSummary};

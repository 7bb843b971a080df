//! Batch evaluation with aggregate statistics

use serde::Serialize;

use super::metrics::EvaluationResult;

/// Mean, minimum, and maximum of one metric across a batch
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl MetricSummary {
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &value in values {
            min = min.min(value);
            max = max.max(value);
            sum += value;
        }

        Some(Self {
            mean: sum / values.len() as f64,
            min,
            max,
        })
    }
}

/// Aggregate statistics across all stored results.
///
/// Retrieval summaries are present only when at least one result carried
/// retrieval metrics, and cover exactly those results.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateMetrics {
    pub count: usize,
    pub overall_score: Option<MetricSummary>,
    pub grounding_score: Option<MetricSummary>,
    pub readability_score: Option<MetricSummary>,
    pub precision: Option<MetricSummary>,
    pub recall: Option<MetricSummary>,
    pub f1: Option<MetricSummary>,
    pub mrr: Option<MetricSummary>,
}

/// Collects evaluation results for a batch and aggregates them.
///
/// Results are kept in submission order and the aggregate is recomputed
/// from the full collection on each call, so it is correct mid-batch.
/// Not concurrency-safe: appends from multiple threads must be serialized
/// by the caller.
#[derive(Debug, Default)]
pub struct EvaluationRunner {
    results: Vec<EvaluationResult>,
}

impl EvaluationRunner {
    /// Create an empty runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single evaluation result
    pub fn add_result(&mut self, result: EvaluationResult) {
        self.results.push(result);
    }

    /// The stored results in submission order
    pub fn results(&self) -> &[EvaluationResult] {
        &self.results
    }

    /// Calculate aggregate metrics across all stored results
    pub fn aggregate(&self) -> AggregateMetrics {
        let overall: Vec<f64> = self.results.iter().map(|r| r.overall_score).collect();
        let grounding: Vec<f64> = self
            .results
            .iter()
            .map(|r| r.grounding.grounding_score)
            .collect();
        let readability: Vec<f64> = self
            .results
            .iter()
            .map(|r| r.readability.readability_score)
            .collect();

        let with_retrieval: Vec<_> = self
            .results
            .iter()
            .filter_map(|r| r.retrieval.as_ref())
            .collect();
        let precision: Vec<f64> = with_retrieval.iter().map(|r| r.precision).collect();
        let recall: Vec<f64> = with_retrieval.iter().map(|r| r.recall).collect();
        let f1: Vec<f64> = with_retrieval.iter().map(|r| r.f1).collect();
        let mrr: Vec<f64> = with_retrieval.iter().map(|r| r.mrr).collect();

        AggregateMetrics {
            count: self.results.len(),
            overall_score: MetricSummary::from_values(&overall),
            grounding_score: MetricSummary::from_values(&grounding),
            readability_score: MetricSummary::from_values(&readability),
            precision: MetricSummary::from_values(&precision),
            recall: MetricSummary::from_values(&recall),
            f1: MetricSummary::from_values(&f1),
            mrr: MetricSummary::from_values(&mrr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::metrics::{
        GroundingMetrics, ReadabilityMetrics, RetrievalMetrics,
    };

    fn result(
        overall: f64,
        grounding: f64,
        readability: f64,
        retrieval: Option<RetrievalMetrics>,
    ) -> EvaluationResult {
        EvaluationResult {
            query: "q".to_string(),
            num_retrieved: 0,
            num_reasoning_steps: 0,
            explanation_length: 0,
            retrieval,
            grounding: GroundingMetrics {
                citation_rate: grounding,
                unsupported_claim_rate: 0.0,
                grounding_score: grounding,
                citation_details: Vec::new(),
            },
            readability: ReadabilityMetrics {
                avg_sentence_length: 0.0,
                avg_word_length: 0.0,
                readability_score: readability,
            },
            overall_score: overall,
        }
    }

    #[test]
    fn empty_runner_aggregates_to_nothing() {
        let runner = EvaluationRunner::new();
        let aggregate = runner.aggregate();
        assert_eq!(aggregate.count, 0);
        assert!(aggregate.overall_score.is_none());
        assert!(aggregate.f1.is_none());
    }

    #[test]
    fn aggregates_match_hand_computed_values() {
        let mut runner = EvaluationRunner::new();
        runner.add_result(result(0.2, 0.1, 0.9, None));
        runner.add_result(result(
            0.5,
            0.2,
            0.6,
            Some(RetrievalMetrics {
                precision: 0.5,
                recall: 1.0,
                f1: 2.0 / 3.0,
                mrr: 1.0,
            }),
        ));
        runner.add_result(result(0.8, 0.3, 0.3, None));

        let aggregate = runner.aggregate();
        assert_eq!(aggregate.count, 3);

        let overall = aggregate.overall_score.expect("overall");
        assert!((overall.mean - 0.5).abs() < 1e-9);
        assert_eq!(overall.min, 0.2);
        assert_eq!(overall.max, 0.8);

        let grounding = aggregate.grounding_score.expect("grounding");
        assert!((grounding.mean - 0.2).abs() < 1e-9);

        let readability = aggregate.readability_score.expect("readability");
        assert!((readability.mean - 0.6).abs() < 1e-9);
        assert_eq!(readability.min, 0.3);
        assert_eq!(readability.max, 0.9);

        // Only one result carried retrieval metrics.
        let precision = aggregate.precision.expect("precision");
        assert_eq!(precision.mean, 0.5);
        assert_eq!(precision.min, 0.5);
        assert_eq!(precision.max, 0.5);
        let mrr = aggregate.mrr.expect("mrr");
        assert_eq!(mrr.mean, 1.0);
    }

    #[test]
    fn aggregate_is_correct_mid_batch() {
        let mut runner = EvaluationRunner::new();
        runner.add_result(result(0.4, 0.4, 0.4, None));
        assert_eq!(runner.aggregate().count, 1);

        runner.add_result(result(0.6, 0.6, 0.6, None));
        let aggregate = runner.aggregate();
        assert_eq!(aggregate.count, 2);
        assert!((aggregate.overall_score.expect("overall").mean - 0.5).abs() < 1e-9);
    }
}

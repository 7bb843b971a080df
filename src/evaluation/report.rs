//! Human-readable evaluation reports

use super::metrics::EvaluationResult;
use super::runner::AggregateMetrics;

const RULE: &str = "============================================================";

/// Format one evaluation result as a readable report.
///
/// With `verbose` the retrieved documents and reasoning chain are listed
/// in full (documents previewed to 200 characters).
pub fn format_evaluation_report(result: &EvaluationResult, verbose: bool) -> String {
    let mut lines = Vec::new();

    lines.push(RULE.to_string());
    lines.push("EVALUATION REPORT".to_string());
    lines.push(RULE.to_string());

    lines.push(format!("\nQuery: {}", result.query));
    lines.push(format!("Documents Retrieved: {}", result.num_retrieved));
    lines.push(format!("Reasoning Steps: {}", result.num_reasoning_steps));
    lines.push(format!(
        "Explanation Length: {} characters",
        result.explanation_length
    ));

    if verbose {
        lines.push("\n--- Reasoning Chain ---".to_string());
        for (i, detail) in result.grounding.citation_details.iter().enumerate() {
            lines.push(format!("  Step {}: {}", i + 1, preview(&detail.text, 200)));
        }
    }

    if let Some(retrieval) = &result.retrieval {
        lines.push("\n--- Retrieval Performance ---".to_string());
        lines.push(format!("  Precision: {:.3}", retrieval.precision));
        lines.push(format!("  Recall: {:.3}", retrieval.recall));
        lines.push(format!("  F1 Score: {:.3}", retrieval.f1));
        lines.push(format!("  MRR: {:.3}", retrieval.mrr));
    }

    lines.push("\n--- Evidence Grounding ---".to_string());
    lines.push(format!(
        "  Citation Rate: {:.3}",
        result.grounding.citation_rate
    ));
    lines.push(format!(
        "  Unsupported Claims: {:.3}",
        result.grounding.unsupported_claim_rate
    ));
    lines.push(format!(
        "  Grounding Score: {:.3}",
        result.grounding.grounding_score
    ));

    lines.push("\n--- Explanation Readability ---".to_string());
    lines.push(format!(
        "  Avg Sentence Length: {:.1} words",
        result.readability.avg_sentence_length
    ));
    lines.push(format!(
        "  Avg Word Length: {:.1} chars",
        result.readability.avg_word_length
    ));
    lines.push(format!(
        "  Readability Score: {:.3}",
        result.readability.readability_score
    ));

    lines.push(format!("\n{}", RULE));
    lines.push(format!("OVERALL SCORE: {:.3}", result.overall_score));
    lines.push(RULE.to_string());

    lines.join("\n")
}

/// Format aggregate statistics for a batch of evaluations
pub fn format_aggregate_summary(metrics: &AggregateMetrics) -> String {
    let mut lines = Vec::new();

    lines.push(RULE.to_string());
    lines.push("AGGREGATE EVALUATION SUMMARY".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Total Evaluations: {}", metrics.count));

    if let Some(overall) = &metrics.overall_score {
        lines.push("\n--- Overall Performance ---".to_string());
        lines.push(format!("  Mean Overall Score: {:.3}", overall.mean));
        lines.push(format!(
            "  Range: [{:.3}, {:.3}]",
            overall.min, overall.max
        ));
    }

    if let Some(grounding) = &metrics.grounding_score {
        lines.push("\n--- Grounding ---".to_string());
        lines.push(format!("  Mean Grounding Score: {:.3}", grounding.mean));
    }

    if let Some(readability) = &metrics.readability_score {
        lines.push("\n--- Readability ---".to_string());
        lines.push(format!("  Mean Readability Score: {:.3}", readability.mean));
    }

    if let (Some(precision), Some(recall), Some(f1)) =
        (&metrics.precision, &metrics.recall, &metrics.f1)
    {
        lines.push("\n--- Retrieval ---".to_string());
        lines.push(format!("  Mean Precision: {:.3}", precision.mean));
        lines.push(format!("  Mean Recall: {:.3}", recall.mean));
        lines.push(format!("  Mean F1: {:.3}", f1.mean));
    }

    lines.push(RULE.to_string());

    lines.join("\n")
}

fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let cut: String = flat.chars().take(max_chars).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::metrics::evaluate_response;
    use crate::evaluation::runner::EvaluationRunner;

    #[test]
    fn report_carries_the_headline_numbers() {
        let chain = vec!["[Document 1] states that notice is required.".to_string()];
        let result = evaluate_response(
            "What are the termination conditions?",
            &["[Document 1] Termination clause.".to_string()],
            &chain,
            "Notice must be given. That is the rule.",
            None,
        );

        let report = format_evaluation_report(&result, true);
        assert!(report.contains("EVALUATION REPORT"));
        assert!(report.contains("Query: What are the termination conditions?"));
        assert!(report.contains("Documents Retrieved: 1"));
        assert!(report.contains("Step 1:"));
        assert!(report.contains("OVERALL SCORE:"));
        // No ground truth, so no retrieval section.
        assert!(!report.contains("Retrieval Performance"));
    }

    #[test]
    fn summary_handles_an_empty_batch() {
        let runner = EvaluationRunner::new();
        let summary = format_aggregate_summary(&runner.aggregate());
        assert!(summary.contains("Total Evaluations: 0"));
        assert!(!summary.contains("Overall Performance"));
    }
}

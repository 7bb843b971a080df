//! Metric computations for a single pipeline run

use serde::Serialize;
use std::collections::HashSet;

/// Markers whose presence in a reasoning step counts as a citation,
/// paired with the marker type reported in the detailed analysis.
/// The list and its matching are part of the scoring contract.
const CITATION_MARKERS: [(&str, &str); 6] = [
    ("Document", "document_reference"),
    ("[", "bracket_citation"),
    ("evidence", "evidence_mention"),
    ("according to", "attribution"),
    ("states that", "direct_quote"),
    ("mentions", "mention"),
];

/// Markers whose presence in a reasoning step flags an unsupported claim
const UNCERTAINTY_MARKERS: [&str; 5] =
    ["insufficient", "not found", "no evidence", "unclear", "uncertain"];

/// Proportion of retrieved documents that are relevant
pub fn retrieval_precision(retrieved: &[String], relevant: &[String]) -> f64 {
    if retrieved.is_empty() {
        return 0.0;
    }

    let retrieved_set: HashSet<&str> = retrieved.iter().map(String::as_str).collect();
    let relevant_set: HashSet<&str> = relevant.iter().map(String::as_str).collect();

    let true_positives = retrieved_set.intersection(&relevant_set).count();
    true_positives as f64 / retrieved_set.len() as f64
}

/// Proportion of relevant documents that were retrieved
pub fn retrieval_recall(retrieved: &[String], relevant: &[String]) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }

    let retrieved_set: HashSet<&str> = retrieved.iter().map(String::as_str).collect();
    let relevant_set: HashSet<&str> = relevant.iter().map(String::as_str).collect();

    let true_positives = retrieved_set.intersection(&relevant_set).count();
    true_positives as f64 / relevant_set.len() as f64
}

/// Harmonic mean of precision and recall
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        return 0.0;
    }

    2.0 * (precision * recall) / (precision + recall)
}

/// Reciprocal rank of the first retrieved document that is relevant,
/// scanning in retrieved order starting at rank 1; 0 when none match
pub fn mean_reciprocal_rank(retrieved: &[String], relevant: &[String]) -> f64 {
    let relevant_set: HashSet<&str> = relevant.iter().map(String::as_str).collect();

    for (i, doc) in retrieved.iter().enumerate() {
        if relevant_set.contains(doc.as_str()) {
            return 1.0 / (i + 1) as f64;
        }
    }

    0.0
}

/// A citation marker found in a reasoning step
#[derive(Debug, Clone, Serialize)]
pub struct FoundMarker {
    pub marker: &'static str,
    pub marker_type: &'static str,
}

/// Per-step citation analysis
#[derive(Debug, Clone, Serialize)]
pub struct CitationDetail {
    pub step_index: usize,
    pub text: String,
    pub length: usize,
    pub found_markers: Vec<FoundMarker>,
    pub has_citation: bool,
}

/// How well the reasoning is grounded in retrieved evidence
#[derive(Debug, Clone, Serialize)]
pub struct GroundingMetrics {
    /// Fraction of reasoning steps containing at least one citation marker
    pub citation_rate: f64,
    /// Fraction of reasoning steps containing an uncertainty marker
    pub unsupported_claim_rate: f64,
    /// `citation_rate * (1 - unsupported_claim_rate)`
    pub grounding_score: f64,
    /// Marker breakdown per step
    pub citation_details: Vec<CitationDetail>,
}

/// Evaluate how well the reasoning chain cites its evidence.
///
/// Both rates are 0 for an empty chain.
pub fn evaluate_grounding(reasoning_chain: &[String]) -> GroundingMetrics {
    let mut cited_steps = 0usize;
    let mut unsupported_count = 0usize;
    let mut citation_details = Vec::with_capacity(reasoning_chain.len());

    for (step_index, step) in reasoning_chain.iter().enumerate() {
        let lower = step.to_lowercase();

        let found_markers: Vec<FoundMarker> = CITATION_MARKERS
            .iter()
            .filter(|(marker, _)| lower.contains(marker.to_lowercase().as_str()))
            .map(|&(marker, marker_type)| FoundMarker {
                marker,
                marker_type,
            })
            .collect();

        let has_citation = !found_markers.is_empty();
        if has_citation {
            cited_steps += 1;
        }

        if UNCERTAINTY_MARKERS.iter().any(|marker| lower.contains(marker)) {
            unsupported_count += 1;
        }

        citation_details.push(CitationDetail {
            step_index,
            text: step.clone(),
            length: step.chars().count(),
            found_markers,
            has_citation,
        });
    }

    let steps = reasoning_chain.len();
    let citation_rate = if steps > 0 {
        cited_steps as f64 / steps as f64
    } else {
        0.0
    };
    let unsupported_claim_rate = if steps > 0 {
        unsupported_count as f64 / steps as f64
    } else {
        0.0
    };

    GroundingMetrics {
        citation_rate,
        unsupported_claim_rate,
        grounding_score: citation_rate * (1.0 - unsupported_claim_rate),
        citation_details,
    }
}

/// Readability metrics for explanation text
#[derive(Debug, Clone, Serialize)]
pub struct ReadabilityMetrics {
    /// Mean words per sentence
    pub avg_sentence_length: f64,
    /// Mean characters per word across all words
    pub avg_word_length: f64,
    /// 0-1 score, higher is easier to read
    pub readability_score: f64,
}

/// Score explanation text for readability.
///
/// Sentences are split on `.` after normalizing `!`/`?`; the index
/// `0.5 * avg_sentence_length + 3 * avg_word_length` is calibrated so
/// ~15-word sentences of ~5-character words score near 1.0. All values
/// are 0 when the text has no sentences.
pub fn readability_metrics(text: &str) -> ReadabilityMetrics {
    let normalized = text.replace('!', ".").replace('?', ".");
    let sentences: Vec<&str> = normalized
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if sentences.is_empty() {
        return ReadabilityMetrics {
            avg_sentence_length: 0.0,
            avg_word_length: 0.0,
            readability_score: 0.0,
        };
    }

    let mut total_words = 0usize;
    let mut total_chars = 0usize;

    for sentence in &sentences {
        for word in sentence.split_whitespace() {
            total_words += 1;
            total_chars += word.chars().count();
        }
    }

    let avg_sentence_length = total_words as f64 / sentences.len() as f64;
    let avg_word_length = if total_words > 0 {
        total_chars as f64 / total_words as f64
    } else {
        0.0
    };

    let readability_index = avg_sentence_length * 0.5 + avg_word_length * 3.0;
    let readability_score = (1.0 - (readability_index - 22.5) / 50.0).clamp(0.0, 1.0);

    ReadabilityMetrics {
        avg_sentence_length,
        avg_word_length,
        readability_score,
    }
}

/// Retrieval quality against ground truth
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub mrr: f64,
}

/// Full evaluation of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// The evaluated query
    pub query: String,
    /// Number of retrieved documents
    pub num_retrieved: usize,
    /// Number of reasoning steps
    pub num_reasoning_steps: usize,
    /// Explanation length in characters
    pub explanation_length: usize,
    /// Retrieval metrics; present only when ground truth was supplied
    pub retrieval: Option<RetrievalMetrics>,
    /// Evidence grounding metrics
    pub grounding: GroundingMetrics,
    /// Explanation readability metrics
    pub readability: ReadabilityMetrics,
    /// Weighted combination of the above, clamped to [0, 1]
    pub overall_score: f64,
}

/// Evaluate a completed pipeline run.
///
/// Ground truth is optional; without it the retrieval metrics are omitted
/// and the overall score is renormalized over the remaining weights. An
/// empty reasoning chain or explanation yields zero-valued metrics rather
/// than an error.
pub fn evaluate_response(
    query: &str,
    retrieved_docs: &[String],
    reasoning_chain: &[String],
    final_explanation: &str,
    ground_truth_relevant: Option<&[String]>,
) -> EvaluationResult {
    let retrieval = ground_truth_relevant
        .filter(|relevant| !relevant.is_empty())
        .map(|relevant| {
            let precision = retrieval_precision(retrieved_docs, relevant);
            let recall = retrieval_recall(retrieved_docs, relevant);
            RetrievalMetrics {
                precision,
                recall,
                f1: f1_score(precision, recall),
                mrr: mean_reciprocal_rank(retrieved_docs, relevant),
            }
        });

    let grounding = evaluate_grounding(reasoning_chain);
    let readability = readability_metrics(final_explanation);

    let mut overall_score =
        grounding.grounding_score * 0.4 + readability.readability_score * 0.3;

    match &retrieval {
        Some(r) => overall_score += r.f1 * 0.3,
        // Renormalize over the two remaining weights.
        None => overall_score /= 0.7,
    }

    EvaluationResult {
        query: query.to_string(),
        num_retrieved: retrieved_docs.len(),
        num_reasoning_steps: reasoning_chain.len(),
        explanation_length: final_explanation.chars().count(),
        retrieval,
        grounding,
        readability,
        overall_score: overall_score.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn precision_recall_f1_fixture() {
        let retrieved = strings(&["a", "b"]);
        let relevant = strings(&["a", "b", "c"]);

        let precision = retrieval_precision(&retrieved, &relevant);
        let recall = retrieval_recall(&retrieved, &relevant);
        let f1 = f1_score(precision, recall);

        assert_eq!(precision, 1.0);
        assert!((recall - 2.0 / 3.0).abs() < 1e-9);
        assert!((f1 - 0.8).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(retrieval_precision(&[], &strings(&["a"])), 0.0);
        assert_eq!(retrieval_recall(&strings(&["a"]), &[]), 0.0);
        assert_eq!(f1_score(0.0, 0.0), 0.0);
    }

    #[test]
    fn mrr_uses_first_matching_rank() {
        assert_eq!(
            mean_reciprocal_rank(&strings(&["a", "b", "c"]), &strings(&["b"])),
            0.5
        );
        assert_eq!(mean_reciprocal_rank(&strings(&["a"]), &strings(&["z"])), 0.0);
    }

    #[test]
    fn grounding_counts_marked_steps() {
        let chain = strings(&[
            "According to Document 1, notice is required.",
            "The contract is silent on renewal.",
        ]);
        let grounding = evaluate_grounding(&chain);

        assert_eq!(grounding.citation_rate, 0.5);
        assert_eq!(grounding.unsupported_claim_rate, 0.0);
        assert_eq!(grounding.grounding_score, 0.5);
        assert!(grounding.citation_details[0].has_citation);
        assert!(!grounding.citation_details[1].has_citation);
    }

    #[test]
    fn grounding_is_zero_for_empty_chain() {
        let grounding = evaluate_grounding(&[]);
        assert_eq!(grounding.citation_rate, 0.0);
        assert_eq!(grounding.unsupported_claim_rate, 0.0);
        assert_eq!(grounding.grounding_score, 0.0);
    }

    #[test]
    fn grounding_score_decreases_with_unsupported_claims() {
        // Citation rate fixed at 1.0; uncertainty markers added step by step.
        let certain = strings(&[
            "[Document 1] sets the notice period.",
            "[Document 2] sets the cure period.",
            "[Document 3] sets the fee.",
            "[Document 4] sets the term.",
        ]);
        let mut previous = evaluate_grounding(&certain).grounding_score;

        for flagged in 1..=4 {
            let chain: Vec<String> = certain
                .iter()
                .enumerate()
                .map(|(i, step)| {
                    if i < flagged {
                        format!("{} However the evidence is unclear.", step)
                    } else {
                        step.clone()
                    }
                })
                .collect();

            let score = evaluate_grounding(&chain).grounding_score;
            assert!(score <= previous, "score rose as unsupported rate grew");
            previous = score;
        }
    }

    #[test]
    fn readability_of_ideal_text_is_near_one() {
        // Fifteen 5-character words per sentence.
        let sentence = std::iter::repeat("claws")
            .take(15)
            .collect::<Vec<_>>()
            .join(" ");
        let text = format!("{s}. {s}. {s}.", s = sentence);

        let readability = readability_metrics(&text);
        assert_eq!(readability.avg_sentence_length, 15.0);
        assert_eq!(readability.avg_word_length, 5.0);
        assert!(readability.readability_score >= 0.9);
        assert!(readability.readability_score <= 1.0);
    }

    #[test]
    fn readability_of_empty_text_is_zero() {
        let readability = readability_metrics("   ");
        assert_eq!(readability.avg_sentence_length, 0.0);
        assert_eq!(readability.avg_word_length, 0.0);
        assert_eq!(readability.readability_score, 0.0);
    }

    #[test]
    fn question_and_exclamation_marks_end_sentences() {
        let readability = readability_metrics("Is notice required? Yes it is! Always.");
        assert_eq!(readability.avg_sentence_length, (3.0 + 3.0 + 1.0) / 3.0);
    }

    #[test]
    fn overall_score_renormalizes_without_ground_truth() {
        let chain = strings(&["[Document 1] states that notice is required."]);
        let explanation = "Notice must be given in writing before ending the deal.";

        let without = evaluate_response("q", &[], &chain, explanation, None);
        let with = evaluate_response(
            "q",
            &strings(&["a"]),
            &chain,
            explanation,
            Some(&strings(&["a"])),
        );

        let base = without.grounding.grounding_score * 0.4
            + without.readability.readability_score * 0.3;
        assert!((without.overall_score - (base / 0.7).min(1.0)).abs() < 1e-9);

        // Perfect retrieval adds the full 0.3 weight instead.
        assert!((with.overall_score - (base + 0.3).min(1.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_chain_and_explanation_yield_zero_metrics() {
        let result = evaluate_response("q", &[], &[], "", None);
        assert_eq!(result.grounding.grounding_score, 0.0);
        assert_eq!(result.readability.readability_score, 0.0);
        assert_eq!(result.overall_score, 0.0);
        assert!(result.retrieval.is_none());
    }
}

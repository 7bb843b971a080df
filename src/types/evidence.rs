//! Evidence items and verification status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum characters of chunk text carried into an evidence item
pub const EVIDENCE_SNIPPET_CHARS: usize = 1500;

/// A ranked, retrieved chunk rendered for presentation to the reasoning stage.
///
/// Ordering reflects relevance rank; rank 1 is the most relevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Rank label, e.g. "Document 3"
    pub label: String,
    /// Identifier of the source document
    pub source: String,
    /// Evidence text, truncated to [`EVIDENCE_SNIPPET_CHARS`]
    pub text: String,
}

impl EvidenceItem {
    /// Build an evidence item from a retrieved chunk, 1-indexed by rank
    pub fn new(rank: usize, source: impl Into<String>, text: &str) -> Self {
        let snippet: String = text.chars().take(EVIDENCE_SNIPPET_CHARS).collect();
        Self {
            label: format!("Document {}", rank),
            source: source.into(),
            text: snippet,
        }
    }

    /// Render the item the way the reasoning stage consumes it
    pub fn render(&self) -> String {
        format!("[{}] {}", self.label, self.text)
    }
}

/// Coarse confidence label describing how well reasoning is supported by
/// evidence. Derived from the reasoner's response text, never asserted
/// directly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    PartiallyVerified,
    InsufficientEvidence,
}

impl VerificationStatus {
    /// Derive the status from a reasoning response.
    ///
    /// The scan is case-insensitive and order-sensitive: the
    /// insufficient-evidence markers take precedence over the partial marker.
    pub fn from_response(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("insufficient") || lower.contains("not supported") {
            VerificationStatus::InsufficientEvidence
        } else if lower.contains("partially") {
            VerificationStatus::PartiallyVerified
        } else {
            VerificationStatus::Verified
        }
    }

    /// Wire form of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Verified => "VERIFIED",
            VerificationStatus::PartiallyVerified => "PARTIALLY_VERIFIED",
            VerificationStatus::InsufficientEvidence => "INSUFFICIENT_EVIDENCE",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evidence_render_is_rank_labelled() {
        let item = EvidenceItem::new(3, "contract_abc.txt", "Termination requires notice.");
        assert_eq!(item.label, "Document 3");
        assert_eq!(item.render(), "[Document 3] Termination requires notice.");
    }

    #[test]
    fn evidence_text_is_truncated() {
        let long = "x".repeat(4000);
        let item = EvidenceItem::new(1, "big.txt", &long);
        assert_eq!(item.text.chars().count(), EVIDENCE_SNIPPET_CHARS);
    }

    #[test]
    fn status_scan_is_case_insensitive() {
        assert_eq!(
            VerificationStatus::from_response("The claim is NOT SUPPORTED by evidence."),
            VerificationStatus::InsufficientEvidence
        );
        assert_eq!(
            VerificationStatus::from_response("The claim is Partially verified."),
            VerificationStatus::PartiallyVerified
        );
        assert_eq!(
            VerificationStatus::from_response("All claims check out."),
            VerificationStatus::Verified
        );
    }

    #[test]
    fn insufficient_takes_precedence_over_partially() {
        let text = "Evidence is partially relevant but ultimately insufficient.";
        assert_eq!(
            VerificationStatus::from_response(text),
            VerificationStatus::InsufficientEvidence
        );
    }
}

//! Prompt templates for the pipeline stages

/// Disclaimer appended verbatim to every explanation
pub const DISCLAIMER: &str = "\n\n---\n**IMPORTANT DISCLAIMER**: This is educational information only, not legal advice.\nPlease consult a qualified attorney for specific legal matters.";

/// System prompt for the retrieval stage's relevance summarization
pub const RETRIEVER_SYSTEM: &str = "You are a legal document retrieval specialist.\n\
Analyze the retrieved documents and identify which are most relevant.\n\
Return a brief summary of key findings.";

/// System prompt for the reasoning stage
pub const REASONER_SYSTEM: &str = "You are a legal reasoning specialist.\n\
1. Analyze retrieved legal documents\n\
2. Identify relevant clauses and terms\n\
3. Construct logical chains with citations\n\
4. Verify claims against evidence\n\
5. Flag gaps or uncertainties\n\n\
IMPORTANT: Only cite supported claims. Do NOT provide legal advice.";

/// System prompt for the explanation stage
pub const EXPLAINER_SYSTEM: &str = "You are a legal education specialist.\n\
Act as a TUTOR, not advisor.\n\n\
Guidelines:\n\
1. Use simple, everyday language\n\
2. Provide analogies and examples\n\
3. Highlight key points\n\
4. Emphasize this is NOT legal advice\n\
5. Encourage professional consultation";

/// Prompt builder for the pipeline stages
pub struct PromptBuilder;

impl PromptBuilder {
    /// User prompt asking for a relevance summary of retrieved documents
    pub fn retriever_user(query: &str, documents: &str) -> String {
        format!(
            "Query: {query}\n\n\
             Documents:\n{documents}\n\n\
             Provide:\n\
             1. Relevant documents by number\n\
             2. Brief summary of findings"
        )
    }

    /// User prompt asking for cited reasoning over the evidence
    pub fn reasoner_user(query: &str, documents: &str) -> String {
        format!(
            "Query: {query}\n\n\
             Evidence:\n{documents}\n\n\
             Provide:\n\
             1. Key Legal Concepts\n\
             2. Evidence with Citations\n\
             3. Logical Connections\n\
             4. Verification Status\n\
             5. Gaps/Uncertainties"
        )
    }

    /// User prompt asking for the plain-language rewrite
    pub fn explainer_user(query: &str, reasoning: &str, status: &str) -> String {
        format!(
            "Question: {query}\n\n\
             Analysis:\n{reasoning}\n\n\
             Status: {status}\n\n\
             Provide:\n\
             1. Simple Explanation\n\
             2. Key Points\n\
             3. What to Watch For\n\
             4. Suggested Next Steps\n\
             5. Disclaimer"
        )
    }
}

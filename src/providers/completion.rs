//! Text-generation provider trait

use async_trait::async_trait;
use crate::error::Result;

/// Trait for LLM-backed text completion
///
/// The pipeline sends fixed prompt templates and treats the returned value as
/// opaque text to be line-split or substring-scanned. Implementations own
/// timeouts and retries; errors surface to the caller as run-level failures.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for a system/user prompt pair
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

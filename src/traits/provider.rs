//! GenerationProvider trait for external text-generation backends.
//!
//! Implementations wrap specific backends (OpenRouter-style chat
//! completions, Perplexity-style web research) and handle the specifics
//! of the wire format. The engine treats both operations as blocking
//! request/response calls with a bounded timeout.

use async_trait::async_trait;

use crate::error::ProviderResult;

/// Capability interface for the two logical generation operations.
///
/// Errors are returned as [`ProviderError`](crate::error::ProviderError)
/// so call sites that are allowed to degrade can pattern-match and
/// substitute a fallback explicitly, rather than swallowing failures
/// implicitly.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Return prose research content for a topic, backed by a
    /// web-informed generation backend.
    async fn research(&self, query: &str) -> ProviderResult<String>;

    /// Return generated text from a chat-style backend given a user
    /// prompt and a system prompt.
    async fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> ProviderResult<String>;
}

#[async_trait]
impl<P: GenerationProvider + ?Sized> GenerationProvider for &P {
    async fn research(&self, query: &str) -> ProviderResult<String> {
        (**self).research(query).await
    }

    async fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> ProviderResult<String> {
        (**self)
            .complete(prompt, system_prompt, temperature, max_tokens)
            .await
    }
}

//! HTTPS-backed generation provider.
//!
//! Speaks the common chat-completions JSON wire format against two
//! backends: an OpenRouter-style endpoint for `complete` and a
//! Perplexity-style web-informed endpoint for `research`. Non-2xx
//! responses and malformed bodies surface as [`ProviderError`]; the
//! engine's fallback rules decide what degrades and what propagates.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::traits::provider::GenerationProvider;

const DEFAULT_COMPLETION_BASE: &str = "https://openrouter.ai/api/v1";
const DEFAULT_RESEARCH_BASE: &str = "https://api.perplexity.ai";
const DEFAULT_COMPLETION_MODEL: &str = "openai/gpt-4o-mini";
const DEFAULT_RESEARCH_MODEL: &str = "sonar";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Generation provider over plain HTTPS chat-completions endpoints.
pub struct HttpProvider {
    client: Client,
    completion_key: Option<SecretString>,
    research_key: Option<SecretString>,
    completion_base: String,
    research_base: String,
    completion_model: String,
    research_model: String,
}

impl HttpProvider {
    /// Create a provider with both backend keys.
    pub fn new(completion_key: impl Into<String>, research_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            completion_key: Some(SecretString::from(completion_key.into())),
            research_key: Some(SecretString::from(research_key.into())),
            completion_base: DEFAULT_COMPLETION_BASE.to_string(),
            research_base: DEFAULT_RESEARCH_BASE.to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            research_model: DEFAULT_RESEARCH_MODEL.to_string(),
        }
    }

    /// Create from `OPENROUTER_API_KEY` / `PERPLEXITY_API_KEY`
    /// environment variables; either may be absent, in which case the
    /// corresponding operation fails with `MissingApiKey`.
    pub fn from_env() -> Self {
        let mut provider = Self::new("", "");
        provider.completion_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .map(SecretString::from);
        provider.research_key = std::env::var("PERPLEXITY_API_KEY")
            .ok()
            .map(SecretString::from);
        provider
    }

    /// Set the completion model.
    pub fn with_completion_model(mut self, model: impl Into<String>) -> Self {
        self.completion_model = model.into();
        self
    }

    /// Set the research model.
    pub fn with_research_model(mut self, model: impl Into<String>) -> Self {
        self.research_model = model.into();
        self
    }

    /// Set a custom completion base URL (for proxies or tests).
    pub fn with_completion_base(mut self, url: impl Into<String>) -> Self {
        self.completion_base = url.into();
        self
    }

    /// Set a custom research base URL (for proxies or tests).
    pub fn with_research_base(mut self, url: impl Into<String>) -> Self {
        self.research_base = url.into();
        self
    }

    async fn chat(
        &self,
        base: &str,
        key: &SecretString,
        request: &ChatRequest<'_>,
    ) -> ProviderResult<String> {
        let url = format!("{base}/chat/completions");
        debug!("provider call: {url} model={}", request.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Http(Box::new(e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ProviderError::MalformedResponse("response had no choices".to_string()))
    }
}

#[async_trait]
impl GenerationProvider for HttpProvider {
    async fn research(&self, query: &str) -> ProviderResult<String> {
        let key = self
            .research_key
            .as_ref()
            .filter(|k| !k.expose_secret().is_empty())
            .ok_or(ProviderError::MissingApiKey("research"))?;

        let request = ChatRequest {
            model: &self.research_model,
            messages: vec![ChatMessage {
                role: "user",
                content: query.to_string(),
            }],
            temperature: 0.2,
            max_tokens: 2000,
        };
        self.chat(&self.research_base, key, &request).await
    }

    async fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> ProviderResult<String> {
        let key = self
            .completion_key
            .as_ref()
            .filter(|k| !k.expose_secret().is_empty())
            .ok_or(ProviderError::MissingApiKey("completion"))?;

        let request = ChatRequest {
            model: &self.completion_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature,
            max_tokens,
        };
        self.chat(&self.completion_base, key, &request).await
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_before_any_network_io() {
        let provider = HttpProvider::new("", "");

        let err = provider.complete("p", "s", 0.7, 100).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey("completion")));

        let err = provider.research("q").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey("research")));
    }

    #[test]
    fn chat_request_serializes_role_tagged_messages() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello".to_string(),
            }],
            temperature: 0.5,
            max_tokens: 10,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 10);
    }
}

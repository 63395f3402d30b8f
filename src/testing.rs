//! Testing utilities including a mock generation provider.
//!
//! Useful for testing applications that use the engine without making
//! real network calls.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{ProviderError, ProviderResult};
use crate::traits::provider::GenerationProvider;

/// Record of a call made to the mock provider.
#[derive(Debug, Clone)]
pub enum ProviderCall {
    Research { query: String },
    Complete { prompt: String, system: String },
}

/// A mock generation provider for testing.
///
/// Responses are scripted by prompt substring; unmatched prompts get a
/// configurable default. Failures can be injected globally or per
/// prompt substring to exercise the fallback paths.
#[derive(Default, Clone)]
pub struct MockProvider {
    completions: Arc<RwLock<Vec<(String, String)>>>,
    default_completion: Arc<RwLock<Option<String>>>,
    research_response: Arc<RwLock<Option<String>>>,
    fail_completions: Arc<RwLock<bool>>,
    fail_research: Arc<RwLock<bool>>,
    failing_prompts: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<ProviderCall>>>,
}

impl MockProvider {
    /// Create a mock provider with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a completion: any prompt containing `needle` gets
    /// `response`.
    pub fn with_completion(self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.completions
            .write()
            .unwrap()
            .push((needle.into(), response.into()));
        self
    }

    /// Response for prompts no script matches (otherwise a fixed
    /// placeholder).
    pub fn with_default_completion(self, response: impl Into<String>) -> Self {
        *self.default_completion.write().unwrap() = Some(response.into());
        self
    }

    /// Script the research response.
    pub fn with_research(self, response: impl Into<String>) -> Self {
        *self.research_response.write().unwrap() = Some(response.into());
        self
    }

    /// Make every completion call fail.
    pub fn failing_completions(self) -> Self {
        *self.fail_completions.write().unwrap() = true;
        self
    }

    /// Make every research call fail.
    pub fn failing_research(self) -> Self {
        *self.fail_research.write().unwrap() = true;
        self
    }

    /// Make completion calls whose prompt contains `needle` fail.
    pub fn failing_when(self, needle: impl Into<String>) -> Self {
        self.failing_prompts.write().unwrap().push(needle.into());
        self
    }

    /// Snapshot of all recorded calls.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of completion calls recorded.
    pub fn completion_calls(&self) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, ProviderCall::Complete { .. }))
            .count()
    }

    fn injected_failure() -> ProviderError {
        ProviderError::Status {
            status: 503,
            message: "mock provider failure".to_string(),
        }
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    async fn research(&self, query: &str) -> ProviderResult<String> {
        self.calls.write().unwrap().push(ProviderCall::Research {
            query: query.to_string(),
        });

        if *self.fail_research.read().unwrap() {
            return Err(Self::injected_failure());
        }
        Ok(self
            .research_response
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| format!("Mock research about: {query}")))
    }

    async fn complete(
        &self,
        prompt: &str,
        system_prompt: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> ProviderResult<String> {
        self.calls.write().unwrap().push(ProviderCall::Complete {
            prompt: prompt.to_string(),
            system: system_prompt.to_string(),
        });

        if *self.fail_completions.read().unwrap() {
            return Err(Self::injected_failure());
        }
        if self
            .failing_prompts
            .read()
            .unwrap()
            .iter()
            .any(|needle| prompt.contains(needle) || system_prompt.contains(needle))
        {
            return Err(Self::injected_failure());
        }

        let scripted = self
            .completions
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| prompt.contains(needle) || system_prompt.contains(needle))
            .map(|(_, response)| response.clone());
        if let Some(response) = scripted {
            return Ok(response);
        }

        Ok(self
            .default_completion
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "Mock completion".to_string()))
    }
}

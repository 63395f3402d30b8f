//! Engine configuration.
//!
//! The weight table and thresholds live in one immutable structure so
//! tests can assert against the same source of truth the scorer uses.

use url::Url;

use crate::types::analysis::FactorKind;

/// Fixed weights for combining factor scores.
///
/// Weights sum to 1.0; [`ScoringWeights::total`] exists so tests can
/// verify the table they assert against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub word_count: f64,
    pub structure: f64,
    pub links: f64,
    pub topics: f64,
    pub comprehensiveness: f64,
}

impl ScoringWeights {
    /// Weight for a given factor.
    pub fn for_factor(&self, kind: FactorKind) -> f64 {
        match kind {
            FactorKind::WordCount => self.word_count,
            FactorKind::Structure => self.structure,
            FactorKind::Links => self.links,
            FactorKind::Topics => self.topics,
            FactorKind::Comprehensiveness => self.comprehensiveness,
        }
    }

    /// Sum of all weights; 1.0 for the default table.
    pub fn total(&self) -> f64 {
        FactorKind::ALL.iter().map(|k| self.for_factor(*k)).sum()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            word_count: 0.25,
            structure: 0.10,
            links: 0.20,
            topics: 0.20,
            comprehensiveness: 0.25,
        }
    }
}

/// Configuration for the analysis engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL used to classify links as internal vs external.
    pub base_url: Url,
    pub weights: ScoringWeights,
    /// Overall percentage score at or above which an article is a
    /// pillar post.
    pub pillar_threshold: f64,
    /// Per-factor normalized score below which the factor's
    /// recommendation is surfaced.
    pub recommendation_threshold: f64,
    /// Character prefix of the stripped body sent for the
    /// comprehensiveness rating.
    pub comprehensiveness_prefix_chars: usize,
    /// Minimum occurrences for a token to count as a topic.
    pub topic_min_occurrences: usize,
    /// Minimum token length for a topic.
    pub topic_min_length: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://example.com").expect("static URL"),
            weights: ScoringWeights::default(),
            pillar_threshold: 70.0,
            recommendation_threshold: 0.8,
            comprehensiveness_prefix_chars: 2000,
            topic_min_occurrences: 3,
            topic_min_length: 4,
        }
    }
}

impl EngineConfig {
    /// Configuration with a site base URL for link classification.
    pub fn for_site(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

/// Per-request options for the authoring pipeline.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Keywords to weave into the outline.
    pub keywords: Vec<String>,
    /// Desired tone of voice for the article body.
    pub tone: String,
    /// Whether to run the (optional) research stage.
    pub use_research: bool,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            tone: "informative".to_string(),
            use_research: true,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

impl GenerationOptions {
    /// Set keywords.
    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }

    /// Set the tone.
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Disable the research stage.
    pub fn without_research(mut self) -> Self {
        self.use_research = false;
        self
    }
}

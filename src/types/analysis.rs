//! Analysis result types.
//!
//! A fixed enumeration of five factors replaces the loosely-typed
//! associative arrays of earlier designs: each factor carries a tagged
//! measurement struct, and results iterate factors in a defined order so
//! recommendation ordering stays deterministic.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::article::ArticleId;

/// The five scored factors, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    WordCount,
    Structure,
    Links,
    Topics,
    Comprehensiveness,
}

impl FactorKind {
    /// All factors in evaluation order.
    pub const ALL: [FactorKind; 5] = [
        FactorKind::WordCount,
        FactorKind::Structure,
        FactorKind::Links,
        FactorKind::Topics,
        FactorKind::Comprehensiveness,
    ];

    /// Stable snake_case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::WordCount => "word_count",
            FactorKind::Structure => "structure",
            FactorKind::Links => "links",
            FactorKind::Topics => "topics",
            FactorKind::Comprehensiveness => "comprehensiveness",
        }
    }
}

impl std::fmt::Display for FactorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw measurements backing a factor score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FactorDetail {
    WordCount {
        words: usize,
    },
    Structure {
        h2_count: usize,
        h3_count: usize,
        paragraph_count: usize,
        /// Informational only; does not affect the score.
        has_lists: bool,
    },
    Links {
        internal: usize,
        external: usize,
        total: usize,
    },
    Topics {
        topic_count: usize,
        /// Top five topics by frequency.
        main_topics: Vec<String>,
    },
    Comprehensiveness {
        /// Free-text rating response, or a fixed message when the
        /// provider was unavailable.
        explanation: String,
        /// True when the fallback score was substituted.
        fallback: bool,
    },
}

/// A single factor's normalized score plus its measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    /// Normalized score in [0, 1].
    pub score: f64,
    pub detail: FactorDetail,
    /// Always present; surfaced in the aggregate only when `score`
    /// falls below the recommendation threshold.
    pub recommendation: String,
}

/// Immutable result of one analysis invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub article_id: ArticleId,
    pub title: String,
    /// `score >= pillar_threshold`
    pub is_pillar: bool,
    /// Weighted percentage score, 0–100, two-decimal precision.
    pub score: f64,
    /// Per-factor scores; insertion order is evaluation order.
    pub factors: IndexMap<FactorKind, FactorScore>,
    /// Recommendations for factors below threshold, in evaluation order.
    pub recommendations: Vec<String>,
    /// SHA-256 of the analyzed body, for staleness checks.
    pub content_hash: String,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Look up a factor's score.
    pub fn factor(&self, kind: FactorKind) -> Option<&FactorScore> {
        self.factors.get(&kind)
    }
}

/// Per-item outcome of a batch analysis.
///
/// Batch operations never abort on a single item's failure; failed
/// items are recorded here with the error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub article_id: ArticleId,
    pub success: bool,
    pub analysis: Option<AnalysisResult>,
    pub error: Option<String>,
}

impl BatchEntry {
    pub fn ok(analysis: AnalysisResult) -> Self {
        Self {
            article_id: analysis.article_id,
            success: true,
            analysis: Some(analysis),
            error: None,
        }
    }

    pub fn failed(article_id: ArticleId, error: impl Into<String>) -> Self {
        Self {
            article_id,
            success: false,
            analysis: None,
            error: Some(error.into()),
        }
    }
}

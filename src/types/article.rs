//! Article types owned by the [`PostStore`](crate::traits::store::PostStore).
//!
//! The engine reads articles and persists derived artifacts (analyses,
//! drafts); it never mutates article content directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for an article in the backing store.
pub type ArticleId = u64;

/// Publication state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Publicly visible; eligible for analysis and suggestions.
    Published,
    /// Unpublished draft.
    Draft,
    /// Awaiting review.
    Pending,
}

/// A published (or draft) article as stored by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    /// Rich-text/HTML body.
    pub body: String,
    pub status: ArticleStatus,
}

impl Article {
    /// Create a published article.
    pub fn new(id: ArticleId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            status: ArticleStatus::Published,
        }
    }

    /// Set the publication status.
    pub fn with_status(mut self, status: ArticleStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the article is eligible for analysis.
    pub fn is_published(&self) -> bool {
        self.status == ArticleStatus::Published
    }
}

/// Output of the authoring pipeline, handed to the store for persistence.
///
/// The pipeline itself never writes storage; `create_draft` is invoked by
/// the engine after the record is assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRecord {
    /// The topic the draft was generated from.
    pub topic: String,
    /// SEO title (possibly the truncated-topic fallback).
    pub title: String,
    /// Formatted article markup.
    pub content: String,
    /// Short summary (possibly the truncated-content fallback).
    pub excerpt: String,
    /// Research context gathered for the topic; empty if research was
    /// skipped or failed.
    pub research: String,
    /// Structural outline the content was written from.
    pub outline: String,
    /// Whether research content actually informed the draft.
    pub used_research: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-topic outcome of a batch generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub topic: String,
    pub success: bool,
    pub article_id: Option<ArticleId>,
    pub error: Option<String>,
}

impl GenerationOutcome {
    pub fn ok(topic: String, article_id: ArticleId) -> Self {
        Self {
            topic,
            success: true,
            article_id: Some(article_id),
            error: None,
        }
    }

    pub fn failed(topic: String, error: impl Into<String>) -> Self {
        Self {
            topic,
            success: false,
            article_id: None,
            error: Some(error.into()),
        }
    }
}

//! Related-content suggestion types.

use serde::{Deserialize, Serialize};

use crate::types::article::ArticleId;

/// Lightweight reference to an existing article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub id: ArticleId,
    pub title: String,
}

/// The analyzed article a suggestion set was derived from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarRef {
    pub id: ArticleId,
    pub title: String,
    /// Up to three extracted topics the suggestions are built around.
    pub topics: Vec<String>,
}

/// Output of a suggestion request.
///
/// `new_suggestions` (generated titles) and `existing_related` (store
/// search hits) are produced independently and are intentionally not
/// cross-deduplicated; callers report them separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub pillar: PillarRef,
    /// Candidate titles for new articles, at most the requested limit.
    pub new_suggestions: Vec<String>,
    /// Existing articles matching the extracted topics, excluding the
    /// source article.
    pub existing_related: Vec<ArticleRef>,
}

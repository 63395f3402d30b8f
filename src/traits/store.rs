//! PostStore trait - the article/analysis storage collaborator.
//!
//! The store is externally synchronized; analysis persistence is
//! last-write-wins with no versioning.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    analysis::AnalysisResult,
    article::{Article, ArticleId, DraftRecord},
};

/// Storage collaborator for articles and derived analyses.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch an article by id. `None` if it does not exist.
    async fn get(&self, id: ArticleId) -> Result<Option<Article>>;

    /// Full-text search over published articles.
    ///
    /// Returns up to `limit` matches for `query`, excluding the given
    /// ids.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        exclude: &[ArticleId],
    ) -> Result<Vec<Article>>;

    /// Ids of all published articles.
    async fn list_published(&self) -> Result<Vec<ArticleId>>;

    /// Persist an analysis keyed by article id (overwrite semantics).
    async fn save_analysis(&self, id: ArticleId, analysis: &AnalysisResult) -> Result<()>;

    /// Retrieve the stored analysis for an article, if any.
    async fn get_analysis(&self, id: ArticleId) -> Result<Option<AnalysisResult>>;

    /// Persist a generated draft; returns the new article's id.
    async fn create_draft(&self, draft: &DraftRecord) -> Result<ArticleId>;
}

#[async_trait]
impl<T: PostStore + ?Sized> PostStore for std::sync::Arc<T> {
    async fn get(&self, id: ArticleId) -> Result<Option<Article>> {
        (**self).get(id).await
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
        exclude: &[ArticleId],
    ) -> Result<Vec<Article>> {
        (**self).search(query, limit, exclude).await
    }

    async fn list_published(&self) -> Result<Vec<ArticleId>> {
        (**self).list_published().await
    }

    async fn save_analysis(&self, id: ArticleId, analysis: &AnalysisResult) -> Result<()> {
        (**self).save_analysis(id, analysis).await
    }

    async fn get_analysis(&self, id: ArticleId) -> Result<Option<AnalysisResult>> {
        (**self).get_analysis(id).await
    }

    async fn create_draft(&self, draft: &DraftRecord) -> Result<ArticleId> {
        (**self).create_draft(draft).await
    }
}

//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::Result;
use crate::text::strip_markup;
use crate::traits::store::PostStore;
use crate::types::{
    analysis::AnalysisResult,
    article::{Article, ArticleId, ArticleStatus, DraftRecord},
};

/// In-memory store for articles and analyses.
///
/// Useful for testing and development. Not suitable for production as
/// data is lost on restart.
pub struct MemoryStore {
    articles: RwLock<HashMap<ArticleId, Article>>,
    analyses: RwLock<HashMap<ArticleId, AnalysisResult>>,
    next_id: RwLock<ArticleId>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            articles: RwLock::new(HashMap::new()),
            analyses: RwLock::new(HashMap::new()),
            next_id: RwLock::new(1),
        }
    }

    /// Insert or replace an article.
    pub fn put_article(&self, article: Article) {
        let mut next = self.next_id.write().unwrap();
        if article.id >= *next {
            *next = article.id + 1;
        }
        self.articles.write().unwrap().insert(article.id, article);
    }

    /// Number of stored articles.
    pub fn article_count(&self) -> usize {
        self.articles.read().unwrap().len()
    }

    /// Number of stored analyses.
    pub fn analysis_count(&self) -> usize {
        self.analyses.read().unwrap().len()
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        self.articles.write().unwrap().clear();
        self.analyses.write().unwrap().clear();
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn get(&self, id: ArticleId) -> Result<Option<Article>> {
        Ok(self.articles.read().unwrap().get(&id).cloned())
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
        exclude: &[ArticleId],
    ) -> Result<Vec<Article>> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|t| t.to_lowercase())
            .collect();

        let articles = self.articles.read().unwrap();
        let mut matches: Vec<Article> = articles
            .values()
            .filter(|a| a.is_published() && !exclude.contains(&a.id))
            .filter(|a| {
                let haystack =
                    format!("{} {}", a.title, strip_markup(&a.body)).to_lowercase();
                terms.iter().any(|t| haystack.contains(t))
            })
            .cloned()
            .collect();

        // Deterministic order for tests.
        matches.sort_by_key(|a| a.id);
        matches.truncate(limit);
        Ok(matches)
    }

    async fn list_published(&self) -> Result<Vec<ArticleId>> {
        let mut ids: Vec<ArticleId> = self
            .articles
            .read()
            .unwrap()
            .values()
            .filter(|a| a.is_published())
            .map(|a| a.id)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn save_analysis(&self, id: ArticleId, analysis: &AnalysisResult) -> Result<()> {
        self.analyses.write().unwrap().insert(id, analysis.clone());
        Ok(())
    }

    async fn get_analysis(&self, id: ArticleId) -> Result<Option<AnalysisResult>> {
        Ok(self.analyses.read().unwrap().get(&id).cloned())
    }

    async fn create_draft(&self, draft: &DraftRecord) -> Result<ArticleId> {
        let id = {
            let mut next = self.next_id.write().unwrap();
            let id = *next;
            *next += 1;
            id
        };
        let article = Article::new(id, draft.title.clone(), draft.content.clone())
            .with_status(ArticleStatus::Draft);
        self.articles.write().unwrap().insert(id, article);
        Ok(id)
    }
}

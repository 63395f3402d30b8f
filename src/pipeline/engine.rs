//! The Engine - main entry point for the pillar analysis library.
//!
//! Combines the factor scorers into weighted analyses, classifies
//! pillar content, produces related-content suggestions, and drives the
//! authoring pipeline. Storage and text generation are collaborators
//! injected as trait objects.

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::pacing::{IntervalPacer, Pacer};
use crate::pipeline::factors::{
    score_comprehensiveness, score_links, score_structure, score_topics, score_word_count,
};
use crate::pipeline::generate::generate_draft;
use crate::pipeline::prompts::{format_related_topics_prompt, WRITER_SYSTEM_PROMPT};
use crate::pipeline::suggest::{parse_related_topics, template_suggestions};
use crate::text::{extract_topics, strip_markup};
use crate::traits::{provider::GenerationProvider, store::PostStore};
use crate::types::{
    analysis::{AnalysisResult, BatchEntry, FactorKind, FactorScore},
    article::{Article, ArticleId, GenerationOutcome},
    config::{EngineConfig, GenerationOptions},
    suggestion::{ArticleRef, PillarRef, SuggestionSet},
};

/// Pillar-content analysis and authoring engine.
///
/// # Example
///
/// ```rust,ignore
/// let engine = Engine::new(store, provider)
///     .with_config(EngineConfig::for_site(base_url));
///
/// let analysis = engine.analyze(42).await?;
/// if analysis.is_pillar {
///     let suggestions = engine.suggest(42, 5).await?;
/// }
/// ```
pub struct Engine<S: PostStore, P: GenerationProvider> {
    store: S,
    provider: P,
    config: EngineConfig,
    pacer: Arc<dyn Pacer>,
}

impl<S: PostStore, P: GenerationProvider> Engine<S, P> {
    /// Create an engine with default configuration and ~100ms batch
    /// pacing.
    pub fn new(store: S, provider: P) -> Self {
        Self {
            store,
            provider,
            config: EngineConfig::default(),
            pacer: Arc::new(IntervalPacer::default()),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Inject a custom pacer (tests use [`NoopPacer`](crate::pacing::NoopPacer)).
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Analyze a single article for pillar potential.
    ///
    /// Fails with `NotFound` if the article does not exist and
    /// `NotPublished` if it is not published. The result is persisted
    /// under the article's id with overwrite semantics before being
    /// returned.
    pub async fn analyze(&self, id: ArticleId) -> Result<AnalysisResult> {
        let article = self.published_article(id).await?;
        let analysis = self.compute_analysis(&article).await;

        self.store.save_analysis(id, &analysis).await?;
        info!(
            "analyzed article {id}: score={:.2} pillar={}",
            analysis.score, analysis.is_pillar
        );
        Ok(analysis)
    }

    /// Analyze many articles sequentially.
    ///
    /// Per-item failures are logged and recorded in the returned
    /// entries; the batch never aborts. Items are paced by the injected
    /// pacer to respect provider rate limits.
    pub async fn bulk_analyze(&self, ids: &[ArticleId]) -> Vec<BatchEntry> {
        self.bulk_analyze_with_cancel(ids, &CancellationToken::new())
            .await
    }

    /// [`bulk_analyze`](Self::bulk_analyze) with cooperative
    /// cancellation, checked between items.
    pub async fn bulk_analyze_with_cancel(
        &self,
        ids: &[ArticleId],
        cancel: &CancellationToken,
    ) -> Vec<BatchEntry> {
        let mut entries = Vec::with_capacity(ids.len());

        for &id in ids {
            if cancel.is_cancelled() {
                info!("bulk analysis cancelled after {} items", entries.len());
                break;
            }
            self.pacer.pace().await;

            match self.analyze(id).await {
                Ok(analysis) => entries.push(BatchEntry::ok(analysis)),
                Err(err) => {
                    warn!("bulk analysis skipped article {id}: {err}");
                    entries.push(BatchEntry::failed(id, err.to_string()));
                }
            }
        }
        entries
    }

    /// Analyze all published articles and return the top pillar posts,
    /// sorted by score descending (stable), truncated to `limit`.
    pub async fn find_pillar_posts(&self, limit: usize) -> Result<Vec<AnalysisResult>> {
        if limit == 0 {
            return Err(EngineError::invalid("limit must be positive"));
        }

        let ids = self.store.list_published().await?;
        debug!("scanning {} published articles for pillars", ids.len());

        let mut pillars = Vec::new();
        for id in ids {
            self.pacer.pace().await;
            match self.analyze(id).await {
                Ok(analysis) if analysis.is_pillar => pillars.push(analysis),
                Ok(_) => {}
                Err(err) => warn!("pillar scan skipped article {id}: {err}"),
            }
        }

        // Stable sort keeps original order for equal scores.
        pillars.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pillars.truncate(limit);
        Ok(pillars)
    }

    /// Read back the stored analysis for an article, if any.
    pub async fn cached_analysis(&self, id: ArticleId) -> Result<Option<AnalysisResult>> {
        self.store.get_analysis(id).await
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    /// Suggest related content for an article.
    ///
    /// Generated titles and existing-article matches are produced
    /// independently and reported separately; they are intentionally
    /// not deduplicated against each other.
    pub async fn suggest(&self, id: ArticleId, limit: usize) -> Result<SuggestionSet> {
        if limit == 0 {
            return Err(EngineError::invalid("limit must be positive"));
        }
        let article = self.published_article(id).await?;

        let topics: Vec<String> = extract_topics(
            &article.body,
            self.config.topic_min_occurrences,
            self.config.topic_min_length,
        )
        .into_iter()
        .take(3)
        .map(|(term, _)| term)
        .collect();
        debug!("suggestion topics for article {id}: {topics:?}");

        let subject = topics.join(", ");
        let existing_titles = self.published_titles().await?;

        // Provider failure (or an empty answer) falls back to the
        // deterministic templates - never an error for this path.
        let generated = match self
            .provider
            .complete(
                &format_related_topics_prompt(&subject, &existing_titles),
                WRITER_SYSTEM_PROMPT,
                0.7,
                500,
            )
            .await
        {
            Ok(response) => parse_related_topics(&response),
            Err(err) => {
                warn!("related-topic generation failed, using templates: {err}");
                Vec::new()
            }
        };

        let mut new_suggestions = if generated.is_empty() {
            template_suggestions(&topics, limit)
        } else {
            generated
        };
        new_suggestions.truncate(limit);

        let existing_related = if topics.is_empty() {
            Vec::new()
        } else {
            self.store
                .search(&topics.join(" "), limit, &[id])
                .await?
                .into_iter()
                .map(|a| ArticleRef {
                    id: a.id,
                    title: a.title,
                })
                .collect()
        };

        Ok(SuggestionSet {
            pillar: PillarRef {
                id,
                title: article.title,
                topics,
            },
            new_suggestions,
            existing_related,
        })
    }

    // =========================================================================
    // Authoring
    // =========================================================================

    /// Generate a draft article for a topic and persist it via the
    /// store. Returns the new draft's id.
    pub async fn generate(&self, topic: &str, options: &GenerationOptions) -> Result<ArticleId> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(EngineError::invalid("topic cannot be empty"));
        }

        let draft = generate_draft(&self.provider, topic, options).await?;
        self.store.create_draft(&draft).await
    }

    /// Generate drafts for several topics sequentially, paced, with
    /// per-item outcomes; never aborts on one topic's failure.
    pub async fn generate_batch(
        &self,
        topics: &[String],
        options: &GenerationOptions,
    ) -> Vec<GenerationOutcome> {
        self.generate_batch_with_cancel(topics, options, &CancellationToken::new())
            .await
    }

    /// [`generate_batch`](Self::generate_batch) with cooperative
    /// cancellation, checked between topics. A cancelled batch returns
    /// the outcomes completed so far.
    pub async fn generate_batch_with_cancel(
        &self,
        topics: &[String],
        options: &GenerationOptions,
        cancel: &CancellationToken,
    ) -> Vec<GenerationOutcome> {
        let mut outcomes = Vec::with_capacity(topics.len());

        for topic in topics {
            if cancel.is_cancelled() {
                info!("batch generation cancelled after {} items", outcomes.len());
                break;
            }
            self.pacer.pace().await;

            match self.generate(topic, options).await {
                Ok(id) => outcomes.push(GenerationOutcome::ok(topic.clone(), id)),
                Err(err) => {
                    warn!("batch generation failed for topic '{topic}': {err}");
                    outcomes.push(GenerationOutcome::failed(topic.clone(), err.to_string()));
                }
            }
        }
        outcomes
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn published_article(&self, id: ArticleId) -> Result<Article> {
        let article = self
            .store
            .get(id)
            .await?
            .ok_or(EngineError::NotFound { id })?;
        if !article.is_published() {
            return Err(EngineError::NotPublished { id });
        }
        Ok(article)
    }

    async fn published_titles(&self) -> Result<Vec<String>> {
        let mut titles = Vec::new();
        for id in self.store.list_published().await? {
            if let Some(article) = self.store.get(id).await? {
                titles.push(article.title);
            }
        }
        Ok(titles)
    }

    /// Run all five factor scorers and combine them.
    async fn compute_analysis(&self, article: &Article) -> AnalysisResult {
        let plain = strip_markup(&article.body);

        let mut factors: IndexMap<FactorKind, FactorScore> = IndexMap::new();
        factors.insert(FactorKind::WordCount, score_word_count(&plain));
        factors.insert(FactorKind::Structure, score_structure(&article.body));
        factors.insert(
            FactorKind::Links,
            score_links(&article.body, &self.config.base_url),
        );
        factors.insert(
            FactorKind::Topics,
            score_topics(&article.body, &self.config),
        );
        factors.insert(
            FactorKind::Comprehensiveness,
            score_comprehensiveness(&self.provider, &plain, &self.config).await,
        );

        let weighted: f64 = factors
            .iter()
            .map(|(kind, factor)| factor.score * self.config.weights.for_factor(*kind))
            .sum();
        let score = round2(weighted * 100.0);

        // Recommendations in evaluation order, only for factors below
        // threshold.
        let recommendations = factors
            .values()
            .filter(|f| f.score < self.config.recommendation_threshold)
            .map(|f| f.recommendation.clone())
            .collect();

        AnalysisResult {
            article_id: article.id,
            title: article.title.clone(),
            is_pillar: score >= self.config.pillar_threshold,
            score,
            factors,
            recommendations,
            content_hash: format!("{:x}", Sha256::digest(article.body.as_bytes())),
            analyzed_at: Utc::now(),
        }
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_behaves() {
        assert_eq!(round2(34.499999), 34.5);
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(0.005), 0.01);
    }
}

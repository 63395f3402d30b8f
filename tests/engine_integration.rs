//! Integration tests for the analysis and authoring engine.
//!
//! These tests drive the full workflows through the public API:
//! 1. Analyze articles and classify pillar content
//! 2. Batch analysis with per-item failure handling
//! 3. Related-content suggestions with template fallback
//! 4. The draft generation pipeline and its degradation paths

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pillar_engine::{
    generate_draft, Article, ArticleStatus, Engine, EngineError, FactorDetail, FactorKind,
    GenerationOptions, MemoryStore, MockProvider, NoopPacer, Pacer, PostStore,
};
use tokio_util::sync::CancellationToken;

/// Words that qualify as extracted topics (long enough, not stopwords).
const TOPIC_WORDS: [&str; 10] = [
    "compost",
    "mulching",
    "pruning",
    "watering",
    "seedling",
    "harvest",
    "perennial",
    "fertilizer",
    "greenhouse",
    "trellis",
];

/// Build a body that maxes out every deterministic factor: 2000+ words,
/// 3 h2 / 5 h3 / 10+ paragraphs, 12 links (4 internal to example.com),
/// and 10+ recurring topic terms. `marker` leads the text so provider
/// prompts for this article can be matched on it.
fn pillar_body(marker: &str) -> String {
    let mut body = format!("<p>{}</p>", format!("{marker} ").repeat(3));
    for i in 1..=3 {
        body.push_str(&format!("<h2>Section {i}</h2>"));
    }
    for i in 1..=5 {
        body.push_str(&format!("<h3>Detail {i}</h3>"));
    }
    for word in TOPIC_WORDS {
        body.push_str(&format!("<p>{}</p>", format!("{word} ").repeat(3)));
    }
    for i in 1..=4 {
        body.push_str(&format!(
            "<a href=\"https://example.com/posts/{i}\">related post</a>"
        ));
    }
    for i in 1..=8 {
        body.push_str(&format!(
            "<a href=\"https://other.example.org/{i}\">source</a>"
        ));
    }
    body.push_str(&format!("<p>{}</p>", "garden ".repeat(2000)));
    body
}

/// Engine over a shared in-memory store, with pacing disabled so batch
/// tests run without wall-clock delay.
fn test_engine(
    store: &Arc<MemoryStore>,
    provider: MockProvider,
) -> Engine<Arc<MemoryStore>, MockProvider> {
    Engine::new(Arc::clone(store), provider).with_pacer(Arc::new(NoopPacer))
}

/// Pacer that cancels the shared token while admitting the first item,
/// so a batch completes exactly one item before observing cancellation.
struct CancelOnFirstPace {
    cancel: CancellationToken,
    paced: AtomicUsize,
}

impl CancelOnFirstPace {
    fn new(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            paced: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Pacer for CancelOnFirstPace {
    async fn pace(&self) {
        if self.paced.fetch_add(1, Ordering::SeqCst) == 0 {
            self.cancel.cancel();
        }
    }
}

// =========================================================================
// Analysis
// =========================================================================

#[tokio::test]
async fn perfect_article_scores_one_hundred() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "The Complete Guide", pillar_body("alphaword")));

    let provider = MockProvider::new()
        .with_completion("Analyze the following content", "100 - exhaustive coverage");
    let engine = test_engine(&store, provider);

    let analysis = engine.analyze(1).await.unwrap();

    assert_eq!(analysis.score, 100.0);
    assert!(analysis.is_pillar);
    assert!(analysis.recommendations.is_empty());
    for kind in FactorKind::ALL {
        assert_eq!(analysis.factors[&kind].score, 1.0, "factor {kind}");
    }
}

#[tokio::test]
async fn empty_article_hits_the_score_floor() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "Empty", ""));

    let provider = MockProvider::new().failing_completions();
    let engine = test_engine(&store, provider);

    let analysis = engine.analyze(1).await.unwrap();

    assert_eq!(analysis.score, 34.5);
    assert!(!analysis.is_pillar);
    assert_eq!(analysis.factors[&FactorKind::WordCount].score, 0.20);
    assert_eq!(analysis.factors[&FactorKind::Structure].score, 0.30);
    assert_eq!(analysis.factors[&FactorKind::Links].score, 0.30);
    assert_eq!(analysis.factors[&FactorKind::Topics].score, 0.40);
    assert_eq!(analysis.factors[&FactorKind::Comprehensiveness].score, 0.50);

    // Every factor is below threshold, so every recommendation surfaces.
    assert_eq!(analysis.recommendations.len(), 5);

    match &analysis.factors[&FactorKind::Comprehensiveness].detail {
        FactorDetail::Comprehensiveness { fallback, .. } => assert!(fallback),
        other => panic!("unexpected detail: {other:?}"),
    }
}

#[tokio::test]
async fn analyze_rejects_missing_and_unpublished_articles() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(7, "Draft", "<p>wip</p>").with_status(ArticleStatus::Draft));
    let engine = test_engine(&store, MockProvider::new());

    let missing = engine.analyze(99).await.unwrap_err();
    assert!(matches!(missing, EngineError::NotFound { id: 99 }));

    let unpublished = engine.analyze(7).await.unwrap_err();
    assert!(matches!(unpublished, EngineError::NotPublished { id: 7 }));
}

#[tokio::test]
async fn analysis_round_trips_through_the_store() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "Guide", pillar_body("roundtrip")));
    let engine = test_engine(&store, MockProvider::new());

    let analysis = engine.analyze(1).await.unwrap();
    let cached = engine.cached_analysis(1).await.unwrap().unwrap();

    assert_eq!(cached, analysis);
    assert!(engine.cached_analysis(999).await.unwrap().is_none());
}

#[tokio::test]
async fn bulk_analyze_records_failures_without_aborting() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "First", pillar_body("firstmark")));
    store.put_article(Article::new(3, "Third", "<p>short piece</p>"));

    let engine = test_engine(&store, MockProvider::new());
    let entries = engine.bulk_analyze(&[1, 2, 3]).await;

    assert_eq!(entries.len(), 3);
    assert_eq!(entries.iter().filter(|e| e.success).count(), 2);

    assert!(entries[0].success);
    assert_eq!(entries[0].article_id, 1);

    assert!(!entries[1].success);
    assert_eq!(entries[1].article_id, 2);
    assert!(entries[1].analysis.is_none());
    assert!(entries[1].error.as_deref().unwrap().contains("not found"));

    assert!(entries[2].success);
    assert!(entries[2].analysis.is_some());
}

#[tokio::test]
async fn cancelled_batch_stops_before_the_first_item() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "First", pillar_body("cancelmark")));
    let engine = test_engine(&store, MockProvider::new());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let entries = engine.bulk_analyze_with_cancel(&[1], &cancel).await;
    assert!(entries.is_empty());
    assert_eq!(store.analysis_count(), 0);
}

#[tokio::test]
async fn mid_batch_cancellation_keeps_completed_entries() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "First", "<p>one</p>"));
    store.put_article(Article::new(2, "Second", "<p>two</p>"));
    store.put_article(Article::new(3, "Third", "<p>three</p>"));

    let cancel = CancellationToken::new();
    let engine = Engine::new(Arc::clone(&store), MockProvider::new())
        .with_pacer(Arc::new(CancelOnFirstPace::new(cancel.clone())));

    let entries = engine.bulk_analyze_with_cancel(&[1, 2, 3], &cancel).await;

    assert_eq!(entries.len(), 1);
    assert!(entries[0].success);
    assert_eq!(entries[0].article_id, 1);
    assert_eq!(store.analysis_count(), 1);
}

#[tokio::test]
async fn find_pillar_posts_sorts_by_score_descending() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "Strong", pillar_body("alphaword")));
    store.put_article(Article::new(2, "Stronger", pillar_body("betaword")));
    store.put_article(Article::new(3, "Thin", "<p>a few words only</p>"));

    // Per-article ratings, matched on the leading marker in the prompt.
    let provider = MockProvider::new()
        .with_completion("alphaword", "80 out of 100")
        .with_completion("betaword", "100 - complete");
    let engine = test_engine(&store, provider);

    let pillars = engine.find_pillar_posts(5).await.unwrap();

    assert_eq!(pillars.len(), 2);
    assert_eq!(pillars[0].article_id, 2);
    assert_eq!(pillars[0].score, 100.0);
    assert_eq!(pillars[1].article_id, 1);
    assert_eq!(pillars[1].score, 95.0);

    assert!(matches!(
        engine.find_pillar_posts(0).await.unwrap_err(),
        EngineError::InvalidInput { .. }
    ));
}

// =========================================================================
// Suggestions
// =========================================================================

fn topical_body() -> String {
    let mut body = String::from("<p>");
    body.push_str(&"gardening ".repeat(5));
    body.push_str(&"compost ".repeat(4));
    body.push_str(&"mulching ".repeat(3));
    body.push_str("</p>");
    body
}

#[tokio::test]
async fn suggest_parses_provider_topics() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "Gardening Guide", topical_body()));

    let provider = MockProvider::new().with_completion(
        "Generate 5-8 related blog post topics",
        "1. Raised bed design\n2. Winter composting\n3. Drip irrigation systems",
    );
    let engine = test_engine(&store, provider);

    let set = engine.suggest(1, 5).await.unwrap();

    assert_eq!(set.pillar.id, 1);
    assert_eq!(
        set.pillar.topics,
        vec!["gardening", "compost", "mulching"]
    );
    assert_eq!(
        set.new_suggestions,
        vec![
            "Raised bed design",
            "Winter composting",
            "Drip irrigation systems",
        ]
    );
}

#[tokio::test]
async fn suggest_falls_back_to_templates_on_provider_failure() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "Gardening Guide", topical_body()));
    store.put_article(Article::new(2, "Compost Basics", "<p>compost starter tips</p>"));

    let provider = MockProvider::new().failing_completions();
    let engine = test_engine(&store, provider);

    let set = engine.suggest(1, 5).await.unwrap();

    // Templates interleave phrasings across topics, capped at the limit.
    assert_eq!(
        set.new_suggestions,
        vec![
            "Advanced techniques for gardening",
            "Advanced techniques for compost",
            "Advanced techniques for mulching",
            "gardening best practices",
            "compost best practices",
        ]
    );
    let mut deduped = set.new_suggestions.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), set.new_suggestions.len());

    // The existing-article search still runs, excluding the source.
    assert_eq!(set.existing_related.len(), 1);
    assert_eq!(set.existing_related[0].id, 2);
    assert_eq!(set.existing_related[0].title, "Compost Basics");
}

#[tokio::test]
async fn suggest_validates_the_limit() {
    let store = Arc::new(MemoryStore::new());
    store.put_article(Article::new(1, "Guide", topical_body()));
    let engine = test_engine(&store, MockProvider::new());

    assert!(matches!(
        engine.suggest(1, 0).await.unwrap_err(),
        EngineError::InvalidInput { .. }
    ));
}

// =========================================================================
// Authoring
// =========================================================================

#[tokio::test]
async fn generate_persists_a_formatted_draft() {
    let store = Arc::new(MemoryStore::new());
    let provider = MockProvider::new()
        .with_research("Urban gardens are on the rise.")
        .with_completion("Create a structured outline", "# Why Garden\n# Getting Started")
        .with_completion(
            "Write a complete blog post",
            "Gardens reward patience.\n\n# Why Garden\n\nFresh food tastes better.",
        )
        .with_completion("Create a title", "\"Start Your First Garden\"")
        .with_completion("Summarize this content", "A practical primer on starting a garden.");
    let engine = test_engine(&store, provider);

    let id = engine
        .generate("urban gardening", &GenerationOptions::default())
        .await
        .unwrap();

    let draft = store.get(id).await.unwrap().unwrap();
    assert_eq!(draft.status, ArticleStatus::Draft);
    assert!(!draft.is_published());
    // Wrapping quotes stripped from the generated title.
    assert_eq!(draft.title, "Start Your First Garden");
    assert!(draft.body.contains("<h2>Why Garden</h2>"));
    assert!(draft.body.contains("<p>Gardens reward patience.</p>"));
}

#[tokio::test]
async fn research_failure_degrades_to_an_unresearched_draft() {
    let provider = MockProvider::new()
        .failing_research()
        .with_default_completion("Down-to-earth gardening advice.");

    let draft = generate_draft(&provider, "gardening", &GenerationOptions::default())
        .await
        .unwrap();

    assert!(!draft.used_research);
    assert!(draft.research.is_empty());
    assert!(!draft.content.is_empty());
}

#[tokio::test]
async fn outline_failure_aborts_generation() {
    let provider = MockProvider::new()
        .with_default_completion("text")
        .failing_when("Create a structured outline");

    let err = generate_draft(&provider, "gardening", &GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Provider(_)));
}

#[tokio::test]
async fn title_failure_falls_back_to_the_topic() {
    let provider = MockProvider::new()
        .with_default_completion("Body text for the post.")
        .failing_when("Create a title");

    let draft = generate_draft(&provider, "gardening", &GenerationOptions::default())
        .await
        .unwrap();
    assert_eq!(draft.title, "gardening");
}

#[tokio::test]
async fn excerpt_failure_falls_back_to_truncated_content() {
    let provider = MockProvider::new()
        .with_default_completion("Body text for the post.")
        .failing_when("Summarize this content");

    let draft = generate_draft(&provider, "gardening", &GenerationOptions::default())
        .await
        .unwrap();
    assert_eq!(draft.excerpt, "Body text for the post....");
}

#[tokio::test]
async fn generate_rejects_blank_topics() {
    let store = Arc::new(MemoryStore::new());
    let engine = test_engine(&store, MockProvider::new());

    let err = engine
        .generate("   ", &GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput { .. }));
}

#[tokio::test]
async fn generate_batch_reports_per_topic_outcomes() {
    let store = Arc::new(MemoryStore::new());
    let provider = MockProvider::new()
        .with_default_completion("Some generated text.")
        .failing_when("about: broken topic");
    let engine = test_engine(&store, provider);

    let topics = vec!["good topic".to_string(), "broken topic".to_string()];
    let outcomes = engine
        .generate_batch(&topics, &GenerationOptions::default())
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].success);
    assert!(outcomes[0].article_id.is_some());
    assert!(!outcomes[1].success);
    assert!(outcomes[1].error.is_some());
    assert_eq!(store.article_count(), 1);
}

#[tokio::test]
async fn cancelled_generation_batch_keeps_completed_outcomes() {
    let store = Arc::new(MemoryStore::new());
    let provider = MockProvider::new().with_default_completion("Some generated text.");

    let cancel = CancellationToken::new();
    let engine = Engine::new(Arc::clone(&store), provider)
        .with_pacer(Arc::new(CancelOnFirstPace::new(cancel.clone())));

    let topics = vec!["first topic".to_string(), "second topic".to_string()];
    let outcomes = engine
        .generate_batch_with_cancel(&topics, &GenerationOptions::default(), &cancel)
        .await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].success);
    assert_eq!(outcomes[0].topic, "first topic");
    assert_eq!(store.article_count(), 1);
}

//! Pillar-Content Analysis & Authoring Library
//!
//! Scans published articles, computes a weighted multi-factor authority
//! score for each, classifies posts as pillar content, generates
//! related-topic suggestions, and drives an AI authoring pipeline with
//! graceful degradation when generation backends fail.
//!
//! # Design Philosophy
//!
//! - Deterministic scoring: fixed weights and thresholds live in one
//!   configuration structure so tests assert against the same source of
//!   truth the scorer uses.
//! - Explicit degradation: callers that may substitute a fallback
//!   pattern-match on `Result` at the call site; nothing is swallowed
//!   implicitly.
//! - Collaborators behind traits: storage ([`PostStore`]) and text
//!   generation ([`GenerationProvider`]) are injected, so the core is
//!   testable without network or a database.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pillar_engine::{Engine, EngineConfig, HttpProvider, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let provider = HttpProvider::from_env();
//! let engine = Engine::new(store, provider);
//!
//! let analysis = engine.analyze(42).await?;
//! println!("score {:.2}, pillar: {}", analysis.score, analysis.is_pillar);
//!
//! let suggestions = engine.suggest(42, 5).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (GenerationProvider, PostStore)
//! - [`types`] - Articles, analyses, suggestions, configuration
//! - [`pipeline`] - Factor scorers, the Engine, and the authoring pipeline
//! - [`text`] - Markup stripping and topic term extraction
//! - [`providers`] - HTTPS provider implementation
//! - [`stores`] - Storage implementations (MemoryStore)
//! - [`pacing`] - Batch pacing abstraction
//! - [`testing`] - Mock provider for tests

pub mod error;
pub mod pacing;
pub mod pipeline;
pub mod providers;
pub mod stores;
pub mod testing;
pub mod text;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{EngineError, ProviderError, ProviderResult, Result};
pub use traits::{provider::GenerationProvider, store::PostStore};
pub use types::{
    analysis::{AnalysisResult, BatchEntry, FactorDetail, FactorKind, FactorScore},
    article::{Article, ArticleId, ArticleStatus, DraftRecord, GenerationOutcome},
    config::{EngineConfig, GenerationOptions, ScoringWeights},
    suggestion::{ArticleRef, PillarRef, SuggestionSet},
};

// Re-export the engine and pipeline helpers
pub use pipeline::{generate_draft, Engine};

// Re-export text utilities
pub use text::{extract_topics, strip_markup, word_count};

// Re-export pacing
pub use pacing::{IntervalPacer, NoopPacer, Pacer};

// Re-export implementations
pub use providers::HttpProvider;
pub use stores::MemoryStore;

// Re-export testing utilities
pub use testing::MockProvider;

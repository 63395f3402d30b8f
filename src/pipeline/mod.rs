//! Analysis and authoring pipeline.
//!
//! - [`factors`] - the five factor scorers
//! - [`engine`] - the [`Engine`] combining scorers, suggestions, and
//!   authoring
//! - [`suggest`] - related-topic parsing and the template fallback
//! - [`generate`] - the staged authoring pipeline
//! - [`prompts`] - prompt templates for the generation backend

pub mod engine;
pub mod factors;
pub mod generate;
pub mod prompts;
pub mod suggest;

pub use engine::Engine;
pub use generate::generate_draft;

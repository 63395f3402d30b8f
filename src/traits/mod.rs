//! Core trait abstractions (GenerationProvider, PostStore).

pub mod provider;
pub mod store;

//! Data types for articles, analyses, suggestions, and configuration.

pub mod analysis;
pub mod article;
pub mod config;
pub mod suggestion;

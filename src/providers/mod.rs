//! Concrete [`GenerationProvider`](crate::traits::provider::GenerationProvider)
//! implementations.

pub mod http;

pub use http::HttpProvider;

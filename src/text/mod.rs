//! Text utilities: markup stripping, word counting, generated-text
//! formatting, and topic term extraction.

pub mod markup;
pub mod terms;

pub use markup::{format_generated, strip_markup, truncate_chars, word_count};
pub use terms::{extract_topics, is_stopword};

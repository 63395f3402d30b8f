//! Property tests for the text utilities.

use pillar_engine::text::{extract_topics, is_stopword, strip_markup, truncate_chars, word_count};
use proptest::prelude::*;

proptest! {
    #[test]
    fn extraction_is_deterministic(text in "[a-zA-Z '\\-]{0,400}") {
        prop_assert_eq!(extract_topics(&text, 3, 4), extract_topics(&text, 3, 4));
    }

    #[test]
    fn extracted_terms_respect_the_filters(text in "[a-zA-Z <>/&;]{0,400}") {
        for (term, count) in extract_topics(&text, 3, 4) {
            prop_assert!(count >= 3, "term '{}' counted {} times", term, count);
            prop_assert!(term.chars().count() >= 4, "term '{}' too short", term);
            prop_assert!(!is_stopword(&term), "stopword '{}' leaked", term);
            prop_assert_eq!(&term.to_lowercase(), &term);
        }
    }

    #[test]
    fn extracted_counts_never_increase(text in "[a-z ]{0,400}") {
        let terms = extract_topics(&text, 2, 4);
        for pair in terms.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn stripping_plain_text_changes_nothing_but_whitespace(text in "[a-zA-Z ]{0,200}") {
        let stripped = strip_markup(&text);
        prop_assert_eq!(
            stripped.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn wrapping_tags_never_reach_the_output(text in "[a-zA-Z ]{0,200}") {
        let html = format!("<div class=\"x\"><p>{text}</p></div>");
        let stripped = strip_markup(&html);
        prop_assert!(!stripped.contains('<'));
        prop_assert_eq!(
            stripped.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn truncation_respects_the_char_budget(text in ".{0,300}", max in 0usize..200) {
        let truncated = truncate_chars(&text, max);
        prop_assert!(truncated.chars().count() <= max);
        prop_assert!(text.starts_with(&truncated));
    }

    #[test]
    fn word_count_matches_whitespace_splits(text in "[a-zA-Z \\t\\n]{0,300}") {
        prop_assert_eq!(word_count(&text), text.split_whitespace().count());
    }
}

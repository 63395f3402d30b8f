//! The five factor scorers.
//!
//! Each scorer maps raw measurements to a normalized [0, 1] score plus
//! a recommendation. All are pure except comprehensiveness, which calls
//! the generation provider and degrades to a fixed fallback score when
//! the call fails.

use regex::Regex;
use tracing::warn;
use url::Url;

use crate::pipeline::prompts::{format_comprehensiveness_prompt, WRITER_SYSTEM_PROMPT};
use crate::text::{extract_topics, truncate_chars, word_count};
use crate::traits::provider::GenerationProvider;
use crate::types::analysis::{FactorDetail, FactorScore};
use crate::types::config::EngineConfig;

/// Score word count of the stripped body.
///
/// Piecewise with inclusive lower bounds: 2000+ words is full marks.
pub fn score_word_count(plain_body: &str) -> FactorScore {
    let words = word_count(plain_body);
    let score = match words {
        w if w >= 2000 => 1.00,
        w if w >= 1500 => 0.85,
        w if w >= 1000 => 0.70,
        w if w >= 500 => 0.50,
        _ => 0.20,
    };

    let recommendation = if words < 1500 {
        "Expand content to 1500+ words for better authority"
    } else {
        "Good word count"
    };

    FactorScore {
        score,
        detail: FactorDetail::WordCount { words },
        recommendation: recommendation.to_string(),
    }
}

/// Score document structure from heading, paragraph, and list markers.
pub fn score_structure(body: &str) -> FactorScore {
    let h2_count = Regex::new(r"(?i)<h2[\s>]").unwrap().find_iter(body).count();
    let h3_count = Regex::new(r"(?i)<h3[\s>]").unwrap().find_iter(body).count();
    let paragraph_count = Regex::new(r"(?i)<p[\s>]").unwrap().find_iter(body).count();
    let has_lists = Regex::new(r"(?i)<[uo]l[\s>]").unwrap().is_match(body);

    let rich_headings = h2_count >= 3 && h3_count >= 5;
    let has_h2 = h2_count >= 3;
    let has_paragraphs = paragraph_count >= 5;

    let score = if rich_headings && has_paragraphs {
        1.00
    } else if has_h2 && has_paragraphs {
        0.80
    } else if has_h2 || has_paragraphs {
        0.60
    } else {
        0.30
    };

    let recommendation = if rich_headings {
        "Good structure"
    } else {
        "Add more subheadings (H2, H3) for better organization"
    };

    FactorScore {
        score,
        detail: FactorDetail::Structure {
            h2_count,
            h3_count,
            paragraph_count,
            has_lists,
        },
        recommendation: recommendation.to_string(),
    }
}

/// Score internal/external linking against a configured base URL.
///
/// Internal means same origin as `base_url`; any other absolute
/// http(s) href is external. Relative hrefs count as neither.
pub fn score_links(body: &str, base_url: &Url) -> FactorScore {
    let href_pattern = Regex::new(r#"(?i)<a\s[^>]*href="([^"]*)""#).unwrap();

    let mut internal = 0usize;
    let mut external = 0usize;
    for caps in href_pattern.captures_iter(body) {
        match Url::parse(&caps[1]) {
            Ok(href) if href.scheme() == "http" || href.scheme() == "https" => {
                if href.origin() == base_url.origin() {
                    internal += 1;
                } else {
                    external += 1;
                }
            }
            _ => {}
        }
    }

    let total = internal + external;
    let score = if total >= 10 && internal >= 3 {
        1.00
    } else if total >= 5 && internal >= 2 {
        0.80
    } else if total >= 3 {
        0.60
    } else {
        0.30
    };

    let recommendation = if internal < 3 {
        "Add more internal links to connect related content"
    } else {
        "Good linking strategy"
    };

    FactorScore {
        score,
        detail: FactorDetail::Links {
            internal,
            external,
            total,
        },
        recommendation: recommendation.to_string(),
    }
}

/// Score topic diversity from extracted terms.
pub fn score_topics(body: &str, config: &EngineConfig) -> FactorScore {
    let topics = extract_topics(body, config.topic_min_occurrences, config.topic_min_length);
    let topic_count = topics.len();

    let score = match topic_count {
        c if c >= 10 => 1.00,
        c if c >= 7 => 0.80,
        c if c >= 5 => 0.60,
        _ => 0.40,
    };

    let recommendation = if topic_count < 7 {
        "Expand topic coverage with more related concepts"
    } else {
        "Good topic diversity"
    };

    FactorScore {
        score,
        detail: FactorDetail::Topics {
            topic_count,
            main_topics: topics.into_iter().take(5).map(|(term, _)| term).collect(),
        },
        recommendation: recommendation.to_string(),
    }
}

/// Score comprehensiveness by asking the provider to rate a bounded
/// prefix of the stripped body.
///
/// On provider failure this returns 0.50 with a fixed explanation - a
/// fallback, not a propagated error, so the overall analysis degrades
/// instead of failing.
pub async fn score_comprehensiveness<P: GenerationProvider>(
    provider: &P,
    plain_body: &str,
    config: &EngineConfig,
) -> FactorScore {
    let prefix = truncate_chars(plain_body, config.comprehensiveness_prefix_chars);
    let prompt = format_comprehensiveness_prompt(&prefix);

    match provider
        .complete(&prompt, WRITER_SYSTEM_PROMPT, 0.7, 500)
        .await
    {
        Ok(response) => {
            let raw = parse_rating(&response);
            let score = raw as f64 / 100.0;
            let recommendation = if raw >= 80 {
                "Excellent comprehensiveness"
            } else {
                "Add more examples, data, and detailed explanations"
            };
            FactorScore {
                score,
                detail: FactorDetail::Comprehensiveness {
                    explanation: response,
                    fallback: false,
                },
                recommendation: recommendation.to_string(),
            }
        }
        Err(err) => {
            warn!("comprehensiveness rating unavailable: {err}");
            FactorScore {
                score: 0.50,
                detail: FactorDetail::Comprehensiveness {
                    explanation: "AI analysis unavailable".to_string(),
                    fallback: true,
                },
                recommendation: "Consider adding more depth and examples".to_string(),
            }
        }
    }
}

/// First-integer-found rating heuristic, clamped to [0, 100].
///
/// Known fragility: any leading number in the response is taken as the
/// rating ("Top 10 list" parses as 10), which is why the prompt asks
/// for the rating up front. No integer at all reads as 50.
fn parse_rating(response: &str) -> u32 {
    let first_int = Regex::new(r"\d+").unwrap();
    match first_int.find(response) {
        Some(m) => m.as_str().parse::<u64>().map(|v| v.min(100)).unwrap_or(100) as u32,
        None => 50,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://blog.example.com").unwrap()
    }

    #[test]
    fn word_count_piecewise_boundaries() {
        for (words, expected) in [(2000, 1.00), (1500, 0.85), (1000, 0.70), (500, 0.50), (499, 0.20), (0, 0.20)] {
            let body = "word ".repeat(words);
            assert_eq!(score_word_count(body.trim()).score, expected, "{words} words");
        }
    }

    #[test]
    fn structure_rich_headings_and_paragraphs() {
        let body = format!(
            "{}{}{}",
            "<h2>a</h2>".repeat(3),
            "<h3>b</h3>".repeat(5),
            "<p>c</p>".repeat(5)
        );
        let factor = score_structure(&body);
        assert_eq!(factor.score, 1.00);
        assert_eq!(factor.recommendation, "Good structure");
    }

    #[test]
    fn structure_h2_and_paragraphs_only() {
        let body = format!("{}{}", "<h2>a</h2>".repeat(3), "<p>c</p>".repeat(5));
        assert_eq!(score_structure(&body).score, 0.80);
    }

    #[test]
    fn structure_either_alone_then_neither() {
        assert_eq!(score_structure(&"<p>c</p>".repeat(5)).score, 0.60);
        assert_eq!(score_structure(&"<h2>a</h2>".repeat(3)).score, 0.60);
        assert_eq!(score_structure("plain text").score, 0.30);
    }

    #[test]
    fn links_classification_and_tiers() {
        let internal = r#"<a href="https://blog.example.com/one">x</a>"#.repeat(3);
        let external = r#"<a href="https://other.org/page">y</a>"#.repeat(7);
        let factor = score_links(&format!("{internal}{external}"), &base());
        assert_eq!(factor.score, 1.00);
        assert_eq!(
            factor.detail,
            FactorDetail::Links {
                internal: 3,
                external: 7,
                total: 10
            }
        );
    }

    #[test]
    fn relative_links_count_as_neither() {
        let body = r#"<a href="/local">x</a><a href="mailto:a@b.c">y</a>"#;
        let factor = score_links(body, &base());
        assert_eq!(
            factor.detail,
            FactorDetail::Links {
                internal: 0,
                external: 0,
                total: 0
            }
        );
        assert_eq!(factor.score, 0.30);
    }

    #[test]
    fn topics_tiers() {
        // Ten distinct qualifying terms, three occurrences each
        let mut body = String::new();
        for c in 'a'..='j' {
            body.push_str(&format!("topicword{c} ").repeat(3));
        }
        let factor = score_topics(&body, &EngineConfig::default());
        assert_eq!(factor.score, 1.00);
        match factor.detail {
            FactorDetail::Topics { topic_count, ref main_topics } => {
                assert_eq!(topic_count, 10);
                assert_eq!(main_topics.len(), 5);
            }
            _ => panic!("wrong detail variant"),
        }

        assert_eq!(score_topics("", &EngineConfig::default()).score, 0.40);
    }

    #[test]
    fn rating_parse_first_integer() {
        assert_eq!(parse_rating("Score: 85 out of 100"), 85);
        assert_eq!(parse_rating("I'd rate this 7/10... wait, 70."), 7);
        assert_eq!(parse_rating("no digits here"), 50);
        assert_eq!(parse_rating("999"), 100);
        assert_eq!(parse_rating("99999999999999999999999"), 100);
    }
}

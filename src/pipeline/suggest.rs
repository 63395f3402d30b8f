//! Related-topic suggestion helpers.
//!
//! The engine asks the generation backend for related titles; when that
//! fails (or yields nothing) a deterministic template generator takes
//! over so suggestion requests never surface a provider error.

use regex::Regex;

/// Parse candidate titles out of a free-text provider response.
///
/// One title per line; leading numbering is stripped, very short lines
/// are discarded, and at most eight candidates are kept.
pub fn parse_related_topics(response: &str) -> Vec<String> {
    let numbering = Regex::new(r"^\d+[.)]\s*").unwrap();
    let mut topics = Vec::new();

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() || line.chars().count() <= 5 {
            continue;
        }
        topics.push(numbering.replace(line, "").to_string());
        if topics.len() == 8 {
            break;
        }
    }
    topics
}

/// Deterministic fallback suggestions.
///
/// Four fixed phrasings per topic, interleaved round-robin across
/// topics so the truncated head still covers every topic.
pub fn template_suggestions(topics: &[String], limit: usize) -> Vec<String> {
    let phrasings: [fn(&str) -> String; 4] = [
        |t| format!("Advanced techniques for {t}"),
        |t| format!("{t} best practices"),
        |t| format!("Common mistakes in {t}"),
        |t| format!("{t} case studies"),
    ];

    let mut suggestions = Vec::new();
    'outer: for phrase in &phrasings {
        for topic in topics {
            suggestions.push(phrase(topic));
            if suggestions.len() == limit {
                break 'outer;
            }
        }
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbered_lines() {
        let response = "1. Rust memory safety\n2) Async pitfalls\n\nok\nBorrow checker deep dive";
        let topics = parse_related_topics(response);
        assert_eq!(
            topics,
            vec![
                "Rust memory safety".to_string(),
                "Async pitfalls".to_string(),
                "Borrow checker deep dive".to_string(),
            ]
        );
    }

    #[test]
    fn caps_at_eight_candidates() {
        let response = (1..=12)
            .map(|i| format!("Suggestion number {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse_related_topics(&response).len(), 8);
    }

    #[test]
    fn templates_interleave_round_robin() {
        let topics = vec!["caching".to_string(), "sharding".to_string()];
        let suggestions = template_suggestions(&topics, 5);
        assert_eq!(
            suggestions,
            vec![
                "Advanced techniques for caching".to_string(),
                "Advanced techniques for sharding".to_string(),
                "caching best practices".to_string(),
                "sharding best practices".to_string(),
                "Common mistakes in caching".to_string(),
            ]
        );
    }

    #[test]
    fn templates_never_duplicate() {
        let topics = vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()];
        let suggestions = template_suggestions(&topics, 12);
        let unique: std::collections::HashSet<_> = suggestions.iter().collect();
        assert_eq!(unique.len(), suggestions.len());
        assert_eq!(suggestions.len(), 12);
    }

    #[test]
    fn templates_empty_topics_yield_empty() {
        assert!(template_suggestions(&[], 5).is_empty());
    }
}

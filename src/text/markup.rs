//! Markup stripping and generated-text formatting.

use regex::Regex;

/// Strip HTML-ish markup down to plain text.
///
/// Tags are removed, a handful of common entities are decoded, and
/// whitespace is collapsed. Good enough for word counting and term
/// extraction; not a general HTML parser.
pub fn strip_markup(html: &str) -> String {
    let mut text = html.to_string();

    // Remove scripts and styles wholesale
    let script_pattern = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    text = script_pattern.replace_all(&text, " ").to_string();
    text = style_pattern.replace_all(&text, " ").to_string();

    // Remaining tags become word separators
    let tag_pattern = Regex::new(r"<[^>]+>").unwrap();
    text = tag_pattern.replace_all(&text, " ").to_string();

    // Decode HTML entities
    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    // Collapse whitespace
    let ws_pattern = Regex::new(r"\s+").unwrap();
    ws_pattern.replace_all(&text, " ").trim().to_string()
}

/// Count words in plain text.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Truncate to at most `max_chars` characters, respecting char
/// boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Transform generated plain/markdown-like text into structured markup.
///
/// Blocks are separated by blank lines. `#`/`##` prefixes and short
/// numbered lines ("1. Heading") are promoted to headings; everything
/// else becomes a paragraph.
pub fn format_generated(text: &str) -> String {
    let numbered_heading = Regex::new(r"^\d+[.)]\s+(.+)$").unwrap();
    let mut out = String::new();

    for block in text.split("\n\n") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        for line_group in split_heading_lines(block) {
            let line = line_group.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix("## ") {
                out.push_str(&format!("<h3>{}</h3>\n", rest.trim()));
            } else if let Some(rest) = line.strip_prefix("# ") {
                out.push_str(&format!("<h2>{}</h2>\n", rest.trim()));
            } else if is_single_line(line) && line.split_whitespace().count() <= 12 {
                if let Some(caps) = numbered_heading.captures(line) {
                    out.push_str(&format!("<h2>{}</h2>\n", caps[1].trim()));
                } else {
                    out.push_str(&format!("<p>{}</p>\n", line));
                }
            } else {
                out.push_str(&format!("<p>{}</p>\n", line.replace('\n', " ")));
            }
        }
    }

    out.trim_end().to_string()
}

/// Split a block so that heading-prefixed lines inside it are handled
/// individually, while plain multi-line runs stay one paragraph.
fn split_heading_lines(block: &str) -> Vec<String> {
    let numbered = Regex::new(r"^\d+[.)]\s+\S").unwrap();
    let mut groups: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in block.lines() {
        let trimmed = line.trim_start();
        let is_heading = trimmed.starts_with("# ")
            || trimmed.starts_with("## ")
            || numbered.is_match(trimmed);
        if is_heading {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            groups.push(trimmed.to_string());
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

fn is_single_line(text: &str) -> bool {
    !text.contains('\n')
}

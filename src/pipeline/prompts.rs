//! Prompts for the generation backend.
//!
//! Kept as constants plus `format_*` helpers so tests can assert prompt
//! construction without touching a provider.

/// System prompt for general article work.
pub const WRITER_SYSTEM_PROMPT: &str =
    "You are an experienced blog author. Write clear, well-organized, factually careful prose.";

/// System prompt for SEO titles.
pub const TITLE_SYSTEM_PROMPT: &str = "Generate a compelling, SEO-friendly title for a blog post. \
Keep it under 60 characters. Make it catchy and include keywords.";

/// System prompt for excerpts.
pub const EXCERPT_SYSTEM_PROMPT: &str = "Create a compelling 150-160 character excerpt that \
summarizes the main points and entices readers to click.";

/// Rating prompt for the comprehensiveness factor.
///
/// The numeric score is recovered from the free-text response with a
/// first-integer heuristic, so the prompt asks for the rating up front.
pub fn format_comprehensiveness_prompt(content_prefix: &str) -> String {
    format!(
        "Analyze the following content for comprehensiveness. Rate it on a scale of 0-100 \
based on depth, coverage, and detail. Provide a brief explanation.\n\nContent: {content_prefix}"
    )
}

/// Prompt for related-topic suggestions.
///
/// `existing_titles` is a negative constraint: topics already covered
/// on the site that the backend should avoid duplicating.
pub fn format_related_topics_prompt(subject: &str, existing_titles: &[String]) -> String {
    let mut prompt = format!(
        "Generate 5-8 related blog post topics that would complement the main topic: '{subject}'.\n"
    );
    if !existing_titles.is_empty() {
        prompt.push_str(&format!(
            "Avoid these existing topics: {}\n",
            existing_titles.join(", ")
        ));
    }
    prompt.push_str(
        "Format each topic as a single line. Focus on subtopics, related concepts, and \
complementary angles.",
    );
    prompt
}

/// Prompt for the outline stage.
pub fn format_outline_prompt(topic: &str, keywords: &[String], research: &str) -> String {
    let mut prompt = format!(
        "Create a structured outline for a blog post about: {topic}\n\
Use '#' for the main sections and '##' for subsections."
    );
    if !keywords.is_empty() {
        prompt.push_str(&format!(
            "\nWork these keywords into the outline: {}",
            keywords.join(", ")
        ));
    }
    if !research.is_empty() {
        prompt.push_str(&format!("\n\nResearch context:\n{research}"));
    }
    prompt
}

/// Prompt for the content stage.
pub fn format_content_prompt(topic: &str, outline: &str, research: &str, tone: &str) -> String {
    let mut prompt = format!(
        "Write a complete blog post about: {topic}\n\
Tone: {tone}\n\nFollow this outline:\n{outline}"
    );
    if !research.is_empty() {
        prompt.push_str(&format!("\n\nGround the post in this research:\n{research}"));
    }
    prompt.push_str(
        "\n\nSeparate paragraphs with blank lines and keep the outline's '#'/'##' headings.",
    );
    prompt
}

/// Prompt for the title stage.
pub fn format_title_prompt(topic: &str) -> String {
    format!("Create a title for a blog post about: {topic}")
}

/// Prompt for the excerpt stage. `content_prefix` should be a bounded
/// prefix of the generated content.
pub fn format_excerpt_prompt(content_prefix: &str) -> String {
    format!("Summarize this content into a short excerpt:\n\n{content_prefix}")
}

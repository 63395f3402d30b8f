//! The authoring pipeline: research -> outline -> content -> title ->
//! excerpt -> format.
//!
//! Required stages (outline, content) propagate provider errors;
//! optional stages degrade to documented fallbacks. The pipeline never
//! writes storage - it returns a [`DraftRecord`] for the caller to
//! persist.

use chrono::Utc;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::pipeline::prompts::{
    format_content_prompt, format_excerpt_prompt, format_outline_prompt, format_title_prompt,
    EXCERPT_SYSTEM_PROMPT, TITLE_SYSTEM_PROMPT, WRITER_SYSTEM_PROMPT,
};
use crate::text::{format_generated, strip_markup, truncate_chars};
use crate::traits::provider::GenerationProvider;
use crate::types::article::DraftRecord;
use crate::types::config::GenerationOptions;

/// Maximum characters for the SEO title (and its fallback).
const TITLE_MAX_CHARS: usize = 60;

/// Maximum characters for a generated excerpt.
const EXCERPT_MAX_CHARS: usize = 160;

/// Characters of stripped content kept by the fallback excerpt.
const EXCERPT_FALLBACK_CHARS: usize = 155;

/// Characters of content handed to the excerpt prompt.
const EXCERPT_PROMPT_CHARS: usize = 1000;

/// Run the full authoring pipeline for a topic.
pub async fn generate_draft<P: GenerationProvider>(
    provider: &P,
    topic: &str,
    options: &GenerationOptions,
) -> Result<DraftRecord> {
    info!("generation pipeline started for topic: {topic}");

    // Stage 1: research (optional). Failure logs and proceeds with an
    // empty research context.
    let research = if options.use_research {
        match provider.research(topic).await {
            Ok(text) => {
                debug!("research stage produced {} chars", text.len());
                text
            }
            Err(err) => {
                warn!("research failed, continuing without it: {err}");
                String::new()
            }
        }
    } else {
        String::new()
    };
    let used_research = !research.is_empty();

    // Stage 2: outline (required).
    let outline = provider
        .complete(
            &format_outline_prompt(topic, &options.keywords, &research),
            WRITER_SYSTEM_PROMPT,
            options.temperature,
            options.max_tokens,
        )
        .await?;
    debug!("outline stage complete");

    // Stage 3: content (required).
    let raw_content = provider
        .complete(
            &format_content_prompt(topic, &outline, &research, &options.tone),
            WRITER_SYSTEM_PROMPT,
            options.temperature,
            options.max_tokens,
        )
        .await?;
    debug!("content stage complete ({} chars)", raw_content.len());

    // Stage 4: title (optional; falls back to the truncated topic).
    let title = match provider
        .complete(
            &format_title_prompt(topic),
            TITLE_SYSTEM_PROMPT,
            options.temperature,
            options.max_tokens,
        )
        .await
    {
        Ok(raw) => truncate_chars(&strip_wrapping_quotes(raw.trim()), TITLE_MAX_CHARS),
        Err(err) => {
            warn!("title generation failed, using topic fallback: {err}");
            truncate_chars(topic, TITLE_MAX_CHARS)
        }
    };

    // Stage 5: excerpt (optional; falls back to truncated content).
    let excerpt = match provider
        .complete(
            &format_excerpt_prompt(&truncate_chars(&raw_content, EXCERPT_PROMPT_CHARS)),
            EXCERPT_SYSTEM_PROMPT,
            options.temperature,
            options.max_tokens,
        )
        .await
    {
        Ok(raw) => truncate_chars(&strip_wrapping_quotes(raw.trim()), EXCERPT_MAX_CHARS),
        Err(err) => {
            warn!("excerpt generation failed, using content fallback: {err}");
            format!(
                "{}...",
                truncate_chars(&strip_markup(&raw_content), EXCERPT_FALLBACK_CHARS)
            )
        }
    };

    // Stage 6: format generated text into structured markup.
    let content = format_generated(&raw_content);

    info!("generation pipeline finished for topic: {topic}");
    Ok(DraftRecord {
        topic: topic.to_string(),
        title,
        content,
        excerpt,
        research,
        outline,
        used_research,
        created_at: Utc::now(),
    })
}

/// Remove one layer of wrapping double quotes, if present.
fn strip_wrapping_quotes(text: &str) -> String {
    let pattern = Regex::new(r#"(?s)^"(.*)"$"#).unwrap();
    match pattern.captures(text) {
        Some(caps) => caps[1].to_string(),
        None => text.to_string(),
    }
}

//! Turning free-form model output into a short list of insights.

use tracing::debug;

use crate::clients::traits::ContentGenerator;
use crate::error::Result;
use crate::options::Language;
use crate::prompts::build_insight_prompt;

pub const MAX_INSIGHTS: usize = 5;

fn is_marker(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | ')' | '-' | '•' | ' ')
}

/// Split into lines, drop blanks and leading list markers, keep the first five.
pub fn parse_insights(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.trim_start_matches(is_marker).to_string())
        .take(MAX_INSIGHTS)
        .collect()
}

/// Second pass: ask the model to distill `summary_text` into five points.
pub async fn extract_insights(
    generator: &dyn ContentGenerator,
    model: &str,
    summary_text: &str,
    language: Language,
) -> Result<Vec<String>> {
    let prompt = build_insight_prompt(summary_text, language);
    let raw = generator.generate(model, &prompt, None).await?;
    let insights = parse_insights(&raw);
    debug!("Extracted {} insights from {} chars", insights.len(), raw.len());
    Ok(insights)
}

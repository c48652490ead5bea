//! Prompt construction for the two generation passes.
//!
//! The summary prompt is always written in Japanese and names the language the
//! model should answer in. The insight prompt is written in the target
//! language directly.

use crate::options::{DetailLevel, Language};

const SUMMARY_PROMPT_TEMPLATE: &str = "
このグラフについて{language}で説明してください。

{detail_instructions}

グラフから読み取れる情報:
- 全体的なトレンド
- 最大値と最小値
- 特徴的なパターンや異常値
- データが示唆する洞察

追加情報: {additional_context}
";

const INSIGHT_PROMPT_JA: &str = "
以下のグラフ要約から主要な洞察やポイントを5つ抽出してください。
各洞察は簡潔で、データに基づいた事実を述べるものにしてください。

グラフ要約:
{summary}
";

const INSIGHT_PROMPT_EN: &str = "
Extract 5 key insights or points from the following graph summary.
Each insight should be concise and state facts based on the data.

Graph summary:
{summary}
";

/// Build the instruction sent alongside the chart image.
///
/// `additional_context` is inserted verbatim.
pub fn build_summary_prompt(
    additional_context: &str,
    detail_level: DetailLevel,
    language: Language,
) -> String {
    // context goes last so braces inside it are never re-expanded
    SUMMARY_PROMPT_TEMPLATE
        .replace("{language}", language.name())
        .replace("{detail_instructions}", detail_level.instruction())
        .replace("{additional_context}", additional_context)
}

/// Same as [`build_summary_prompt`] but from raw UI labels.
pub fn build_summary_prompt_from_labels(
    additional_context: &str,
    detail_label: &str,
    language_label: &str,
) -> String {
    build_summary_prompt(
        additional_context,
        DetailLevel::from_label(detail_label),
        Language::from_label(language_label),
    )
}

pub fn build_insight_prompt(summary: &str, language: Language) -> String {
    let template = match language {
        Language::Japanese => INSIGHT_PROMPT_JA,
        Language::English => INSIGHT_PROMPT_EN,
    };
    template.replace("{summary}", summary)
}

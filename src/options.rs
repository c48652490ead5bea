//! Summary options: detail level, output language and client kind.
//!
//! Detail and language labels are parsed leniently. Anything unrecognised
//! resolves to the default instead of failing, so a stale UI value or a typo
//! in the config file still yields a usable prompt.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum DetailLevel {
    Concise,
    #[default]
    Standard,
    Detailed,
}

impl DetailLevel {
    pub const ALL: [DetailLevel; 3] = [
        DetailLevel::Concise,
        DetailLevel::Standard,
        DetailLevel::Detailed,
    ];

    /// Accepts the Japanese UI labels as well as English names.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "簡潔" | "concise" | "brief" => DetailLevel::Concise,
            "標準" | "standard" | "normal" => DetailLevel::Standard,
            "詳細" | "detailed" | "detail" => DetailLevel::Detailed,
            _ => DetailLevel::default(),
        }
    }

    /// Instruction line interpolated into the summary prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            DetailLevel::Concise => "要点のみを箇条書きで簡潔に説明してください。",
            DetailLevel::Standard => "主要なトレンドと注目すべきポイントを含めて要約してください。",
            DetailLevel::Detailed => {
                "詳細な分析を提供し、考えられる要因や背景情報も含めて説明してください。"
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DetailLevel::Concise => "簡潔",
            DetailLevel::Standard => "標準",
            DetailLevel::Detailed => "詳細",
        }
    }
}

impl From<String> for DetailLevel {
    fn from(label: String) -> Self {
        DetailLevel::from_label(&label)
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Language {
    #[default]
    Japanese,
    English,
}

impl Language {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "english" | "en" | "英語" => Language::English,
            _ => Language::Japanese,
        }
    }

    /// Language name as written into the prompt.
    pub fn name(self) -> &'static str {
        match self {
            Language::Japanese => "日本語",
            Language::English => "English",
        }
    }
}

impl From<String> for Language {
    fn from(label: String) -> Self {
        Language::from_label(&label)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which summarization backend the factory builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    Remote,
    Mock,
}

impl ClientKind {
    /// Strict parse: unknown api types are rejected by the factory, not defaulted.
    pub fn parse(api_type: &str) -> Option<Self> {
        match api_type.trim() {
            "remote" | "gemini" => Some(ClientKind::Remote),
            "mock" | "mock (APIなし)" => Some(ClientKind::Mock),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_labels_resolve_in_both_languages() {
        assert_eq!(DetailLevel::from_label("簡潔"), DetailLevel::Concise);
        assert_eq!(DetailLevel::from_label("Detailed"), DetailLevel::Detailed);
        assert_eq!(DetailLevel::from_label(" standard "), DetailLevel::Standard);
    }

    #[test]
    fn unknown_labels_fall_back_to_defaults() {
        assert_eq!(DetailLevel::from_label("verbose-ish"), DetailLevel::Standard);
        assert_eq!(DetailLevel::from_label(""), DetailLevel::Standard);
        assert_eq!(Language::from_label("Klingon"), Language::Japanese);
        assert_eq!(Language::from_label("English"), Language::English);
    }

    #[test]
    fn client_kind_accepts_legacy_aliases() {
        assert_eq!(ClientKind::parse("gemini"), Some(ClientKind::Remote));
        assert_eq!(ClientKind::parse("mock (APIなし)"), Some(ClientKind::Mock));
        assert_eq!(ClientKind::parse("bogus"), None);
    }
}

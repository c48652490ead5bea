use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GraphNarratorError, Result};
use crate::options::{DetailLevel, Language};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Main configuration structure loaded from graph_narrator.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub system: SystemConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub font: FontConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Backend selection and generation endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SystemConfig {
    pub api_type: String,
    /// Multimodal model used for the chart narrative
    pub model: String,
    /// Text model used for the insight extraction pass
    pub insight_model: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            api_type: "remote".to_string(),
            model: DEFAULT_MODEL.to_string(),
            insight_model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 60_000,
        }
    }
}

/// Defaults applied when the caller does not pick a detail level or language
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SummaryConfig {
    pub detail_level: DetailLevel,
    pub language: Language,
}

/// Render size in pixels (10x6 inch figure at 100 dpi)
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

/// Chart text font; unset uses a detected CJK font or the bundled DejaVu Sans
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FontConfig {
    pub path: Option<PathBuf>,
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub gemini_api_key: Option<String>,
    pub log_level: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            log_level: "graph_narrator=info".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "graph_narrator=info".to_string()),
        }
    }
}

/// Load the dotenv file named by GRAPH_NARRATOR_ENV_FILE, or `.env`.
/// Variables already set in the environment are left alone.
pub fn load_env_file() {
    if let Ok(env_path) = std::env::var("GRAPH_NARRATOR_ENV_FILE") {
        let _ = dotenvy::from_path(env_path);
    } else {
        let _ = dotenvy::from_path(".env");
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses GRAPH_NARRATOR_CONFIG environment variable or defaults to "graph_narrator.toml"
    pub fn load() -> Result<Self> {
        load_env_file();

        let config_path = std::env::var("GRAPH_NARRATOR_CONFIG")
            .unwrap_or_else(|_| "graph_narrator.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(api_type) = std::env::var("GRAPH_NARRATOR_API_TYPE") {
            self.system.api_type = api_type;
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            self.system.model = model;
        }
        if let Ok(model) = std::env::var("GEMINI_INSIGHT_MODEL") {
            self.system.insight_model = model;
        }
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            self.system.base_url = base_url;
        }
        if let Some(timeout) = std::env::var("GEMINI_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            self.system.timeout_ms = timeout;
        }
        if let Ok(font) = std::env::var("GRAPH_NARRATOR_FONT") {
            self.font.path = Some(PathBuf::from(font));
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(GraphNarratorError::Configuration {
                message: format!(
                    "chart size must be non-zero, got {}x{}",
                    self.chart.width, self.chart.height
                ),
            });
        }
        if !self.system.base_url.starts_with("http://")
            && !self.system.base_url.starts_with("https://")
        {
            tracing::warn!(
                "Base URL '{}' doesn't start with http:// or https://",
                self.system.base_url
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [system]
            api_type = "mock"

            [chart]
            width = 640
            "#,
        )
        .unwrap();
        assert_eq!(config.system.api_type, "mock");
        assert_eq!(config.system.model, DEFAULT_MODEL);
        assert_eq!(config.chart.width, 640);
        assert_eq!(config.chart.height, 600);
        assert_eq!(config.summary.detail_level, DetailLevel::Standard);
    }

    #[test]
    fn test_summary_section_parses_enums() {
        let config = Config::from_toml_str(
            r#"
            [summary]
            detail_level = "detailed"
            language = "english"
            "#,
        )
        .unwrap();
        assert_eq!(config.summary.detail_level, DetailLevel::Detailed);
        assert_eq!(config.summary.language, Language::English);
    }

    #[test]
    fn test_summary_labels_fall_back_instead_of_failing() {
        let config = Config::from_toml_str(
            r#"
            [summary]
            detail_level = "簡潔"
            language = "英語"
            "#,
        )
        .unwrap();
        assert_eq!(config.summary.detail_level, DetailLevel::Concise);
        assert_eq!(config.summary.language, Language::English);

        let config = Config::from_toml_str(
            r#"
            [summary]
            detail_level = "verbose"
            language = "Klingon"
            "#,
        )
        .unwrap();
        assert_eq!(config.summary.detail_level, DetailLevel::Standard);
        assert_eq!(config.summary.language, Language::Japanese);
    }

    #[test]
    fn test_summary_section_round_trips_through_toml() {
        let mut config = Config::default();
        config.summary.detail_level = DetailLevel::Detailed;
        config.summary.language = Language::English;
        let text = toml::to_string(&config).unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed.summary.detail_level, DetailLevel::Detailed);
        assert_eq!(parsed.summary.language, Language::English);
    }

    #[test]
    fn test_font_path_from_toml() {
        let config = Config::from_toml_str(
            r#"
            [font]
            path = "/usr/share/fonts/ipaexg.ttf"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.font.path,
            Some(PathBuf::from("/usr/share/fonts/ipaexg.ttf"))
        );
        assert!(Config::default().font.path.is_none());
    }

    #[test]
    fn test_zero_chart_size_rejected() {
        let mut config = Config::default();
        config.chart.height = 0;
        assert!(matches!(
            config.validate(),
            Err(GraphNarratorError::Configuration { .. })
        ));
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let err = Config::from_toml_str("[system\napi_type=").unwrap_err();
        assert!(matches!(err, GraphNarratorError::Configuration { .. }));
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chart::Chart;
use crate::error::Result;
use crate::image_codec::ImagePayload;
use crate::options::{DetailLevel, Language};

/// Everything a client needs to summarize one chart.
#[derive(Debug, Clone)]
pub struct SummaryRequest<'a> {
    pub chart: &'a Chart,
    pub additional_context: String,
    pub detail_level: DetailLevel,
    pub language: Language,
}

impl<'a> SummaryRequest<'a> {
    pub fn new(chart: &'a Chart) -> Self {
        Self {
            chart,
            additional_context: String::new(),
            detail_level: DetailLevel::default(),
            language: Language::default(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.additional_context = context.into();
        self
    }

    pub fn with_detail_level(mut self, detail_level: DetailLevel) -> Self {
        self.detail_level = detail_level;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary_text: String,
    /// At most five entries, possibly empty.
    pub insights: Vec<String>,
}

/// A chart summarization backend.
#[async_trait]
pub trait SummaryClient: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest<'_>) -> Result<SummaryResult>;
}

/// Text generation with an optional inline image.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<String>;
}

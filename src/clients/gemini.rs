use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clients::traits::{ContentGenerator, SummaryClient, SummaryRequest, SummaryResult};
use crate::config::Config;
use crate::error::{GraphNarratorError, Result};
use crate::image_codec::{ImagePayload, encode_chart};
use crate::insights::extract_insights;
use crate::prompts::build_summary_prompt;

#[derive(Debug, Serialize)]
struct ReqPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct ReqContent {
    parts: Vec<ReqPart>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<ReqContent>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<RespContent>,
}

#[derive(Debug, Deserialize)]
struct RespContent {
    #[serde(default)]
    parts: Vec<RespPart>,
}

#[derive(Debug, Deserialize)]
struct RespPart {
    text: Option<String>,
}

impl GenerateRequest {
    fn new(prompt: &str, image: Option<&ImagePayload>) -> Self {
        let mut parts = vec![ReqPart {
            text: Some(prompt.to_string()),
            inline_data: None,
        }];
        if let Some(image) = image {
            parts.push(ReqPart {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: image.mime_type().to_string(),
                    data: image.to_base64(),
                }),
            });
        }
        Self {
            contents: vec![ReqContent { parts }],
        }
    }
}

impl GenerateResponse {
    /// Concatenates the text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn is_placeholder(key: &str) -> bool {
    let t = key.trim();
    t.is_empty()
        || t.contains("${")
        || t.eq_ignore_ascii_case("your-api-key-here")
        || t.eq_ignore_ascii_case("changeme")
}

/// HTTP transport for the Generative Language `generateContent` endpoint.
pub struct GeminiApi {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiApi {
    pub fn new(api_key: String, base_url: &str, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| GraphNarratorError::Integration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl ContentGenerator for GeminiApi {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        image: Option<&ImagePayload>,
    ) -> Result<String> {
        debug!(
            "Calling Gemini (model={}, prompt_chars={}, image={})",
            model,
            prompt.len(),
            image.is_some()
        );
        let body = GenerateRequest::new(prompt, image);
        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GraphNarratorError::RemoteCall {
                message: format!("Gemini API error {}: {}", status, error_text),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(GraphNarratorError::RemoteCall {
                message: format!("Gemini model {} returned no text", model),
            });
        }
        Ok(text)
    }
}

/// Remote summarization client: narrative from the chart image, then insights.
pub struct GeminiClient {
    generator: Arc<dyn ContentGenerator>,
    model: String,
    insight_model: String,
}

impl GeminiClient {
    /// A usable explicit key wins; a blank or placeholder one falls back to
    /// the key loaded from the environment.
    pub fn new(api_key: Option<&str>, config: &Config) -> Result<Self> {
        let key = api_key
            .filter(|k| !is_placeholder(k))
            .map(|k| k.trim().to_string())
            .or_else(|| {
                config
                    .runtime
                    .gemini_api_key
                    .clone()
                    .filter(|k| !is_placeholder(k))
            })
            .ok_or_else(|| GraphNarratorError::Configuration {
                message: "Gemini API key is not set (pass --api-key or set GEMINI_API_KEY)"
                    .to_string(),
            })?;

        let api = GeminiApi::new(key, &config.system.base_url, config.system.timeout_ms)?;
        info!("Using Gemini for summaries (model={})", config.system.model);
        Ok(Self::with_generator(
            Arc::new(api),
            &config.system.model,
            &config.system.insight_model,
        ))
    }

    pub fn with_generator(
        generator: Arc<dyn ContentGenerator>,
        model: &str,
        insight_model: &str,
    ) -> Self {
        Self {
            generator,
            model: model.to_string(),
            insight_model: insight_model.to_string(),
        }
    }
}

#[async_trait]
impl SummaryClient for GeminiClient {
    async fn summarize(&self, request: &SummaryRequest<'_>) -> Result<SummaryResult> {
        let image = encode_chart(request.chart)?;
        let prompt = build_summary_prompt(
            &request.additional_context,
            request.detail_level,
            request.language,
        );

        let summary_text = self
            .generator
            .generate(&self.model, &prompt, Some(&image))
            .await?;
        let insights = extract_insights(
            self.generator.as_ref(),
            &self.insight_model,
            &summary_text,
            request.language,
        )
        .await?;

        Ok(SummaryResult {
            summary_text,
            insights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_inlines_image_after_prompt() {
        let image = ImagePayload {
            bytes: vec![1, 2, 3],
            width: 1,
            height: 1,
        };
        let body = serde_json::to_value(GenerateRequest::new("describe", Some(&image))).unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "describe");
        assert!(parts[0].get("inline_data").is_none());
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "AQID");
    }

    #[test]
    fn text_only_request_has_one_part() {
        let body = serde_json::to_value(GenerateRequest::new("extract", None)).unwrap();
        assert_eq!(body["contents"][0]["parts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.text(), "ab");

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let config = Config::default();
        let err = GeminiClient::new(None, &config).err().unwrap();
        assert!(matches!(err, GraphNarratorError::Configuration { .. }));

        let err = GeminiClient::new(Some("changeme"), &config).err().unwrap();
        assert!(matches!(err, GraphNarratorError::Configuration { .. }));
    }

    #[test]
    fn text_parts_split_mid_sentence_stay_on_one_line() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"1. 売上は"},{"text":"増加\n2. 夏に最大"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.text(), "1. 売上は増加\n2. 夏に最大");
    }

    #[test]
    fn blank_explicit_key_falls_back_to_configured_key() {
        let mut config = Config::default();
        config.runtime.gemini_api_key = Some("real-key".to_string());
        assert!(GeminiClient::new(Some(""), &config).is_ok());
        assert!(GeminiClient::new(Some("   "), &config).is_ok());
        assert!(GeminiClient::new(Some("changeme"), &config).is_ok());

        let err = GeminiClient::new(Some(""), &Config::default()).err().unwrap();
        assert!(matches!(err, GraphNarratorError::Configuration { .. }));
    }

    #[test]
    fn explicit_key_builds_client() {
        let config = Config::default();
        assert!(GeminiClient::new(Some("test-key"), &config).is_ok());
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let api = GeminiApi::new("k".into(), "http://localhost:9/", 1000).unwrap();
        assert_eq!(
            api.endpoint("gemini-2.0-flash"),
            "http://localhost:9/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}

use crate::config::toml_config::AssistantSettings;
use crate::domain::ports::TextGenerator;
use crate::utils::error::{MarketError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<PartRequest<'a>>,
}

#[derive(Debug, Serialize)]
struct PartRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GenerateResponse {
    /// 合併第一個候選結果的所有文字片段
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Gemini `generateContent` REST 端點的客戶端
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: &AssistantSettings, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![PartRequest { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature },
        };

        tracing::debug!("Making generation request to: {}", self.url());
        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        tracing::debug!("Generation response status: {}", response.status());

        if !response.status().is_success() {
            return Err(MarketError::ServiceUnavailable {
                status: response.status().as_u16(),
            });
        }

        let payload: GenerateResponse = response.json().await?;
        payload.into_text().ok_or_else(|| MarketError::GenerationError {
            message: "response contained no candidate text".to_string(),
        })
    }
}

//! Generative model clients

use std::time::Duration;

use async_trait::async_trait;
use crm_core::config::AdvisorConfig;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AdvisorError;

/// Image part of a model response, still base64-encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Single-turn text completion
    async fn generate_text(&self, prompt: &str) -> Result<String, AdvisorError>;

    /// Images produced for `prompt`; may be empty
    async fn generate_images(&self, prompt: &str) -> Result<Vec<InlineImage>, AdvisorError>;
}

/// Client for the Gemini `generateContent` REST endpoint
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn from_config(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or(AdvisorError::Disabled)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    async fn generate(&self, model: &str, body: Value) -> Result<GenerateResponse, AdvisorError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AdvisorError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let raw: Value = response.json().await?;
        Ok(serde_json::from_value(raw)?)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, AdvisorError> {
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });
        let response = self.generate(&self.text_model, body).await?;
        response.text().ok_or(AdvisorError::EmptyResponse)
    }

    async fn generate_images(&self, prompt: &str) -> Result<Vec<InlineImage>, AdvisorError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] }
        });
        let response = self.generate(&self.image_model, body).await?;
        Ok(response.images())
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Text parts of the first candidate joined together
    fn text(&self) -> Option<String> {
        let text: String = self.parts().filter_map(|part| part.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }

    fn images(&self) -> Vec<InlineImage> {
        self.parts()
            .filter_map(|part| part.inline_data.as_ref())
            .map(|inline| InlineImage {
                mime_type: inline.mime_type.clone(),
                data: inline.data.clone(),
            })
            .collect()
    }
}

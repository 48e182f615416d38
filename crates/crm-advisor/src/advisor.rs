//! Strategy advisor
//!
//! Failures never reach the caller as errors: a text question answers with
//! a fixed retry message, an image brief yields no images.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crm_core::config::AdvisorConfig;

use crate::client::{GeminiClient, GenerativeClient};
use crate::context::BusinessContext;
use crate::error::AdvisorError;

pub const FALLBACK_REPLY: &str = "Strategic connection timed out. Please retry.";

/// Decoded image bytes with their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creative {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct Advisor {
    client: Option<Arc<dyn GenerativeClient>>,
    timeout: Duration,
}

impl Advisor {
    pub fn new(client: Arc<dyn GenerativeClient>, timeout: Duration) -> Self {
        Self {
            client: Some(client),
            timeout,
        }
    }

    /// Gemini-backed advisor, or a disabled one when no API key is set
    pub fn from_config(config: &AdvisorConfig) -> Self {
        let timeout = Duration::from_secs(config.request_timeout_seconds);
        match GeminiClient::from_config(config) {
            Ok(client) => Self::new(Arc::new(client), timeout),
            Err(err) => {
                tracing::info!(error = %err, "advisor disabled");
                Self { client: None, timeout }
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&Arc<dyn GenerativeClient>, AdvisorError> {
        self.client.as_ref().ok_or(AdvisorError::Disabled)
    }

    /// Answer `question` with `context` in view
    pub async fn ask(&self, context: &BusinessContext, question: &str) -> String {
        match self.try_ask(context, question).await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(error = %err, "advisor request failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    pub async fn try_ask(&self, context: &BusinessContext, question: &str) -> Result<String, AdvisorError> {
        let client = self.client()?;
        let prompt = strategy_prompt(context, question);
        let answer = tokio::time::timeout(self.timeout, client.generate_text(&prompt))
            .await
            .map_err(|_| AdvisorError::Timeout(self.timeout.as_secs()))??;
        Ok(answer.trim().to_string())
    }

    /// Marketing images for a creative brief
    pub async fn creatives(&self, brief: &str) -> Vec<Creative> {
        let images = match self.client() {
            Ok(client) => tokio::time::timeout(self.timeout, client.generate_images(brief))
                .await
                .map_err(|_| AdvisorError::Timeout(self.timeout.as_secs()))
                .and_then(|result| result),
            Err(err) => Err(err),
        };

        match images {
            Ok(images) => images
                .into_iter()
                .filter_map(|image| match BASE64.decode(image.data.as_bytes()) {
                    Ok(bytes) => Some(Creative {
                        mime_type: image.mime_type,
                        bytes,
                    }),
                    Err(err) => {
                        tracing::warn!(error = %err, "skipping undecodable image");
                        None
                    }
                })
                .collect(),
            Err(err) => {
                tracing::warn!(error = %err, "image generation failed");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field("enabled", &self.is_enabled())
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn strategy_prompt(context: &BusinessContext, question: &str) -> String {
    format!(
        "You are a strategic business advisor for {agency}, a digital agency. \
         Answer concisely with concrete, actionable recommendations.\n\n\
         Current business snapshot:\n{context}\n\
         Question: {question}",
        agency = context.agency(),
        question = question.trim(),
    )
}

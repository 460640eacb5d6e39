use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmConfig;
use crate::models::chat::ChatMessage;
use crate::utils::error::ApiError;

/// One round-trip to the external generation provider. Implementations are
/// stateless; every failure mode of the transport (connect error, timeout,
/// bad status, undecodable envelope) is classified as
/// `ApiError::ProviderUnreachable` so the orchestrator can tell it apart
/// from a reply that arrived but failed extraction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ApiError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    format: &'a str,
    options: GenerateOptions,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    config: LlmConfig,
}

impl OllamaClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }
}

#[async_trait]
impl GenerationProvider for OllamaClient {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ApiError> {
        debug!("Calling generation provider with {} messages", messages.len());

        let request = GenerateRequest {
            model: &self.config.model,
            messages,
            format: "json",
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
            stream: false,
        };

        let response = self
            .client
            .post(&self.config.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                ApiError::ProviderUnreachable(format!("request to provider failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::ProviderUnreachable(format!(
                "provider returned {}: {}",
                status, body
            )));
        }

        let envelope: GenerateResponse = response.json().await.map_err(|e| {
            ApiError::ProviderUnreachable(format!("undecodable provider envelope: {}", e))
        })?;

        Ok(envelope.response)
    }
}

//! Async LLM client for strategic advice
//!
//! This is a model-agnostic HTTP client for calling LLM APIs.
//! Supports both Anthropic and OpenAI-compatible APIs (DeepSeek, etc).
//! Every request is bounded by the configured timeout.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::core::config::OracleConfig;
use crate::core::error::{DuelError, Result};

/// API format type
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

/// Async LLM client for making API calls
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
    max_tokens: u32,
    api_format: ApiFormat,
}

impl LlmClient {
    /// Create a new LLM client with explicit configuration
    pub fn new(
        api_key: String,
        api_url: String,
        model: String,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DuelError::AdvisoryUnavailable(e.to_string()))?;
        let api_format = Self::detect_api_format(&api_url);
        Ok(Self {
            client,
            api_key,
            api_url,
            model,
            max_tokens,
            api_format,
        })
    }

    /// Detect API format from URL
    fn detect_api_format(url: &str) -> ApiFormat {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            // DeepSeek, OpenAI, and other compatible APIs use OpenAI format
            ApiFormat::OpenAI
        }
    }

    /// Create a client from an oracle config plus `LLM_API_KEY`
    ///
    /// `LLM_API_URL` and `LLM_MODEL` override the configured URL and model.
    pub fn from_config(config: &OracleConfig) -> Result<Self> {
        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| DuelError::AdvisoryUnavailable("LLM_API_KEY not set".into()))?;
        let config = config.clone().with_env_overrides();
        Self::new(
            api_key,
            config.api_url.clone(),
            config.model.clone(),
            config.max_tokens,
            config.timeout(),
        )
    }

    pub fn api_format(&self) -> &ApiFormat {
        &self.api_format
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a completion request to the LLM
    ///
    /// # Arguments
    /// * `system` - System prompt providing context and instructions
    /// * `user` - User message/query to process
    ///
    /// # Returns
    /// The LLM's text response
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        match self.api_format {
            ApiFormat::Anthropic => self.complete_anthropic(system, user).await,
            ApiFormat::OpenAI => self.complete_openai(system, user).await,
        }
    }

    async fn complete_anthropic(&self, system: &str, user: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: system.into(),
            messages: vec![Message {
                role: "user".into(),
                content: user.into(),
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DuelError::AdvisoryUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DuelError::AdvisoryUnavailable(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let completion: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| DuelError::AdvisoryMalformed(e.to_string()))?;

        completion
            .content
            .first()
            .map(|c| c.text.clone())
            .ok_or_else(|| DuelError::AdvisoryUnavailable("Empty response".into()))
    }

    async fn complete_openai(&self, system: &str, user: &str) -> Result<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![
                Message {
                    role: "system".into(),
                    content: system.into(),
                },
                Message {
                    role: "user".into(),
                    content: user.into(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| DuelError::AdvisoryUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(DuelError::AdvisoryUnavailable(format!(
                "API error {}: {}",
                status, error_text
            )));
        }

        let completion: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| DuelError::AdvisoryMalformed(e.to_string()))?;

        completion
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| DuelError::AdvisoryUnavailable("Empty response".into()))
    }
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format (DeepSeek, OpenAI, etc.)
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// Shared
#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(url: &str) -> LlmClient {
        LlmClient::new(
            "test-key".into(),
            url.into(),
            "test-model".into(),
            256,
            Duration::from_millis(500),
        )
        .unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client_for("https://api.example.com");
        assert_eq!(client.api_key, "test-key");
        assert_eq!(client.api_url, "https://api.example.com");
        assert_eq!(client.model(), "test-model");
        assert_eq!(client.max_tokens, 256);
    }

    #[test]
    fn test_api_format_detection() {
        assert_eq!(
            client_for("https://api.anthropic.com/v1/messages").api_format(),
            &ApiFormat::Anthropic
        );
        assert_eq!(
            client_for("https://api.deepseek.com/chat/completions").api_format(),
            &ApiFormat::OpenAI
        );
    }

    #[test]
    fn test_from_config_missing_key() {
        let result = LlmClient::from_config(&OracleConfig::default());
        // Should fail if LLM_API_KEY is not set
        if std::env::var("LLM_API_KEY").is_err() {
            assert!(result.is_err());
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_unavailable() {
        let client = client_for("http://127.0.0.1:9/v1/chat/completions");
        let result = client.complete("system", "user").await;
        assert!(matches!(result, Err(DuelError::AdvisoryUnavailable(_))));
    }
}

//! Model client abstraction and the Groq chat-completions implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from model generation calls.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API key not configured for {0}")]
    MissingApiKey(String),

    #[error("Response parse error: {0}")]
    ParseError(String),

    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

/// One generation request: a role system line plus a rendered prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Text-generation backend shared by every courtroom agent.
///
/// One call per invocation; retries and streaming are out of scope.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Model identifier for logs and records.
    fn model_name(&self) -> &str;

    /// Issue a single generation call.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError>;
}

/// Default Groq model for all courtroom roles.
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq's OpenAI-compatible API root.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Groq chat-completions client (OpenAI-compatible wire shape).
pub struct GroqClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self::with_model(
            api_key,
            DEFAULT_GROQ_MODEL.to_string(),
            DEFAULT_GROQ_BASE_URL.to_string(),
        )
    }

    pub fn with_model(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

#[async_trait]
impl ModelClient for GroqClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError> {
        if self.api_key.is_empty() {
            return Err(ModelError::MissingApiKey("groq".to_string()));
        }

        let request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.prompt}
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        tracing::debug!(model = %self.model, temperature = request.temperature, "sending generation request");

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ModelError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let resp_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ModelError::ParseError(e.to_string()))?;

        match resp_json["choices"][0]["message"]["content"].as_str() {
            Some(content) => Ok(content.to_string()),
            None => Err(ModelError::ParseError(
                "no message content in response".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generate_without_api_key_fails() {
        let client = GroqClient::new(String::new());
        let request = GenerationRequest {
            system: "You are a judge in an Indian courtroom.".to_string(),
            prompt: "Rule on the case.".to_string(),
            temperature: 0.3,
            max_tokens: 1000,
        };
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, ModelError::MissingApiKey(_)));
    }

    #[test]
    fn test_default_client_uses_groq_model() {
        let client = GroqClient::new("key".to_string());
        assert_eq!(client.model_name(), DEFAULT_GROQ_MODEL);
    }
}

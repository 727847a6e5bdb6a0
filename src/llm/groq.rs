// file: src/llm/groq.rs
// description: Groq chat completion client used for answers and summaries
// reference: https://console.groq.com/docs/api-reference#chat

use super::Generator;
use crate::config::GenerationConfig;
use crate::error::{QaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct GroqChatClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    system_prompt: String,
}

impl GroqChatClient {
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QaError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

/// Pulls the upstream message out of an OpenAI-style error body, else keeps the raw text.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl Generator for GroqChatClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(QaError::MissingCredential)?;
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            "Requesting completion from {} ({}) for {} chars",
            url,
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| QaError::Generation(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(QaError::Generation(format!(
                "status {}: {}",
                status,
                error_detail(&error_text)
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| QaError::Generation(format!("invalid response: {}", e)))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| QaError::Generation("no choices returned".to_string()))?;

        debug!("Received completion of {} chars", content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_request_body_shape() {
        let client = GroqChatClient::from_config(&Config::default_config().generation).unwrap();
        let json = serde_json::to_value(client.request_body("Summarize this")).unwrap();

        assert_eq!(json["model"], "llama-3.1-70b-versatile");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "You are a helpful assistant.");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Summarize this");
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let mut config = Config::default_config().generation;
        config.api_key = None;
        config.base_url = "http://127.0.0.1:9".to_string();

        let client = GroqChatClient::from_config(&config).unwrap();
        assert!(!client.has_credentials());
        assert!(matches!(
            client.generate("hello").await,
            Err(QaError::MissingCredential)
        ));
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(
            error_detail(r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#),
            "Invalid API Key"
        );
        assert_eq!(error_detail("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"42"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("42"));
    }
}

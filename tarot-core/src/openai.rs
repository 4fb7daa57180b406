//! Chat completions API client
//!
//! Shared types and the single request helper for the OpenAI-compatible
//! chat completions endpoint readings are generated against. The endpoint
//! URL and authorization header are taken from [`Config`], so the client
//! works against any compatible deployment.

use crate::Config;
use crate::http::get_client;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Request payload for the chat completions API
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// Create a request carrying a single user message, with model
    /// parameters taken from the configuration.
    pub fn new(config: &Config, content: impl Into<String>) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            messages: vec![Message::user(content)],
        }
    }
}

/// A message in the chat conversation
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Response from the chat completions API
///
/// `choices` is mandatory: a body without it is a deserialization error,
/// never an empty result.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

/// A single response choice
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message content in a response choice
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Send a chat completion request to the configured endpoint
///
/// Single synchronous round trip: no retries, failures propagate to the
/// caller.
pub async fn chat_completion(request: &ChatRequest, config: &Config) -> Result<ChatResponse> {
    let client = get_client();

    let response = client
        .post(&config.api_url)
        .header(
            "Authorization",
            format!("{} {}", config.auth_type, config.api_key),
        )
        .header("Content-Type", "application/json")
        .json(request)
        .send()
        .await
        .context("Failed to send request to chat API")?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        anyhow::bail!("Chat API error {}: {}", status, text);
    }

    response
        .json()
        .await
        .context("Failed to parse chat API response")
}

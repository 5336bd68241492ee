#![doc = "Summariser integration: an OpenAI-style chat-completions client behind the core `Summariser` trait."]
//
//! # LLM summarisation client
//!
//! - Construct [`LLMClient`] from a [`SummariseSection`] and an API key, or
//!   with [`LLMClient::new_from_env`] (`SUMMARY_API_KEY`).
//! - Each chunk is sent as the user message with the configured instruction
//!   as the system message; the first choice's content is returned verbatim.
//! - Failures are returned as boxed errors with status and body; nothing is retried.

use async_trait::async_trait;
use commit_digest_core::config::SummariseSection;
use commit_digest_core::contract::Summariser;
use commit_digest_core::error::CollaboratorError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

use crate::load_config::API_KEY_ENV;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

pub struct LLMClient {
    client: Client,
    endpoint: String,
    model: String,
    instruction: String,
    api_key: String,
}

impl LLMClient {
    pub fn new(section: &SummariseSection, api_key: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        tracing::info!(
            endpoint = %section.endpoint,
            model = %section.model,
            api_key_set = !api_key.is_empty(),
            "Initialized LLMClient"
        );
        Ok(LLMClient {
            client,
            endpoint: section.endpoint.clone(),
            model: section.model.clone(),
            instruction: section.instruction.clone(),
            api_key,
        })
    }

    pub fn new_from_env(section: &SummariseSection) -> Result<Self, CollaboratorError> {
        dotenvy::dotenv().ok(); // loads environment variables from .env if present
        let api_key = env::var(API_KEY_ENV).map_err(|e| {
            tracing::error!(error = ?e, "{API_KEY_ENV} missing in environment");
            e
        })?;
        Ok(Self::new(section, api_key)?)
    }

    pub fn request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.instruction,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

/// Extract the first choice's text from a chat-completions response body.
pub fn parse_completion(body: &str) -> Result<String, CollaboratorError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| format!("Malformed completion response: {e}; body: {body}"))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| format!("Completion response has no content; body: {body}").into())
}

#[async_trait]
impl Summariser for LLMClient {
    async fn summarise(&self, prompt: &str) -> Result<String, CollaboratorError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            prompt_bytes = prompt.len(),
            "Requesting summary"
        );
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request(prompt))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, endpoint = %self.endpoint, "Failed to reach summarisation API");
                e
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<Failed to decode response body>"));
        if !status.is_success() {
            tracing::error!(
                status = %status,
                endpoint = %self.endpoint,
                "Summarisation API returned error. Response body: {text}"
            );
            return Err(format!("Summarisation API error: status {status}, body: {text}").into());
        }

        let summary = parse_completion(&text)?;
        tracing::info!(summary_bytes = summary.len(), "Received summary");
        Ok(summary)
    }
}

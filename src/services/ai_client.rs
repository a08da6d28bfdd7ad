// src/services/ai_client.rs
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::config::{AiConfig, MODEL_ID};
use crate::error::ClientError;
use crate::message::CompletionRequest;

/// Thin wrapper around the chat-completion endpoint.
#[derive(Clone, Debug)]
pub struct AiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AiClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Send one user message and return the provider's JSON untouched.
    pub async fn send_message(&self, message: Option<&str>) -> Result<Value, ClientError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionRequest::user(MODEL_ID, message);

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, &self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

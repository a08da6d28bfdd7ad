// src/services/hub_client.rs
use serde_json::Value;

use crate::config::HubConfig;
use crate::error::ClientError;

#[derive(Clone, Debug)]
pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HubClient {
    pub fn new(config: &HubConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Current state of every entity, as returned by `GET /api/states`.
    pub async fn fetch_states(&self) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(format!("{}/api/states", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::ai_client::AiClient;
use crate::services::hub_client::HubClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub ai: AiClient,
    pub hub: HubClient,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            ai: AiClient::new(&config.ai),
            hub: HubClient::new(&config.hub),
        }
    }
}

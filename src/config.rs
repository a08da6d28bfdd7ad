// src/config.rs
use std::net::{Ipv4Addr, SocketAddr};

use tracing::warn;

pub const MODEL_ID: &str = "deepseek-ai/DeepSeek-R1";
pub const PORT: u16 = 3000;
pub const PUBLIC_DIR: &str = "public";

#[derive(Clone, Debug, Default)]
pub struct AiConfig {
    /// Base URL of the completion API, e.g. `https://api.intelligence.io.solutions/api/v1`
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header.
    pub api_key: String,
}

#[derive(Clone, Debug, Default)]
pub struct HubConfig {
    /// REST base, e.g. `http://homeassistant.local:8123`
    pub base_url: String,
    pub token: String,
    /// e.g. `ws://homeassistant.local:8123/api/websocket`
    pub ws_url: String,
}

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub ai: AiConfig,
    pub hub: HubConfig,
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Missing values are left empty; requests will fail upstream instead.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key).unwrap_or_else(|| {
                warn!("{} is not set", key);
                String::new()
            })
        };

        Self {
            ai: AiConfig {
                base_url: read("AI_API_URL"),
                api_key: read("AI_API_KEY"),
            },
            hub: HubConfig {
                base_url: read("HA_URL"),
                token: read("HA_TOKEN"),
                ws_url: read("HA_WS_URL"),
            },
        }
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, PORT))
    }
}

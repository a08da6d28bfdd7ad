// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<CompletionMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CompletionMessage<'a> {
    pub role: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'a str>,
}

impl<'a> CompletionRequest<'a> {
    pub fn user(model: &'a str, content: Option<&'a str>) -> Self {
        Self {
            model,
            messages: vec![CompletionMessage {
                role: "user",
                content,
            }],
        }
    }
}

pub const SUBSCRIPTION_ID: u64 = 1;
pub const STATE_CHANGED: &str = "state_changed";

/// Frames we send to the hub.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundFrame {
    Auth { access_token: String },
    SubscribeEvents { id: u64, event_type: String },
}

impl OutboundFrame {
    pub fn auth(token: impl Into<String>) -> Self {
        OutboundFrame::Auth {
            access_token: token.into(),
        }
    }

    pub fn subscribe_state_changes() -> Self {
        OutboundFrame::SubscribeEvents {
            id: SUBSCRIPTION_ID,
            event_type: STATE_CHANGED.to_string(),
        }
    }
}

/// Frames received from the hub.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HubFrame {
    AuthRequired,
    AuthOk,
    AuthInvalid {
        #[serde(default)]
        message: Option<String>,
    },
    Result {
        #[serde(default)]
        id: Option<u64>,
        #[serde(default)]
        success: bool,
    },
    Event {
        event: Value,
    },
    #[serde(other)]
    Other,
}

/// The inner `event` object of an event frame, kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct HubEvent(pub Value);

impl HubEvent {
    pub fn entity_id(&self) -> Option<&str> {
        self.field("entity_id").and_then(Value::as_str)
    }

    pub fn new_state(&self) -> Option<&str> {
        self.field("new_state")
            .and_then(|s| s.get("state"))
            .and_then(Value::as_str)
    }

    // Hub events nest the payload under `data`; accept both shapes.
    fn field(&self, key: &str) -> Option<&Value> {
        self.0
            .get(key)
            .or_else(|| self.0.get("data").and_then(|d| d.get(key)))
    }
}

// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::message::ErrorBody;

/// Failure talking to one of the upstream services.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("websocket failure: {0}")]
    WebSocket(#[from] Box<tungstenite::Error>),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tungstenite::Error> for ClientError {
    fn from(err: tungstenite::Error) -> Self {
        ClientError::WebSocket(Box::new(err))
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("AI API error")]
    AiApi(#[source] ClientError),
    #[error("Home Assistant API error")]
    HubApi(#[source] ClientError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Upstream detail stays in the server log.
        match &self {
            AppError::AiApi(source) => tracing::error!(error = %source, "AI request failed"),
            AppError::HubApi(source) => tracing::error!(error = %source, "hub request failed"),
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

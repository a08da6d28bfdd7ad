// src/routes/chat.rs
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{error::AppError, message::ChatRequest, state::SharedState};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    // A bad body is forwarded like an empty one; the provider decides.
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable chat body");
            ChatRequest::default()
        }
    };

    let reply = state
        .ai
        .send_message(request.message.as_deref())
        .await
        .map_err(AppError::AiApi)?;

    Ok(Json(reply))
}

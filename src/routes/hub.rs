// src/routes/hub.rs
use axum::{Json, extract::State};
use serde_json::Value;

use crate::{error::AppError, state::SharedState};

pub async fn states_handler(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let states = state.hub.fetch_states().await.map_err(AppError::HubApi)?;
    Ok(Json(states))
}

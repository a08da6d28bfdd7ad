// src/routes/mod.rs
pub mod chat;
pub mod hub;

use std::path::Path;

use crate::config::PUBLIC_DIR;
use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use hub::states_handler;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    let public = Path::new(PUBLIC_DIR);

    Router::new()
        .route_service("/", ServeFile::new(public.join("index.html")))
        .route("/api/chat", post(chat_handler))
        .route("/api/states", get(states_handler))
        .fallback_service(ServeDir::new(public))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

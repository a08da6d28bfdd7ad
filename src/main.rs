use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ha_relay::config::Config;
use ha_relay::message::HubEvent;
use ha_relay::routes;
use ha_relay::services::event_stream;
use ha_relay::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ha_relay=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    let state = Arc::new(AppState::new(&config));

    let app = routes::create_router().with_state(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    event_stream::spawn(config.hub.ws_url.clone(), config.hub.token.clone(), events_tx);
    tokio::spawn(log_events(events_rx));

    info!("relay running at http://localhost:{}", addr.port());
    axum::serve(listener, app).await?;
    Ok(())
}

async fn log_events(mut events: mpsc::UnboundedReceiver<HubEvent>) {
    while let Some(event) = events.recv().await {
        info!(
            entity_id = event.entity_id().unwrap_or("?"),
            new_state = event.new_state().unwrap_or("?"),
            "state changed"
        );
    }
}

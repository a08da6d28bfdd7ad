// src/services/event_stream.rs
//
// Hub WebSocket session: authenticate, subscribe once to `state_changed`,
// then publish every event onto a channel. No reconnect; once the socket
// closes or fails the session stays in its terminal state.
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

use crate::error::ClientError;
use crate::message::{HubEvent, HubFrame, OutboundFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Authenticating,
    Subscribed,
    Closed,
    Errored,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Closed | SessionState::Errored)
    }
}

/// What the transport should do after a frame arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Send(OutboundFrame),
    Deliver(HubEvent),
    Ignore,
}

#[derive(Debug)]
pub struct Session {
    token: String,
    state: SessionState,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            state: SessionState::Connecting,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Socket is open: authenticate.
    pub fn on_open(&mut self) -> OutboundFrame {
        if self.state == SessionState::Connecting {
            self.state = SessionState::Authenticating;
        }
        OutboundFrame::auth(self.token.clone())
    }

    pub fn on_frame(&mut self, frame: HubFrame) -> Action {
        match (self.state, frame) {
            (SessionState::Authenticating, HubFrame::AuthOk) => {
                info!("hub websocket authenticated");
                self.state = SessionState::Subscribed;
                Action::Send(OutboundFrame::subscribe_state_changes())
            }
            (SessionState::Subscribed, HubFrame::Event { event }) => {
                Action::Deliver(HubEvent(event))
            }
            (SessionState::Authenticating, HubFrame::AuthInvalid { message }) => {
                error!(reason = message.as_deref().unwrap_or("unknown"), "hub rejected token");
                self.state = SessionState::Errored;
                Action::Ignore
            }
            (_, HubFrame::Result { id, success }) => {
                debug!(?id, success, "hub result");
                Action::Ignore
            }
            (state, frame) => {
                debug!(?state, ?frame, "frame ignored");
                Action::Ignore
            }
        }
    }

    pub fn on_close(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::Closed;
        }
    }

    pub fn on_error(&mut self) {
        if !self.state.is_terminal() {
            self.state = SessionState::Errored;
        }
    }
}

/// Run the session in a background task.
pub fn spawn(
    ws_url: String,
    token: String,
    events: UnboundedSender<HubEvent>,
) -> JoinHandle<SessionState> {
    tokio::spawn(async move { run(&ws_url, &token, events).await })
}

/// Drive one session until the socket ends. Errors are logged, not returned.
pub async fn run(ws_url: &str, token: &str, events: UnboundedSender<HubEvent>) -> SessionState {
    let mut session = Session::new(token);

    match drive(ws_url, &mut session, &events).await {
        // A rejected token already logged its own error.
        Ok(()) if session.state() == SessionState::Errored => {}
        Ok(()) => {
            session.on_close();
            warn!("hub websocket closed");
        }
        Err(err) => {
            session.on_error();
            error!(error = %err, "hub websocket error");
        }
    }

    session.state()
}

async fn drive(
    ws_url: &str,
    session: &mut Session,
    events: &UnboundedSender<HubEvent>,
) -> Result<(), ClientError> {
    let (stream, _) = connect_async(ws_url).await?;
    let (mut tx, mut rx) = stream.split();

    let auth = serde_json::to_string(&session.on_open())?;
    tx.send(Message::Text(auth)).await?;

    while let Some(msg) = rx.next().await {
        let text = match msg? {
            Message::Text(text) => text,
            Message::Ping(data) => {
                tx.send(Message::Pong(data)).await?;
                continue;
            }
            Message::Close(_) => break,
            _ => continue,
        };

        let frame: HubFrame = match serde_json::from_str(&text) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(error = %err, "unparseable hub frame");
                continue;
            }
        };

        match session.on_frame(frame) {
            Action::Send(out) => {
                tx.send(Message::Text(serde_json::to_string(&out)?)).await?;
            }
            Action::Deliver(event) => {
                if events.send(event).is_err() {
                    debug!("event receiver dropped");
                }
            }
            Action::Ignore => {}
        }

        if session.state().is_terminal() {
            break;
        }
    }

    Ok(())
}

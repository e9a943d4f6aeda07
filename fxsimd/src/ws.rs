//! Persistent WebSocket channel.
//!
//! Every connection is registered as a subscriber the moment it is
//! accepted and receives every lifecycle event from every channel,
//! including orders placed over HTTP after it connected. Inbound text
//! frames are order submissions; a submission placed here flows through
//! the same engine, so the submitting connection observes its own order's
//! events along with everyone else.
//!
//! Malformed frames are answered on the same connection with a structured
//! error and the connection stays open for further attempts. A write
//! failure or disconnect ends the per-connection task, dropping its event
//! stream (which unregisters the subscriber); nothing surfaces past this
//! module.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use fxsim_domain::OrderEvent;
use fxsim_store::OrderRepository;

use crate::api::ApiState;
use crate::validation::{self, RequestError};

/// Close-code value reported for unsupported payloads (WS 1003).
const UNSUPPORTED_DATA: u16 = 1003;

/// Structured error frame sent back for malformed submissions.
#[derive(Debug, Serialize)]
struct WsError {
    error: &'static str,
    code: u16,
    message: String,
}

impl WsError {
    fn validation(errors: &[RequestError]) -> Self {
        let message = errors
            .iter()
            .map(|e| {
                let path = e
                    .localization
                    .as_ref()
                    .map(|path| {
                        path.iter()
                            .map(|part| match part {
                                serde_json::Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .collect::<Vec<_>>()
                            .join(".")
                    })
                    .unwrap_or_default();
                format!("{}: {} [type={}]", path, e.message, e.kind)
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            error: "Validation error",
            code: UNSUPPORTED_DATA,
            message,
        }
    }
}

/// Upgrade handler for `GET /ws`.
pub async fn ws_handler<S>(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ApiState<S>>>,
) -> impl IntoResponse
where
    S: OrderRepository + 'static,
{
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Per-connection task.
///
/// Multiplexes two directions over one socket: the event-sink side
/// (forwarding bus events out) and the order-source side (parsing inbound
/// submissions). Neither the engine nor the bus ever sees the connection.
async fn handle_socket<S>(mut socket: WebSocket, state: Arc<ApiState<S>>)
where
    S: OrderRepository + 'static,
{
    // Register before touching inbound frames so a connection always
    // observes its own submissions.
    let mut events = state.engine.subscribe();
    debug!(
        subscribers = state.engine.subscriber_count(),
        "WebSocket client connected"
    );

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(Ok(event)) => {
                        if forward_event(&mut socket, &event).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(lag)) => {
                        warn!(%lag, "WebSocket subscriber lagged");
                    }
                    None => break,
                }
            }
            message = socket.recv() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        if handle_submission(&mut socket, &state, &text).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Ping/pong are answered by axum; binary frames are ignored
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    debug!("WebSocket client disconnected");
    // `events` drops here, unregistering this subscriber
}

/// Event-sink direction: write one lifecycle event to the connection.
async fn forward_event(socket: &mut WebSocket, event: &OrderEvent) -> Result<(), axum::Error> {
    match serde_json::to_string(event) {
        Ok(payload) => socket.send(Message::Text(payload)).await,
        Err(e) => {
            warn!(error = %e, "Failed to serialize order event");
            Ok(())
        }
    }
}

/// Order-source direction: treat one inbound frame as a submission.
async fn handle_submission<S>(
    socket: &mut WebSocket,
    state: &Arc<ApiState<S>>,
    text: &str,
) -> Result<(), axum::Error>
where
    S: OrderRepository + 'static,
{
    match validation::parse_order(text.as_bytes()) {
        Ok(draft) => {
            if let Err(e) = state.engine.submit(&draft.stocks, draft.quantity).await {
                // Engine-level rejection of a frame that passed field
                // validation; report it the same way
                let reply = WsError {
                    error: "Validation error",
                    code: UNSUPPORTED_DATA,
                    message: e.to_string(),
                };
                return send_error(socket, &reply).await;
            }
            Ok(())
        }
        Err(errors) => send_error(socket, &WsError::validation(&errors)).await,
    }
}

async fn send_error(socket: &mut WebSocket, reply: &WsError) -> Result<(), axum::Error> {
    match serde_json::to_string(reply) {
        Ok(payload) => socket.send(Message::Text(payload)).await,
        Err(e) => {
            warn!(error = %e, "Failed to serialize error frame");
            Ok(())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

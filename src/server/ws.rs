//! WebSocket endpoint
//!
//! Every text frame is an integration request. The sender gets a `result`
//! frame (or an `error` frame), then all connected clients, the sender
//! included, get the same result as an `update` frame.

use crate::constants::ws::OUTBOX_CAPACITY;
use crate::error::Error;
use crate::server::connections::Outbox;
use crate::server::state::AppState;
use crate::service::{IntegrationRequest, IntegrationResult};

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Frames sent to WebSocket clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Reply to the client that sent the request
    Result { data: IntegrationResult },
    /// Result fanned out to every connected client
    Update { data: IntegrationResult },
    /// Reply to a request that could not be computed
    Error { message: String },
}

/// Upgrade handler
///
/// GET /ws
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sink, mut stream) = socket.split();
    let (outbox, mut inbox) = mpsc::channel::<ServerMessage>(OUTBOX_CAPACITY);
    let id = state.connections.connect(outbox.clone()).await;

    let writer = tokio::spawn(async move {
        while let Some(message) = inbox.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to serialize message: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => handle_request(&text, &outbox, &state).await,
            Ok(Message::Binary(_)) => {
                let _ = outbox.try_send(ServerMessage::Error {
                    message: "Binary messages are not supported".to_string(),
                });
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("WebSocket error on {}: {}", id, e);
                break;
            }
        }
    }

    state.connections.disconnect(&id).await;
    writer.abort();
}

/// Handle one request frame from a client
///
/// `reply` is the sender's own outbox.
pub async fn handle_request(text: &str, reply: &Outbox, state: &AppState) {
    let outcome = match serde_json::from_str::<IntegrationRequest>(text) {
        Ok(request) => state.integrate(&request).await,
        Err(e) => Err(Error::InvalidRequest(e.to_string())),
    };

    match outcome {
        Ok(result) => {
            let _ = reply.try_send(ServerMessage::Result {
                data: result.clone(),
            });
            state
                .connections
                .broadcast(&ServerMessage::Update { data: result })
                .await;
        }
        Err(e) => {
            if !e.is_client_error() {
                warn!("Unexpected error in integration: {}", e);
            }
            let _ = reply.try_send(ServerMessage::Error {
                message: e.to_string(),
            });
        }
    }
}

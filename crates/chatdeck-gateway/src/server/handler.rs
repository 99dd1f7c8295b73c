//! WebSocket handler
//!
//! One reader task and one writer task per socket. Whichever ends first
//! stops the other, then the connection is cleaned up exactly once.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::connection::{ConnectionId, Frame};
use crate::handlers::{DisconnectHandler, MessageDispatcher};
use crate::server::GatewayState;

/// Upgrade `GET /ws` to a WebSocket
pub async fn ws_handler(State(state): State<GatewayState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Drive an upgraded socket until either side closes it
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let id = ConnectionId::new();
    let (tx, mut rx) = mpsc::channel::<Frame>(state.config().gateway.outbound_buffer);
    state.registry().register(id.clone(), tx);

    tracing::info!(connection_id = %id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let state_recv = state.clone();
    let id_recv = id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    MessageDispatcher::handle_text(&state_recv, &id_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(connection_id = %id_recv, "Binary frame ignored");
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %id_recv, "Client sent close");
                    break;
                }
                Err(e) => {
                    tracing::debug!(connection_id = %id_recv, error = %e, "WebSocket read error");
                    break;
                }
            }
        }
    });

    let id_send = id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = ws_sink.send(Message::Text(frame.to_string())).await {
                tracing::debug!(connection_id = %id_send, error = %e, "WebSocket write failed");
                break;
            }
        }
        // Queue closed (registry cleared) or the peer is gone
        let _ = ws_sink.close().await;
    });

    tokio::select! {
        _ = &mut recv_task => {
            send_task.abort();
            let _ = send_task.await;
        }
        _ = &mut send_task => {
            recv_task.abort();
            let _ = recv_task.await;
        }
    }

    DisconnectHandler::handle(&state, &id).await;
    tracing::info!(connection_id = %id, "WebSocket connection closed");
}

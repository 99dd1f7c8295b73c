//! Broadcaster
//!
//! Serializes an event once and enqueues the frame on every open connection.
//! Delivery is best effort: a full or closed queue loses the frame for that
//! recipient only, and nothing is retried.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;

use crate::connection::{ConnectionId, Frame, SessionRegistry};
use crate::protocol::ServerMessage;

#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<SessionRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Send `event` to every open connection except `exclude`
    ///
    /// Returns how many queues accepted the frame.
    pub fn broadcast(&self, event: &ServerMessage, exclude: Option<&ConnectionId>) -> usize {
        let Some(frame) = encode(event) else {
            return 0;
        };

        let mut delivered = 0;
        for (id, sender) in self.registry.all_open() {
            if exclude == Some(&id) {
                continue;
            }
            if enqueue(&id, &sender, Arc::clone(&frame)) {
                delivered += 1;
            }
        }

        tracing::debug!(event = event.kind(), delivered, "Broadcast");
        delivered
    }

    /// Send `event` to a single connection
    pub fn send_to(&self, id: &ConnectionId, event: &ServerMessage) -> bool {
        let Some(sender) = self.registry.sender(id) else {
            tracing::debug!(connection_id = %id, "Unicast to unknown connection dropped");
            return false;
        };
        let Some(frame) = encode(event) else {
            return false;
        };
        enqueue(id, &sender, frame)
    }
}

fn encode(event: &ServerMessage) -> Option<Frame> {
    match event.to_json() {
        Ok(json) => Some(Frame::from(json)),
        Err(e) => {
            tracing::error!(event = event.kind(), error = %e, "Failed to serialize event");
            None
        }
    }
}

fn enqueue(id: &ConnectionId, sender: &tokio::sync::mpsc::Sender<Frame>, frame: Frame) -> bool {
    match sender.try_send(frame) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(connection_id = %id, "Outbound queue full, frame dropped");
            false
        }
        Err(TrySendError::Closed(_)) => {
            tracing::debug!(connection_id = %id, "Outbound queue closed, frame dropped");
            false
        }
    }
}

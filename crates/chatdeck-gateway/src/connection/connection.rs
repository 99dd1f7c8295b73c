//! Individual WebSocket connection

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, error::TrySendError};

use super::session::{Identity, SessionState};

/// A serialized server frame, shared by every recipient of a broadcast
pub type Frame = Arc<str>;

/// Opaque per-socket identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Fresh random id
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered socket: the sending half of its outbound queue plus its
/// session state
#[derive(Debug)]
pub struct Connection {
    sender: mpsc::Sender<Frame>,
    state: SessionState,
    connected_at: Instant,
}

impl Connection {
    pub fn new(sender: mpsc::Sender<Frame>) -> Self {
        Self {
            sender,
            state: SessionState::Anonymous,
            connected_at: Instant::now(),
        }
    }

    /// The writer task still drains the queue
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }

    pub fn sender(&self) -> &mpsc::Sender<Frame> {
        &self.sender
    }

    /// Enqueue without waiting; a full queue rejects the frame
    pub fn try_send(&self, frame: Frame) -> Result<(), TrySendError<Frame>> {
        self.sender.try_send(frame)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    pub(super) fn identify(&mut self, identity: Identity) -> Option<Identity> {
        self.state.identify(identity)
    }

    pub fn connected_for(&self) -> Duration {
        self.connected_at.elapsed()
    }
}

//! Reconnecting WebSocket client
//!
//! A background task owns the socket. When the connection drops it waits
//! `reconnect_delay`, dials again and replays the last `join` so the server
//! sees the same identity. Frames sent while disconnected are dropped, except
//! `join`, which is kept for the next connection.

use std::ops::ControlFlow;
use std::time::Duration;

use futures_util::{Sink, SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use chatdeck_gateway::protocol::{ClientMessage, ServerMessage};

use crate::error::{ClientError, ClientResult};
use crate::typing::TypingDebouncer;

const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(3);
const DEFAULT_TYPING_TIMEOUT: Duration = Duration::from_secs(3);

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Relay endpoint, e.g. `ws://127.0.0.1:5000/ws`
    pub url: String,
    pub reconnect_delay: Duration,
    /// How long a typing indicator stays on without another keystroke
    pub typing_timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            typing_timeout: DEFAULT_TYPING_TIMEOUT,
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_typing_timeout(mut self, timeout: Duration) -> Self {
        self.typing_timeout = timeout;
        self
    }
}

/// What the connection task reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Connected,
    Disconnected,
    Message(ServerMessage),
}

#[derive(Debug)]
pub(crate) enum Command {
    Send(ClientMessage),
    Close,
}

/// Cloneable sending side of a [`ChatClient`]
#[derive(Debug, Clone)]
pub struct ClientHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl ClientHandle {
    #[cfg(test)]
    pub(crate) fn detached() -> (Self, mpsc::UnboundedReceiver<Command>) {
        let (commands, rx) = mpsc::unbounded_channel();
        (Self { commands }, rx)
    }

    pub fn send(&self, message: ClientMessage) -> ClientResult<()> {
        self.commands
            .send(Command::Send(message))
            .map_err(|_| ClientError::Closed)
    }

    /// Identify as `username`; remembered and replayed after reconnects
    pub fn join(&self, username: impl Into<String>, user_id: Option<&str>) -> ClientResult<()> {
        self.send(ClientMessage::Join {
            username: username.into(),
            user_id: user_id.map(str::to_string),
        })
    }

    pub fn send_message(
        &self,
        content: impl Into<String>,
        username: impl Into<String>,
        channel: Option<String>,
    ) -> ClientResult<()> {
        self.send(ClientMessage::Message {
            content: content.into(),
            username: username.into(),
            channel,
        })
    }

    pub fn send_typing(&self, username: impl Into<String>, is_typing: bool) -> ClientResult<()> {
        self.send(ClientMessage::Typing {
            username: username.into(),
            is_typing,
        })
    }

    /// Close the socket and stop reconnecting
    pub fn close(&self) {
        let _ = self.commands.send(Command::Close);
    }
}

/// A relay connection that keeps itself alive
pub struct ChatClient {
    handle: ClientHandle,
    events: mpsc::UnboundedReceiver<ClientEvent>,
    task: JoinHandle<()>,
    typing_timeout: Duration,
}

impl ChatClient {
    /// Start the connection task; must be called inside a tokio runtime
    pub fn connect(config: ClientConfig) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let typing_timeout = config.typing_timeout;

        let task = tokio::spawn(run(config, commands_rx, events_tx));

        Self {
            handle: ClientHandle {
                commands: commands_tx,
            },
            events: events_rx,
            task,
            typing_timeout,
        }
    }

    pub fn handle(&self) -> ClientHandle {
        self.handle.clone()
    }

    /// Next event; `None` once the client has shut down
    pub async fn next_event(&mut self) -> Option<ClientEvent> {
        self.events.recv().await
    }

    /// Debouncer sending typing indicators as `username`
    pub fn typing_debouncer(&self, username: impl Into<String>) -> TypingDebouncer {
        TypingDebouncer::new(self.handle(), username, self.typing_timeout)
    }

    /// Close the socket and wait for the connection task to finish
    pub async fn shutdown(self) {
        self.handle.close();
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "Client task ended abnormally");
        }
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

enum SessionEnd {
    /// Close requested or every handle dropped
    Closed,
    /// Socket failed or the server went away
    Dropped,
}

async fn run(
    config: ClientConfig,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<ClientEvent>,
) {
    let mut last_join: Option<ClientMessage> = None;

    loop {
        let connecting = connect_async(config.url.as_str());
        tokio::pin!(connecting);
        let connected = loop {
            tokio::select! {
                result = &mut connecting => break result,
                command = commands.recv() => {
                    if offline(command, &mut last_join).is_break() {
                        return;
                    }
                }
            }
        };

        match connected {
            Ok((socket, _response)) => {
                tracing::info!(url = %config.url, "Connected to relay");
                let _ = events.send(ClientEvent::Connected);

                match session(socket, &mut commands, &events, &mut last_join).await {
                    SessionEnd::Closed => return,
                    SessionEnd::Dropped => {
                        tracing::info!(url = %config.url, "Disconnected from relay");
                        let _ = events.send(ClientEvent::Disconnected);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(url = %config.url, error = %e, "Connection failed");
            }
        }

        let backoff = tokio::time::sleep(config.reconnect_delay);
        tokio::pin!(backoff);
        loop {
            tokio::select! {
                () = &mut backoff => break,
                command = commands.recv() => {
                    if offline(command, &mut last_join).is_break() {
                        return;
                    }
                }
            }
        }
    }
}

/// Apply a command received while no socket is open
fn offline(command: Option<Command>, last_join: &mut Option<ClientMessage>) -> ControlFlow<()> {
    match command {
        None | Some(Command::Close) => return ControlFlow::Break(()),
        Some(Command::Send(message @ ClientMessage::Join { .. })) => {
            *last_join = Some(message);
        }
        Some(Command::Send(message)) => {
            tracing::debug!(kind = message.kind(), "Not connected, frame dropped");
        }
    }
    ControlFlow::Continue(())
}

async fn session(
    socket: Socket,
    commands: &mut mpsc::UnboundedReceiver<Command>,
    events: &mpsc::UnboundedSender<ClientEvent>,
    last_join: &mut Option<ClientMessage>,
) -> SessionEnd {
    let (mut write, mut read) = socket.split();

    if let Some(join) = last_join.as_ref() {
        tracing::debug!("Replaying join after reconnect");
        if send_frame(&mut write, join).await.is_err() {
            return SessionEnd::Dropped;
        }
    }

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                None | Some(Command::Close) => {
                    let _ = write.close().await;
                    return SessionEnd::Closed;
                }
                Some(Command::Send(message)) => {
                    if matches!(message, ClientMessage::Join { .. }) {
                        *last_join = Some(message.clone());
                    }
                    if let Err(e) = send_frame(&mut write, &message).await {
                        tracing::warn!(error = %e, "WebSocket write failed");
                        return SessionEnd::Dropped;
                    }
                }
            },
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => match ServerMessage::from_json(&text) {
                    Ok(message) => {
                        let _ = events.send(ClientEvent::Message(message));
                    }
                    Err(e) => tracing::debug!(error = %e, "Unrecognized server frame"),
                },
                Some(Ok(Message::Close(_))) | None => return SessionEnd::Dropped,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "WebSocket read error");
                    return SessionEnd::Dropped;
                }
            },
        }
    }
}

async fn send_frame<S>(write: &mut S, message: &ClientMessage) -> Result<(), S::Error>
where
    S: Sink<Message> + Unpin,
{
    match message.to_json() {
        Ok(json) => write.send(Message::Text(json)).await,
        Err(e) => {
            tracing::error!(kind = message.kind(), error = %e, "Failed to encode frame");
            Ok(())
        }
    }
}

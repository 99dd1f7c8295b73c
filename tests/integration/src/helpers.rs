//! Test helpers for integration tests
//!
//! Provides a server that runs for the lifetime of a test, HTTP request
//! shortcuts and a small WebSocket client that speaks the relay protocol.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chatdeck_common::{AppConfig, AppResult};
use chatdeck_gateway::protocol::ServerMessage;
use chatdeck_gateway::{create_gateway_state, serve};
use futures_util::{SinkExt, StreamExt};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

/// How long a test waits for an expected frame
pub const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

/// A running server bound to 127.0.0.1 on a free port
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<AppResult<()>>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = create_gateway_state(config);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve(listener, state, async {
            let _ = shutdown_rx.await;
        }));

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            shutdown: Some(shutdown_tx),
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.put(&url).json(body).send().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.delete(&url).send().await?)
    }

    /// Open a WebSocket to `/ws`
    pub async fn connect(&self) -> Result<WsClient> {
        let (stream, _) = connect_async(self.ws_url()).await?;
        Ok(WsClient { stream })
    }

    /// Open a WebSocket and join, waiting until the server has announced it
    pub async fn connect_as(&self, username: &str, user_id: &str) -> Result<WsClient> {
        let mut ws = self.connect().await?;
        ws.send_json(&crate::fixtures::join_frame(username, Some(user_id)))
            .await?;
        ws.recv_until(|msg| {
            matches!(msg, ServerMessage::UserJoined { username: name, .. } if name == username)
        })
        .await?;
        Ok(ws)
    }

    /// Trigger graceful shutdown and wait for the server task
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        tokio::time::timeout(FRAME_TIMEOUT, &mut self.handle)
            .await
            .context("server did not stop")??
            .map_err(|e| anyhow::anyhow!("server error: {e}"))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Default config; nothing is read from the environment
pub fn test_config() -> AppConfig {
    AppConfig::default()
}

/// A raw protocol client for one connection
pub struct WsClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsClient {
    pub async fn send_json(&mut self, frame: &Value) -> Result<()> {
        self.send_text(&frame.to_string()).await
    }

    pub async fn send_text(&mut self, text: &str) -> Result<()> {
        self.stream.send(Message::Text(text.to_string())).await?;
        Ok(())
    }

    /// Next server frame, failing after [`FRAME_TIMEOUT`]
    pub async fn recv(&mut self) -> Result<ServerMessage> {
        self.recv_within(FRAME_TIMEOUT)
            .await?
            .context("timed out waiting for a frame")
    }

    /// Next server frame, or `None` if nothing arrives within `wait`
    pub async fn recv_within(&mut self, wait: Duration) -> Result<Option<ServerMessage>> {
        let deadline = tokio::time::Instant::now() + wait;
        loop {
            let next = match tokio::time::timeout_at(deadline, self.stream.next()).await {
                Ok(next) => next,
                Err(_) => return Ok(None),
            };
            match next {
                Some(Ok(Message::Text(text))) => return Ok(Some(ServerMessage::from_json(&text)?)),
                Some(Ok(Message::Close(_))) | None => bail!("connection closed"),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Skip frames until one matches
    pub async fn recv_until<F>(&mut self, mut pred: F) -> Result<ServerMessage>
    where
        F: FnMut(&ServerMessage) -> bool,
    {
        loop {
            let msg = self.recv().await?;
            if pred(&msg) {
                return Ok(msg);
            }
        }
    }

    /// Fail if any frame arrives within `wait`
    pub async fn expect_silence(&mut self, wait: Duration) -> Result<()> {
        match self.recv_within(wait).await? {
            None => Ok(()),
            Some(msg) => bail!("expected no frame, got {msg:?}"),
        }
    }

    /// Whether the server has closed this connection within `wait`
    pub async fn is_closed_within(&mut self, wait: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + wait;
        loop {
            match tokio::time::timeout_at(deadline, self.stream.next()).await {
                Err(_) => return false,
                Ok(None | Some(Ok(Message::Close(_)) | Err(_))) => return true,
                Ok(Some(Ok(_))) => continue,
            }
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.close(None).await?;
        Ok(())
    }
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(str::to_string)
        .context("error body without code")
}

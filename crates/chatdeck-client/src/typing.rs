//! Typing indicator debounce
//!
//! The first keystroke sends `isTyping: true`. Each further keystroke pushes
//! the deadline back; once `timeout` passes without one, `isTyping: false`
//! goes out on its own.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::client::ClientHandle;
use crate::error::ClientResult;

pub struct TypingDebouncer {
    handle: ClientHandle,
    username: String,
    timeout: Duration,
    expiry: Option<JoinHandle<()>>,
}

impl TypingDebouncer {
    pub fn new(handle: ClientHandle, username: impl Into<String>, timeout: Duration) -> Self {
        Self {
            handle,
            username: username.into(),
            timeout,
            expiry: None,
        }
    }

    /// Whether the indicator is currently on
    pub fn is_typing(&self) -> bool {
        self.expiry.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Record a keystroke; must be called inside a tokio runtime
    pub fn keystroke(&mut self) -> ClientResult<()> {
        let was_typing = self.is_typing();
        if let Some(task) = self.expiry.take() {
            task.abort();
        }
        if !was_typing {
            self.handle.send_typing(self.username.as_str(), true)?;
        }

        let handle = self.handle.clone();
        let username = self.username.clone();
        let timeout = self.timeout;
        self.expiry = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if let Err(e) = handle.send_typing(username, false) {
                tracing::debug!(error = %e, "Typing expiry after client closed");
            }
        }));
        Ok(())
    }

    /// Turn the indicator off now (message sent or input cleared)
    pub fn stop(&mut self) -> ClientResult<()> {
        let was_typing = self.is_typing();
        if let Some(task) = self.expiry.take() {
            task.abort();
        }
        if was_typing {
            self.handle.send_typing(self.username.as_str(), false)?;
        }
        Ok(())
    }
}

impl Drop for TypingDebouncer {
    fn drop(&mut self) {
        if let Some(task) = self.expiry.take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for TypingDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypingDebouncer")
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .field("is_typing", &self.is_typing())
            .finish()
    }
}

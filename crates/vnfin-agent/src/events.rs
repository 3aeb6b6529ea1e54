//! Agent execution events
//!
//! Listeners observe a turn as it runs: tool calls starting and finishing,
//! text the model emits alongside tool calls, and the final answer. The
//! [`ResponseStreamer`] fans events out to any number of listeners.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

/// Callbacks invoked while the agent processes a turn
///
/// All methods default to doing nothing.
#[async_trait]
pub trait AgentEventListener: Send + Sync {
    /// Called when a tool execution starts
    async fn on_tool_start(&self, _id: &str, _name: &str, _input: &Value) {}

    /// Called when a tool execution completes
    async fn on_tool_done(
        &self,
        _id: &str,
        _name: &str,
        _result: std::result::Result<&str, &str>,
        _duration_ms: u64,
    ) {
    }

    /// Text the model produced together with tool calls
    async fn on_assistant_text(&self, _text: &str) {}

    /// Called with the final answer of a turn
    async fn on_complete(&self, _answer: &str) {}

    /// Called when a turn fails
    async fn on_error(&self, _error: &str) {}
}

/// Listener that ignores every event
pub struct NoOpListener;

#[async_trait]
impl AgentEventListener for NoOpListener {}

/// Fan-out of agent events to registered listeners
#[derive(Default)]
pub struct ResponseStreamer {
    listeners: RwLock<Vec<Arc<dyn AgentEventListener>>>,
}

impl ResponseStreamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener
    pub fn add_listener(&self, listener: Arc<dyn AgentEventListener>) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Unregister a listener previously added; returns whether it was found
    pub fn remove_listener(&self, listener: &Arc<dyn AgentEventListener>) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|l| !Arc::ptr_eq(l, listener));
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // Snapshot so no lock is held across awaits
    fn snapshot(&self) -> Vec<Arc<dyn AgentEventListener>> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AgentEventListener for ResponseStreamer {
    async fn on_tool_start(&self, id: &str, name: &str, input: &Value) {
        for listener in self.snapshot() {
            listener.on_tool_start(id, name, input).await;
        }
    }

    async fn on_tool_done(
        &self,
        id: &str,
        name: &str,
        result: std::result::Result<&str, &str>,
        duration_ms: u64,
    ) {
        for listener in self.snapshot() {
            listener.on_tool_done(id, name, result, duration_ms).await;
        }
    }

    async fn on_assistant_text(&self, text: &str) {
        for listener in self.snapshot() {
            listener.on_assistant_text(text).await;
        }
    }

    async fn on_complete(&self, answer: &str) {
        for listener in self.snapshot() {
            listener.on_complete(answer).await;
        }
    }

    async fn on_error(&self, error: &str) {
        for listener in self.snapshot() {
            listener.on_error(error).await;
        }
    }
}

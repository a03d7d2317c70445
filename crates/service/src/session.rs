//! One chat session: its status and the two message queues the bridge polls.

use std::time::Duration;

use retail_agents_agents::{MessageSink, Scenario};
use retail_agents_core::{ChatMessage, ChatStatus};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Handle shared between the HTTP handlers and the session's background task.
///
/// Outbound messages flow from the conversation to the polling client; inbound
/// replies flow from the client to the human-input relay. Both queues are FIFO
/// and unbounded.
pub struct ChatSession {
    id: Uuid,
    scenario: Scenario,
    status: RwLock<ChatStatus>,
    outbound_tx: UnboundedSender<ChatMessage>,
    outbound_rx: Mutex<UnboundedReceiver<ChatMessage>>,
    inbound_tx: UnboundedSender<String>,
    inbound_rx: Mutex<UnboundedReceiver<String>>,
}

impl ChatSession {
    /// A fresh session with empty queues and status `Chat ongoing`.
    #[must_use]
    pub fn new(scenario: Scenario) -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        Self {
            id: Uuid::new_v4(),
            scenario,
            status: RwLock::new(ChatStatus::Ongoing),
            outbound_tx,
            outbound_rx: Mutex::new(outbound_rx),
            inbound_tx,
            inbound_rx: Mutex::new(inbound_rx),
        }
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn scenario(&self) -> Scenario {
        self.scenario
    }

    pub async fn status(&self) -> ChatStatus {
        *self.status.read().await
    }

    pub async fn set_status(&self, status: ChatStatus) {
        let mut current = self.status.write().await;
        if *current != status {
            tracing::debug!(session = %self.id, from = %*current, to = %status, "chat status changed");
            *current = status;
        }
    }

    /// Next outbound message, or `None` when the queue is empty. Never waits.
    pub async fn pop_outbound(&self) -> Option<ChatMessage> {
        self.outbound_rx.lock().await.try_recv().ok()
    }

    /// Whether every outbound message has been delivered.
    pub async fn is_drained(&self) -> bool {
        self.outbound_rx.lock().await.is_empty()
    }

    /// Queue a human reply for the relay.
    pub fn push_inbound(&self, reply: String) {
        if self.inbound_tx.send(reply).is_err() {
            tracing::warn!(session = %self.id, "inbound queue closed, reply dropped");
        }
    }

    /// Wait up to `timeout` for the next human reply.
    pub async fn recv_inbound(&self, timeout: Duration) -> Option<String> {
        let mut inbound = self.inbound_rx.lock().await;
        tokio::time::timeout(timeout, inbound.recv()).await.ok().flatten()
    }
}

impl MessageSink for ChatSession {
    fn publish(&self, message: ChatMessage) {
        if self.outbound_tx.send(message).is_err() {
            tracing::warn!(session = %self.id, "outbound queue closed, message dropped");
        }
    }
}

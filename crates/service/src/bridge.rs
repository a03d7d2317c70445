//! The polling bridge: starts conversations in background tasks and moves
//! messages between them and HTTP clients.

use std::sync::Arc;
use std::time::Duration;

use retail_agents_agents::{
    ChatOutcome, ChatRuntime, GroupChat, MessageSink, RetailTools, Scenario,
};
use retail_agents_core::{ChatMessage, ChatStatus, HUMAN_INPUT_TIMEOUT_SECS};
use retail_agents_llm::ChatModel;
use retail_agents_storage::RetailStore;
use uuid::Uuid;

use crate::ServiceError;
use crate::registry::SessionRegistry;
use crate::relay::HumanInputRelay;
use crate::session::ChatSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartedChat {
    pub session_id: Uuid,
    pub status: ChatStatus,
}

/// Result of one poll: at most one message, always with the session status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolledMessage {
    pub message: Option<ChatMessage>,
    pub chat_status: ChatStatus,
}

pub struct ChatBridge<S> {
    store: Arc<S>,
    model: Arc<dyn ChatModel>,
    registry: SessionRegistry,
    input_timeout: Duration,
}

impl<S: RetailStore + 'static> ChatBridge<S> {
    #[must_use]
    pub fn new(store: Arc<S>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            store,
            model,
            registry: SessionRegistry::new(),
            input_timeout: Duration::from_secs(HUMAN_INPUT_TIMEOUT_SECS),
        }
    }

    /// How long a human turn waits for a reply before the chat ends.
    #[must_use]
    pub const fn with_input_timeout(mut self, timeout: Duration) -> Self {
        self.input_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Start a conversation for `message` in a new session.
    ///
    /// A previous session left in `error` is reset to `ended` first.
    pub async fn start_chat(&self, message: &str, scenario: Scenario) -> Result<StartedChat, ServiceError> {
        if message.trim().is_empty() {
            return Err(ServiceError::InvalidInput("message must not be empty".to_owned()));
        }

        if let Some(previous) = self.registry.current().await {
            if previous.status().await == ChatStatus::Error {
                previous.set_status(ChatStatus::Ended).await;
            }
        }
        let pruned = self.registry.prune_finished().await;
        if pruned > 0 {
            tracing::debug!(pruned, "dropped finished sessions");
        }

        let session = Arc::new(ChatSession::new(scenario));
        let started = StartedChat { session_id: session.id(), status: session.status().await };
        self.registry.insert(Arc::clone(&session)).await;
        tracing::info!(session = %started.session_id, %scenario, "chat started");

        self.spawn_conversation(session, message.to_owned());
        Ok(started)
    }

    /// Queue a human reply for the session. Returns the session id it went to.
    ///
    /// A reply sent before any chat was started is acknowledged and dropped;
    /// an unknown explicit `session_id` is still an error.
    pub async fn send_message(
        &self,
        session_id: Option<Uuid>,
        message: String,
    ) -> Result<Option<Uuid>, ServiceError> {
        let session = match self.registry.resolve(session_id).await {
            Ok(session) => session,
            Err(ServiceError::NoActiveSession) => {
                tracing::warn!("reply received before any chat was started, dropped");
                return Ok(None);
            },
            Err(e) => return Err(e),
        };
        session.push_inbound(message);
        Ok(Some(session.id()))
    }

    /// Take the next outbound message without waiting.
    ///
    /// Before any session exists this reports no message and status `ended`.
    pub async fn get_message(&self, session_id: Option<Uuid>) -> Result<PolledMessage, ServiceError> {
        let session = match self.registry.resolve(session_id).await {
            Ok(session) => session,
            Err(ServiceError::NoActiveSession) => {
                return Ok(PolledMessage { message: None, chat_status: ChatStatus::Ended });
            },
            Err(e) => return Err(e),
        };
        let message = session.pop_outbound().await;
        Ok(PolledMessage { message, chat_status: session.status().await })
    }

    fn spawn_conversation(&self, session: Arc<ChatSession>, message: String) {
        let store = Arc::clone(&self.store);
        let model = Arc::clone(&self.model);
        let timeout = self.input_timeout;

        tokio::spawn(async move {
            let task_session = Arc::clone(&session);
            let result =
                tokio::spawn(run_conversation(store, model, task_session, message, timeout)).await;
            match result {
                Ok(Ok(outcome)) => {
                    tracing::info!(
                        session = %session.id(),
                        reason = ?outcome.reason,
                        rounds = outcome.rounds,
                        "chat finished"
                    );
                    session.set_status(ChatStatus::Ended).await;
                },
                Ok(Err(e)) => fail_session(&session, &e.to_string()).await,
                Err(e) => fail_session(&session, &format!("conversation task aborted: {e}")).await,
            }
        });
    }
}

async fn run_conversation<S: RetailStore + 'static>(
    store: Arc<S>,
    model: Arc<dyn ChatModel>,
    session: Arc<ChatSession>,
    message: String,
    input_timeout: Duration,
) -> Result<ChatOutcome, ServiceError> {
    let scenario = session.scenario();
    let opening = scenario.opening_prompt(store.as_ref(), &message).await?;
    let runtime = ChatRuntime {
        model,
        tools: Arc::new(RetailTools::new(store)),
        human: Arc::new(HumanInputRelay::new(Arc::clone(&session), input_timeout)),
        sink: session,
    };
    Ok(GroupChat::new(scenario).run(&runtime, opening).await?)
}

async fn fail_session(session: &ChatSession, detail: &str) {
    tracing::error!(session = %session.id(), error = %detail, "chat failed");
    session.publish(ChatMessage::system(format!("An error occurred: {detail}")));
    session.set_status(ChatStatus::Error).await;
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;

//! Human-input relay: turns a user-proxy turn into a prompt on the outbound
//! queue and a bounded wait on the inbound queue.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use retail_agents_agents::{HumanInput, MessageSink};
use retail_agents_core::{ChatMessage, ChatStatus, EXIT_SENTINEL};

use crate::session::ChatSession;

pub struct HumanInputRelay {
    session: Arc<ChatSession>,
    timeout: Duration,
}

impl HumanInputRelay {
    #[must_use]
    pub const fn new(session: Arc<ChatSession>, timeout: Duration) -> Self {
        Self { session, timeout }
    }
}

#[async_trait]
impl HumanInput for HumanInputRelay {
    async fn get_human_input(&self, prompt: &str) -> String {
        self.session.publish(ChatMessage::system(prompt));
        self.session.set_status(ChatStatus::Inputting).await;

        if let Some(reply) = self.session.recv_inbound(self.timeout).await {
            self.session.set_status(ChatStatus::Ongoing).await;
            return reply;
        }

        tracing::info!(session = %self.session.id(), timeout = ?self.timeout, "no human reply, ending chat");
        self.session.set_status(ChatStatus::Ended).await;
        EXIT_SENTINEL.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use retail_agents_agents::Scenario;
    use retail_agents_core::{HUMAN_INPUT_PROMPT, SYSTEM_SPEAKER};

    use super::*;

    #[tokio::test]
    async fn test_reply_resumes_the_chat() {
        let session = Arc::new(ChatSession::new(Scenario::Retail));
        let relay = HumanInputRelay::new(Arc::clone(&session), Duration::from_secs(5));

        let waiter = tokio::spawn(async move { relay.get_human_input(HUMAN_INPUT_PROMPT).await });
        while session.status().await != ChatStatus::Inputting {
            tokio::task::yield_now().await;
        }
        session.push_inbound("size L please".to_owned());

        assert_eq!(waiter.await.unwrap(), "size L please");
        assert_eq!(session.status().await, ChatStatus::Ongoing);
        let prompt = session.pop_outbound().await.unwrap();
        assert_eq!(prompt.user, SYSTEM_SPEAKER);
        assert_eq!(prompt.message, HUMAN_INPUT_PROMPT);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_ends_the_chat_with_exit() {
        let session = Arc::new(ChatSession::new(Scenario::Retail));
        let relay = HumanInputRelay::new(Arc::clone(&session), Duration::from_secs(600));

        let reply = relay.get_human_input(HUMAN_INPUT_PROMPT).await;

        assert_eq!(reply, EXIT_SENTINEL);
        assert_eq!(session.status().await, ChatStatus::Ended);
    }
}

//! Response types (Serialize)

use retail_agents_core::{ChatMessage, ChatStatus, parse_json_content};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct StartChatResponse {
    pub status: ChatStatus,
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub status: &'static str,
}

/// Outbound record with JSON content decoded.
#[derive(Debug, Serialize)]
pub struct RelayedMessage {
    pub user: String,
    pub message: serde_json::Value,
}

impl From<ChatMessage> for RelayedMessage {
    fn from(message: ChatMessage) -> Self {
        Self { message: parse_json_content(&message.message), user: message.user }
    }
}

#[derive(Debug, Serialize)]
pub struct GetMessageResponse {
    pub message: Option<RelayedMessage>,
    pub chat_status: ChatStatus,
}

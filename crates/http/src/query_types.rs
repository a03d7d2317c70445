//! Request bodies and query strings (Deserialize)

use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct StartChatRequest {
    pub message: String,
    /// Scenario name; the retail scenario when absent.
    #[serde(default)]
    pub scenario: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
    /// Target session; the most recently started one when absent.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GetMessageQuery {
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

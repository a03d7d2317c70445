//! Typed error enum for the service layer.
//!
//! Unifies agent and storage failures with the session lookups the bridge
//! performs, so the HTTP layer can map each case to a status code.

use retail_agents_agents::AgentError;
use retail_agents_storage::StorageError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The conversation failed (model or tool database call).
    #[error("{0}")]
    Agent(#[from] AgentError),

    /// Storage operation failed outside a conversation turn (prompt context, schema).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// A request needed the current session but none was started yet.
    #[error("no chat session has been started")]
    NoActiveSession,

    /// Caller provided invalid input (empty opening message).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound(_) | Self::NoActiveSession)
    }
}

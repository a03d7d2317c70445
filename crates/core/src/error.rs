use thiserror::Error;

/// Errors raised while parsing core domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid chat status: {0}")]
    InvalidChatStatus(String),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

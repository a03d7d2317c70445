//! Typed error enum for the agent layer.

use retail_agents_llm::LlmError;
use retail_agents_storage::StorageError;
use thiserror::Error;

/// Failures that end a conversation.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Model call failed after retries.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// A tool's database call failed; the transaction was already rolled back.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
}

/// Problems with a tool call the model can correct; reported back to it as the tool result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolCallError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("tool {tool} is not available to {agent}")]
    NotPermitted { tool: String, agent: String },

    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

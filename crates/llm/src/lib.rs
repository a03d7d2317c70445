//! LLM client for the retail agents: chat completions with function calling
//! and image inputs against an OpenAI-compatible API.

pub mod ai_types;
mod client;
mod error;

#[cfg(test)]
mod retry_tests;
#[cfg(test)]
mod tests;

pub use ai_types::{
    AssistantMessage, ChatRequest, ContentPart, FunctionCall, FunctionDefinition, ImageUrl,
    Message, MessageContent, Role, ToolCall, ToolDefinition,
};
pub use client::{ChatModel, LlmClient, truncate};
pub use error::LlmError;

//! Multi-agent conversation engine for the retail assistant.
//!
//! A [`GroupChat`] alternates between the customer (through [`HumanInput`])
//! and a fixed set of [`AgentRole`]s chosen by the [`Scenario`]. Agents call
//! database [`Tool`]s through a [`ToolExecutor`]; every message is relayed to a
//! [`MessageSink`].

pub mod error;
mod group_chat;
mod role;
mod scenario;
mod tools;
mod vision;

#[cfg(test)]
mod test_support;

pub use error::{AgentError, ToolCallError};
pub use group_chat::{
    ChatOutcome, ChatRuntime, EndReason, GroupChat, HumanInput, MAX_TOOL_HOPS, MessageSink, Speaker,
    Turn, is_exit_reply,
};
pub use role::AgentRole;
pub use scenario::{Scenario, SpeakerSelection};
pub use tools::{RetailTools, Tool, ToolExecutor, ToolKind, ToolOutput};
pub use vision::{CAPTION_INSTRUCTION, ImageCaptioner, extract_image_urls, image_parts};

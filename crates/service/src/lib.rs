//! Service layer for retail-agents
//!
//! Owns chat sessions and their background conversations, and exposes the
//! start / send / poll operations the HTTP bridge and the CLI call.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]

mod bridge;
mod error;
mod registry;
mod relay;
mod session;

pub use bridge::{ChatBridge, PolledMessage, StartedChat};
pub use error::ServiceError;
pub use registry::SessionRegistry;
pub use relay::HumanInputRelay;
pub use session::ChatSession;

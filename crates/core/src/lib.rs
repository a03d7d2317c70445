//! Core types and constants for retail-agents
//!
//! Domain types shared by the storage, agent, service and HTTP crates.

mod chat;
mod constants;
mod env_config;
mod error;
mod json_utils;
mod prompt;
mod retail;

pub use chat::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use json_utils::*;
pub use prompt::*;
pub use retail::*;

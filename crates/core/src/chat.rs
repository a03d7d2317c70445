//! Chat bridge records: session status and relayed messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of one chat session as seen by the polling client.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChatStatus {
    /// No conversation is running.
    #[default]
    #[serde(rename = "ended")]
    Ended,
    /// The background conversation is producing messages.
    #[serde(rename = "Chat ongoing")]
    Ongoing,
    /// The conversation is blocked waiting for a human reply.
    #[serde(rename = "inputting")]
    Inputting,
    /// The conversation failed; detail was pushed as a system message.
    #[serde(rename = "error")]
    Error,
}

impl ChatStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ended => "ended",
            Self::Ongoing => "Chat ongoing",
            Self::Inputting => "inputting",
            Self::Error => "error",
        }
    }

    /// Whether a background task may still push messages in this state.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Ongoing | Self::Inputting)
    }
}

impl fmt::Display for ChatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ended" => Ok(Self::Ended),
            "chat ongoing" => Ok(Self::Ongoing),
            "inputting" => Ok(Self::Inputting),
            "error" => Ok(Self::Error),
            _ => Err(CoreError::InvalidChatStatus(s.to_owned())),
        }
    }
}

/// One outbound record: who spoke and what they said.
///
/// Field names match the polling client's `{user, message}` shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub user: String,
    pub message: String,
}

impl ChatMessage {
    #[must_use]
    pub fn new(user: impl Into<String>, message: impl Into<String>) -> Self {
        Self { user: user.into(), message: message.into() }
    }

    /// A message attributed to the bridge itself.
    #[must_use]
    pub fn system(message: impl Into<String>) -> Self {
        Self::new(crate::SYSTEM_SPEAKER, message)
    }
}

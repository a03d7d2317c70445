//! Failures talking to the chat-completions endpoint.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Connection, TLS or body-read failure.
    #[error("chat completion request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("chat completion endpoint returned HTTP {code}: {body}")]
    HttpStatus { code: u16, body: String },

    #[error("unreadable chat completion reply ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No choice, or a caption request answered without text.
    #[error("model reply had no usable content")]
    EmptyResponse,

    #[error("could not build HTTP client: {0}")]
    ClientInit(String),

    #[error("model unavailable after retries: {0}")]
    RetriesExhausted(Box<LlmError>),
}

impl LlmError {
    /// Whether the request may succeed if sent again.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatus { code, .. } => matches!(code, 408 | 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

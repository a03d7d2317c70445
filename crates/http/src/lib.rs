//! HTTP polling bridge for retail-agents.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use retail_agents_service::ChatBridge;
use retail_agents_storage::RetailStore;
use tower_http::cors::CorsLayer;

pub use query_types::{GetMessageQuery, SendMessageRequest, StartChatRequest};
pub use response_types::{GetMessageResponse, RelayedMessage, SendMessageResponse, StartChatResponse};

/// Shared application state for all HTTP handlers.
pub struct AppState<S> {
    pub bridge: ChatBridge<S>,
}

impl<S> AppState<S> {
    #[must_use]
    pub const fn new(bridge: ChatBridge<S>) -> Self {
        Self { bridge }
    }
}

pub fn create_router<S: RetailStore + 'static>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/start_chat", post(handlers::chat::start_chat::<S>))
        .route("/api/send_message", post(handlers::chat::send_message::<S>))
        .route("/api/get_message", get(handlers::chat::get_message::<S>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

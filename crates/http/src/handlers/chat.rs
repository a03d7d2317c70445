use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use retail_agents_agents::Scenario;
use retail_agents_core::MESSAGE_RECEIVED;
use retail_agents_storage::RetailStore;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{GetMessageQuery, SendMessageRequest, StartChatRequest};
use crate::response_types::{GetMessageResponse, SendMessageResponse, StartChatResponse};

pub async fn start_chat<S: RetailStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<StartChatRequest>,
) -> Result<Json<StartChatResponse>, ApiError> {
    let scenario = match req.scenario.as_deref() {
        Some(name) => name.parse::<Scenario>()?,
        None => Scenario::default(),
    };
    let started = state.bridge.start_chat(&req.message, scenario).await?;
    Ok(Json(StartChatResponse { status: started.status, session_id: started.session_id }))
}

pub async fn send_message<S: RetailStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    if let Some(session_id) = state.bridge.send_message(req.session_id, req.message).await? {
        tracing::debug!(session = %session_id, "human reply queued");
    }
    Ok(Json(SendMessageResponse { status: MESSAGE_RECEIVED }))
}

pub async fn get_message<S: RetailStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(query): Query<GetMessageQuery>,
) -> Result<Json<GetMessageResponse>, ApiError> {
    let polled = state.bridge.get_message(query.session_id).await?;
    Ok(Json(GetMessageResponse {
        message: polled.message.map(Into::into),
        chat_status: polled.chat_status,
    }))
}

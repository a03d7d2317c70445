use std::sync::Arc;

use anyhow::Result;
use retail_agents_core::AppConfig;
use retail_agents_http::{AppState, create_router};
use retail_agents_llm::LlmClient;
use retail_agents_service::ChatBridge;
use retail_agents_storage::PgStorage;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let config = AppConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    let storage = Arc::new(PgStorage::new(&config.database_url).await?);
    let llm = LlmClient::new(config.api_key.clone(), config.api_url.clone())?
        .with_model(config.model.clone());

    let bridge = ChatBridge::new(storage, Arc::new(llm)).with_input_timeout(config.input_timeout);
    let router = create_router(Arc::new(AppState::new(bridge)));

    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

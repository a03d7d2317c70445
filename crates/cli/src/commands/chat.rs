//! Terminal chat: the same group chat the HTTP bridge runs, with stdin as the
//! customer and stdout as the message sink.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use retail_agents_agents::{ChatRuntime, GroupChat, HumanInput, MessageSink, RetailTools, Scenario};
use retail_agents_core::{AppConfig, ChatMessage, EXIT_SENTINEL, SYSTEM_SPEAKER};
use retail_agents_llm::LlmClient;
use retail_agents_storage::PgStorage;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

struct StdinHuman {
    lines: Mutex<Lines<BufReader<Stdin>>>,
    timeout: Duration,
}

#[async_trait]
impl HumanInput for StdinHuman {
    async fn get_human_input(&self, prompt: &str) -> String {
        println!("\n{SYSTEM_SPEAKER}: {prompt}");
        let mut lines = self.lines.lock().await;
        match tokio::time::timeout(self.timeout, lines.next_line()).await {
            Ok(Ok(Some(line))) => line,
            Ok(Ok(None)) => EXIT_SENTINEL.to_owned(),
            Ok(Err(e)) => {
                tracing::warn!("Failed to read stdin: {e}");
                EXIT_SENTINEL.to_owned()
            },
            Err(_) => {
                tracing::info!("No reply within {:?}, ending chat", self.timeout);
                EXIT_SENTINEL.to_owned()
            },
        }
    }
}

struct StdoutSink;

impl MessageSink for StdoutSink {
    fn publish(&self, message: ChatMessage) {
        println!("\n{}:\n{}", message.user, message.message);
    }
}

pub(crate) async fn run(prompt: &str, scenario: Scenario) -> Result<()> {
    let config = AppConfig::from_env()?;
    let storage = Arc::new(PgStorage::new(&config.database_url).await?);
    let llm = LlmClient::new(config.api_key.clone(), config.api_url.clone())?
        .with_model(config.model.clone());

    let opening = scenario.opening_prompt(storage.as_ref(), prompt).await?;
    let runtime = ChatRuntime {
        model: Arc::new(llm),
        tools: Arc::new(RetailTools::new(storage)),
        human: Arc::new(StdinHuman {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            timeout: config.input_timeout,
        }),
        sink: Arc::new(StdoutSink),
    };

    let outcome = GroupChat::new(scenario).run(&runtime, opening).await?;
    tracing::info!(reason = ?outcome.reason, rounds = outcome.rounds, "chat ended");
    Ok(())
}

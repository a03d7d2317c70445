mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use retail_agents_agents::Scenario;
use retail_agents_core::{DATABASE_URL_VAR, DEFAULT_HTTP_PORT};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retail-agents")]
#[command(about = "Retail customer-service agents over Postgres", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP polling bridge.
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_HTTP_PORT)]
        port: u16,
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,
    },
    /// Chat in the terminal; replies are read from stdin.
    Chat {
        #[arg(short, long)]
        prompt: String,
        #[arg(short, long, default_value = "retail")]
        scenario: Scenario,
    },
    /// Print the table definitions the agents see.
    Schema,
    /// Create the retail tables if they do not exist.
    Migrate,
}

fn get_database_url() -> Result<String> {
    std::env::var(DATABASE_URL_VAR)
        .map_err(|_| anyhow::anyhow!("{DATABASE_URL_VAR} environment variable must be set"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Chat { prompt, scenario } => commands::chat::run(&prompt, scenario).await,
        Commands::Schema => commands::schema::run().await,
        Commands::Migrate => commands::migrate::run().await,
    }
}

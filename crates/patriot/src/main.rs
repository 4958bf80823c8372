//! Patriot - conversational cybersecurity research assistant.
//!
//! Starts an interactive session against a local Ollama instance, or
//! answers a single query with `--query` and exits.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use patriot::{Orchestrator, OllamaGateway, ToolRegistry};
use patriot_common::config::PatriotConfig;

#[derive(Parser)]
#[command(name = "patriot")]
#[command(about = "Patriot - AI assistant for cybersecurity research", long_about = None)]
#[command(version)]
struct Cli {
    /// Answer a single query and exit instead of starting a session
    #[arg(long)]
    query: Option<String>,

    /// Override the configured model name
    #[arg(long)]
    model: Option<String>,

    /// Override the configured Ollama endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Load configuration from this file instead of the default path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PatriotConfig::load_from(path)?,
        None => PatriotConfig::load(),
    };
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    if let Some(endpoint) = cli.endpoint {
        config.llm.endpoint = endpoint;
    }

    let backend = Arc::new(OllamaGateway::new(&config.llm));
    let registry = Arc::new(ToolRegistry::new(&config.agent));
    let orchestrator = Orchestrator::new(backend, registry, &config);

    match cli.query {
        Some(query) => {
            let result = orchestrator.process_query(&query).await?;
            println!("{}", result.answer);
            Ok(())
        }
        None => {
            patriot::banner::print_banner();
            patriot::repl::run(&orchestrator).await
        }
    }
}

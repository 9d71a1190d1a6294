// ABOUTME: Server binary for the FitForge plan generation API
// ABOUTME: Loads configuration, wires resources, and serves the HTTP API

//! # FitForge API Server Binary
//!
//! Starts the plan-generation HTTP service with database persistence and
//! the configured LLM provider.

use anyhow::Result;
use clap::Parser;
use fitforge_server::{
    config::ServerConfig,
    database_plugins::{factory::Database, DatabaseProvider},
    llm::{LlmProvider, OpenAiCompatibleProvider},
    logging,
    plans::PlanEngine,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "fitforge-server")]
#[command(about = "FitForge API - AI-assisted workout and nutrition plan generation")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting FitForge API server");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    database.migrate().await?;
    info!("Database ready (backend: {})", database.backend_name());

    let provider = OpenAiCompatibleProvider::from_config(&config.llm)
        .map_err(|e| anyhow::anyhow!("failed to initialize LLM provider: {e}"))?;
    info!(
        "LLM provider initialized: {} (model: {})",
        provider.display_name(),
        provider.default_model()
    );

    let engine = PlanEngine::new(Arc::new(provider));
    let resources = Arc::new(ServerResources::new(database, engine, config));

    server::run(resources).await
}

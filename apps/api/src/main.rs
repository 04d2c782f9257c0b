mod chairs;
mod config;
mod errors;
mod llm_client;
mod matching;
mod routes;
mod scraping;
mod state;
mod student;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Thesis API v{}", env!("CARGO_PKG_VERSION"));

    for dir in [
        &config.student_data_dir,
        &config.thesis_data_dir,
        &config.matching_results_dir,
    ] {
        tokio::fs::create_dir_all(dir).await?;
    }
    info!(
        "Data directories: students={}, theses={}, results={}",
        config.student_data_dir.display(),
        config.thesis_data_dir.display(),
        config.matching_results_dir.display()
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    info!(
        "Matching concurrency: {}, agent iteration limit: {}",
        config.match_concurrency, config.agent_max_iterations
    );

    let state = AppState::new(Arc::new(llm), config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

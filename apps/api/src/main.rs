mod auth;
mod config;
mod errors;
mod evaluation;
mod interview;
mod llm_client;
mod market;
mod models;
mod plan;
mod progress;
mod quiz;
mod resume;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::connect_store;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting career API v{}", env!("CARGO_PKG_VERSION"));

    // Optional PostgreSQL store; handlers fall back to mock paths without it
    let store = connect_store(config.database_url.as_deref()).await;

    if config.gemini_api_key.is_some() {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    } else {
        warn!("GEMINI_API_KEY not set. AI features will return fallback content.");
    }
    if config.debug_login.is_some() {
        warn!("Debug login credential is enabled");
    }

    // One HTTP client shared by the model and every market data integration
    let http = reqwest::Client::new();
    let state = AppState::new(config.clone(), store, http);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

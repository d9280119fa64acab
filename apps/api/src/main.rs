mod config;
mod errors;
mod export;
mod generation;
mod intake;
mod llm_client;
mod models;
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

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Autopilot API v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config.clone())?;
    match (&state.llm, &config.gemini_model) {
        (Some(_), Some(model)) => info!("LLM client initialized (pinned model: {model})"),
        (Some(_), None) => info!("LLM client initialized (model discovered on first call)"),
        (None, _) => warn!("GOOGLE_API_KEY not set; requests must supply their own API key"),
    }
    info!(
        "Package store capacity: {}, upload limit: {} bytes",
        config.package_store_capacity, config.max_upload_bytes
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

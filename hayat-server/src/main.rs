//! Hayat Ai Server
//!
//! HTTP facade over the generation client:
//! - Chat sessions with streamed replies (SSE) on /api/chat/*
//! - Watermarked image generation on /api/images
//! - Video generation with progress events (SSE) on /api/videos
//! - Single-file HTML apps on /api/apps
//! - Downloaded media on /api/artifacts/*
//!
//! Access via: http://localhost:8046

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod router;
mod server_utils;
mod state;

#[cfg(test)]
mod test_helpers;

use cli::Cli;
use hayat_client::{ClientConfig, GenerationClient};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Missing API_KEY is fatal: nothing is served without a backend credential.
    let config = ClientConfig::from_env().context("Startup configuration failed")?;
    info!(
        "🚀 Hayat Ai starting (chat: {}, image: {}, video: {})",
        config.models.chat, config.models.image, config.models.video
    );

    let client = GenerationClient::from_config(config).context("Failed to build generation client")?;
    let state = AppState::new(client);
    let app = router::build_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", cli.host, cli.port))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("🔌 API available at http://{}/api/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(server_utils::shutdown_signal())
        .await?;

    info!("👋 Server stopped");
    Ok(())
}

//! Maquette - Drag-and-Drop Page Builder Engine
//!
//! CLI entry point for the Maquette server.

#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use maquette_canvas::SessionManager;
use maquette_llm::{GeminiClient, GeminiConfig, GenerativeBackend};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod export;
mod server;
mod ws;

use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "maquette", about = "Drag-and-drop page builder engine")]
struct Cli {
    /// Path to a configuration file
    #[arg(long)]
    config: Option<String>,

    /// Override the bind address
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maquette=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        settings.server.host = host;
    }
    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    info!("Starting Maquette v{}", env!("CARGO_PKG_VERSION"));

    let backend = build_backend(&settings);
    let sessions = Arc::new(
        SessionManager::new()
            .with_max_sessions(settings.canvas.max_sessions)
            .with_max_idle_secs(settings.canvas.session_idle_secs),
    );
    let state = Arc::new(server::AppState::new(sessions, backend));

    server::run(settings, state).await
}

/// Build the Gemini backend when enabled and configured. A missing or
/// unusable credential only disables the AI export path; the server
/// always starts.
fn build_backend(settings: &Settings) -> Option<Arc<dyn GenerativeBackend>> {
    if !settings.ai.enabled {
        info!("AI export disabled by configuration");
        return None;
    }
    match GeminiConfig::from_env() {
        Ok(config) => match GeminiClient::new(config) {
            Ok(client) => {
                info!(model = client.model(), "Gemini export backend configured");
                Some(Arc::new(client))
            }
            Err(error) => {
                warn!(%error, "failed to build Gemini client, AI export disabled");
                None
            }
        },
        Err(_) => {
            warn!("GEMINI_API_KEY not set, exports will use local templates only");
            None
        }
    }
}

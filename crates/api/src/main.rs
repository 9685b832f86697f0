//! Studio API server binary.
//!
//! Usage:
//!   studio-api --config studio.toml
//!   studio-api --port 8080 --bind 0.0.0.0
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY` - API key for the triage agent's model
//! - `STUDIO_BIND_ADDR` - Server bind address (default: 127.0.0.1)
//! - `STUDIO_PORT` - Server port (default: 3000)
//! - `STUDIO_CORS_ORIGINS` - CORS allowed origins (comma-separated)
//!
//! A `.env` file in the working directory is loaded first if present.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use studio_api::{AppState, serve};
use studio_triage::StudioConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for the studio API server.
#[derive(Parser, Debug)]
#[command(name = "studio-api")]
#[command(about = "Generation studio API server - style triage endpoint")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and STUDIO_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Bind address (overrides config and STUDIO_BIND_ADDR)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,studio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            StudioConfig::from_file(path)?
        }
        None => {
            tracing::info!("Using default configuration");
            StudioConfig::default()
        }
    };
    config.apply_env_overrides()?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    config.validate()?;

    if config.server.bind == "0.0.0.0" {
        tracing::warn!(
            "Server binding to 0.0.0.0 - the triage endpoint will be reachable from all network interfaces."
        );
    }

    if config.llm.provider == "openai" && config.llm.resolve_api_key().is_none() {
        tracing::warn!(
            "OPENAI_API_KEY not set - triage requests will fail until a key is configured."
        );
    }

    let state = AppState::from_config(&config)?;
    tracing::info!(
        model = %state.dispatcher.model_name(),
        custom_default_instructions = config.triage.default_instructions.is_some(),
        "Triage dispatcher ready"
    );

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;
    serve(Arc::new(state), addr, &config.server.cors_origins).await?;

    Ok(())
}

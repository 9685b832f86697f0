//! HTTP API for the generation studio.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /api/agent` - Triage a message to a style agent
//! - `GET /api/agent` - Triage endpoint descriptor
//! - `POST /api/script-agent` - Acknowledge a script instruction
//! - `GET /api/catalog` - Models and default system prompts per generation type
//!
//! # Architecture
//!
//! ```text
//! Studio UI / Orchestrator
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   API Server    │ ◄── This crate
//! │     (Axum)      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌─────────────────┐
//! │TriageDispatcher │ ───► │   AgentRunner   │ ───► LLM provider
//! └─────────────────┘      └─────────────────┘
//! ```

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::ApiError;
pub use state::AppState;

/// Create the API router with all routes configured.
///
/// An empty `cors_origins` list, or one containing `"*"`, allows any origin.
pub fn create_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let body_limit = state.body_limit_bytes;

    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/api/agent",
            post(routes::triage).get(routes::describe_triage),
        )
        .route("/api/script-agent", post(routes::script_agent))
        .route("/api/catalog", get(routes::model_catalog))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(parsed))
}

/// Start the API server on the given address and run until Ctrl-C.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr, cors_origins: &[String]) -> anyhow::Result<()> {
    let router = create_router(state, cors_origins);

    info!(%addr, "Starting studio API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Studio API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

mod analysis;
mod config;
mod errors;
mod extract;
mod inference;
mod models;
mod routes;
mod state;

use anyhow::Result;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{AnalysisMode, Config};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on bad env vars)
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

    info!(
        "Starting Resume Analyzer API v{} (mode: {:?})",
        env!("CARGO_PKG_VERSION"),
        config.analysis_mode
    );
    if config.analysis_mode == AnalysisMode::Feedback {
        info!("Inference client initialized");
    }

    let cors = build_cors_layer(&config)?;
    let port = config.port;

    let state = AppState::new(config);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Allows exactly the configured origin, or any origin when none is set.
fn build_cors_layer(config: &Config) -> Result<CorsLayer> {
    let layer = match &config.allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]),
        None => CorsLayer::permissive(),
    };
    Ok(layer)
}

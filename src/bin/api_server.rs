// API Server Binary Entry Point
//
// Usage: cargo run --features api --bin api_server

use ecotrack_engine::{create_router, AppState, CleaningRules, EmissionFactors, StaticTipSource};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default log level: info for our crate, warn for others
                "ecotrack_engine=info,tower_http=debug,axum=debug,warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables; compiled-in defaults apply
    // when a path is not set.
    let factors = match std::env::var("FACTORS_PATH") {
        Ok(path) => EmissionFactors::load(Path::new(&path))?,
        Err(_) => EmissionFactors::default(),
    };

    let rules = match std::env::var("RULES_PATH") {
        Ok(path) => CleaningRules::load(Path::new(&path))?,
        Err(_) => CleaningRules::default(),
    };

    let tip_source = match std::env::var("TIPS_PATH") {
        Ok(path) => StaticTipSource::load(Path::new(&path))?,
        Err(_) => StaticTipSource::default(),
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(10000);

    tracing::info!("Configuration:");
    tracing::info!("  FACTORS_PATH: {}", std::env::var("FACTORS_PATH").unwrap_or_else(|_| "<default>".to_string()));
    tracing::info!("  RULES_PATH: {}", std::env::var("RULES_PATH").unwrap_or_else(|_| "<default>".to_string()));
    tracing::info!("  TIPS_PATH: {}", std::env::var("TIPS_PATH").unwrap_or_else(|_| "<default>".to_string()));
    tracing::info!("  PORT: {}", port);

    let state = AppState::new(factors, rules, Arc::new(tip_source));

    // Create router with all endpoints and middleware
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

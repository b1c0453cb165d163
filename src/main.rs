// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Journey Planner API Server
//!
//! Local backend for the journey planner app: saved places, swipe votes,
//! geocoded journey maps and destination lookups.

use journey_planner::{config::Config, db::LocalStore, services::MapsProvider, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Journey Planner API");

    // Open the local document store
    let store = LocalStore::open(&config.data_dir).await?;

    // One provider for places, geocoding and directions; the HTTP client
    // is created on first use
    let maps = Arc::new(MapsProvider::new(&config));
    tracing::info!("Google Maps provider configured");

    let state = Arc::new(AppState::new(
        config.clone(),
        store,
        maps.clone(),
        maps.clone(),
        maps,
    ));

    // Build router
    let app = journey_planner::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("journey_planner=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}

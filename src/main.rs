// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker API Server
//!
//! Logs runs and rides placed on a map and keeps them across restarts.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_tracker::{
    config::Config,
    db::{FileStore, KeyValueStore, MemoryStore},
    services::{FixedPosition, HeadlessMapProvider, Tracker, TrackerDeps},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Workout Tracker API");

    // Open workout storage
    let store: Arc<dyn KeyValueStore> = match &config.storage_dir {
        Some(dir) => Arc::new(FileStore::open(dir)?),
        None => {
            tracing::warn!("STORAGE_DIR not set, workouts are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let deps = TrackerDeps {
        store,
        map_provider: Arc::new(HeadlessMapProvider),
        geolocation: Arc::new(FixedPosition::new(config.home_position)),
        map_settings: config.map.clone(),
    };
    let tracker = Tracker::start(deps);
    tracing::info!(
        workouts = tracker.workouts().len(),
        map_loaded = tracker.is_map_loaded(),
        "Tracker started"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        tracker: Mutex::new(tracker),
    });

    // Build router
    let app = workout_tracker::routes::create_router(state);

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

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("workout_tracker=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}

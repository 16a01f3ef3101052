// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! CodeDIY API Server
//!
//! Finds repair videos for a vehicle and a diagnostic trouble code and keeps
//! each user's vehicles and search history in Firestore.

use codediy::{config::Config, db::FirestoreDb, services::YouTubeClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting CodeDIY API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    let youtube = YouTubeClient::with_base_url(
        config.youtube_api_key.clone(),
        config.youtube_api_base_url.clone(),
    );
    tracing::info!(
        base_url = %config.youtube_api_base_url,
        max_results = config.search_max_results,
        "YouTube client initialized"
    );

    // Build shared state
    let port = config.port;
    let state = Arc::new(AppState::new(config, Arc::new(db), Arc::new(youtube)));

    // Build router
    let app = codediy::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("codediy=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}

//! Promo Door - Main Application Entry Point
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create the database connection pool
//! 3. Build the HTTP router with routes and middleware
//! 4. Start the server on the configured port

use std::sync::Arc;

use promo_door::{AppState, config::Config, db, startup::build_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    if config.admin_secret().is_none() {
        tracing::warn!("ADMIN_PASSWORD is not set; /admin will answer 500");
    }
    if config.door_secret().is_none() {
        tracing::warn!("DOOR_API_KEY is not set; the door-check relay will answer 500");
    }

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    let store = Arc::new(db::PgStore::new(pool));
    let addr = format!("0.0.0.0:{}", config.server_port);

    let state = AppState::new(config, store.clone(), store, reqwest::Client::new());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

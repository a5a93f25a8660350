//! SmartFin Server - Main Application Entry Point
//!
//! REST API backend for a personal finance tracker. Users register and log in
//! with a username and password, receive a short-lived bearer token, and record
//! BUY/SELL trades whose amounts are computed server-side in exact decimals.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: bcrypt password hashes, HS256 signed bearer tokens
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Wire stores and services into shared state
//! 5. Build HTTP router and start server on configured port

mod config;
mod db;
mod error;
mod extract;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod router;
mod services;
mod state;

use std::sync::Arc;

use chrono::Duration;
use tracing_subscriber::EnvFilter;

use crate::{
    repositories::{PgTransactionStore, PgUserStore},
    services::token_service::TokenService,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads RUST_LOG (defaults to "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let tokens = TokenService::new(
        config.jwt_secret.as_bytes(),
        Duration::minutes(config.token_expiry_minutes),
        config.token_issuer.clone(),
    );

    let state = AppState::new(
        Arc::new(PgUserStore::new(pool.clone())),
        Arc::new(PgTransactionStore::new(pool)),
        tokens,
        config.bcrypt_cost,
    );

    let app = router::build_router(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

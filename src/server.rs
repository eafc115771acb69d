//! HTTP server initialization and runtime setup.
//!
//! Handles record store selection, background tasks, and Axum server lifecycle.

use crate::config::{Config, StoreBackend};
use crate::domain::rendering::ImageRenderer;
use crate::domain::repositories::RecordStore;
use crate::infrastructure::persistence::{
    MemoryRecordStore, PgRecordStore, RedisRecordStore, spawn_expiry_sweeper,
};
use crate::infrastructure::rendering::QrPngRenderer;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured record store (PostgreSQL, Redis or in-memory)
/// - The expiry sweeper (PostgreSQL only)
/// - QR code renderer
/// - Axum HTTP server, stopped gracefully on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The store connection or schema setup fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;
    let renderer: Arc<dyn ImageRenderer> = Arc::new(QrPngRenderer::new());

    let state = AppState::new(store, renderer, config.service_settings());

    let router = app_router(state, config.rate_limit, config.behind_proxy)?;
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Builds the record store selected by `config.store_backend`.
///
/// # Errors
///
/// Returns an error if the backend is unreachable.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn RecordStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let store = Arc::new(connect_postgres(config).await?);

            spawn_expiry_sweeper(
                store.clone(),
                Duration::from_secs(config.expiry_sweep_interval_seconds),
            );
            tracing::info!("Expiry sweeper started");

            Ok(store)
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("Redis store selected without a Redis URL")?;

            let store = RedisRecordStore::connect(url, &config.table_name)
                .await
                .context("Failed to connect to Redis")?;

            Ok(Arc::new(store))
        }
        StoreBackend::Memory => Ok(Arc::new(MemoryRecordStore::new())),
    }
}

/// Opens the PostgreSQL pool and creates the record table if needed.
///
/// # Errors
///
/// Returns an error if the connection or schema setup fails.
pub async fn connect_postgres(config: &Config) -> Result<PgRecordStore> {
    let url = config
        .database_url
        .as_deref()
        .context("PostgreSQL store selected without a database URL")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    let store = PgRecordStore::new(Arc::new(pool), &config.table_name);
    store
        .ensure_schema()
        .await
        .context("Failed to create record table")?;

    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}

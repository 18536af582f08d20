use std::sync::Arc;

use anyhow::Context;
use catalog_service::{build_router, config::load_config, pg_store, AppState};
use common_observability::CatalogMetrics;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let db = pg_store::connect(&config)
        .await
        .context("Failed to connect to DATABASE_URL")?;
    // Ensure database schema is up to date before serving traffic
    pg_store::MIGRATOR
        .run(&db)
        .await
        .context("Failed to run catalog migrations")?;

    let metrics = Arc::new(CatalogMetrics::new().context("Failed to register metrics")?);
    let app = build_router(AppState::postgres(db, metrics));

    let addr = config.socket_addr();
    info!(%addr, "starting catalog-service");
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

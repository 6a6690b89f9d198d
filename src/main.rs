//! Process entry point: tracing, config, store, one-time legacy import,
//! then the HTTP server.

use anyhow::Result;
use spoolq::config::AppConfig;
use spoolq::core::service::{OrderService, OrderStore};
use spoolq::migrate;
use spoolq::server::{AppState, build_router};
use spoolq::storage::LmdbOrderStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("spoolq=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    std::fs::create_dir_all(&config.data_dir)?;

    let store: Arc<dyn OrderStore> = Arc::new(LmdbOrderStore::open(config.lmdb_path())?);

    // One-time bootstrap, guarded and best-effort; never blocks startup.
    migrate::run(store.as_ref(), &config.legacy_orders_path()).await;

    let service = Arc::new(OrderService::new(store));
    let app = build_router(AppState { service });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "print queue server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

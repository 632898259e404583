mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use unmutte_api::state::AppStateInner;
use unmutte_crypto::{AesGcmSealer, ReversePlaceholder, Sealer};
use unmutte_db::{DocumentStore, SqliteStore, UnavailableStore};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unmutte=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // A missing or broken database degrades requests, it does not stop startup
    let store: Arc<dyn DocumentStore> = match config.sqlite_path() {
        Some(path) => match SqliteStore::open(&path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!("Store at {} unavailable, continuing without it: {}", path.display(), e);
                Arc::new(UnavailableStore)
            }
        },
        None => {
            warn!("DATABASE_URL not set, running without a database");
            Arc::new(UnavailableStore)
        }
    };

    let sealer: Arc<dyn Sealer> = match config.message_key {
        Some(key) => Arc::new(AesGcmSealer::new(key)),
        None => Arc::new(ReversePlaceholder),
    };
    info!("Chat messages sealed with {}", sealer.kind());

    let state = AppStateInner::new(store, sealer, config.env_flags());
    let app = unmutte_api::router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Unmutte server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}

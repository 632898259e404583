use std::sync::Arc;

use tracing::error;
use unmutte_crypto::Sealer;
use unmutte_db::{DocumentStore, StoreResult};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: Arc<dyn DocumentStore>,
    pub sealer: Arc<dyn Sealer>,
    pub env: EnvFlags,
}

/// Presence of the database variables, reported by `GET /test`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvFlags {
    pub database_url: bool,
    pub database_name: bool,
}

impl AppStateInner {
    pub fn new(store: Arc<dyn DocumentStore>, sealer: Arc<dyn Sealer>, env: EnvFlags) -> AppState {
        Arc::new(Self { store, sealer, env })
    }

    /// Run a blocking store call off the async runtime.
    pub async fn with_store<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn DocumentStore) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                ApiError::Internal(e.to_string())
            })?
            .map_err(ApiError::from)
    }
}

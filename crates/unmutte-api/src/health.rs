use axum::{Json, extract::State};
use unmutte_db::StoreError;
use unmutte_types::api::{DiagnosticsReport, RootResponse};

use crate::error::ApiError;
use crate::state::AppState;

const MAX_LISTED_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 80;

/// GET / — liveness marker.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Unmutte backend running".into(),
    })
}

/// GET /test — env flag presence plus a store round trip.
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let listed = state
        .with_store(|store| store.list_collections(MAX_LISTED_COLLECTIONS))
        .await;

    let (database, connection_status, collections) = match listed {
        Ok(collections) => ("✅ Connected & Working".to_string(), "Connected", collections),
        Err(ApiError::Store(StoreError::Unavailable(_))) => (
            "⚠️ Available but not initialized".to_string(),
            "Not Connected",
            vec![],
        ),
        Err(ApiError::Store(StoreError::Operation(msg))) => (
            format!("⚠️ Connected but Error: {}", truncate(&msg)),
            "Connected",
            vec![],
        ),
        Err(e) => (
            format!("❌ Error: {}", truncate(&e.to_string())),
            "Not Connected",
            vec![],
        ),
    };

    Json(DiagnosticsReport {
        backend: "✅ Running".into(),
        database,
        database_url: presence(state.env.database_url),
        database_name: presence(state.env.database_name),
        connection_status: connection_status.into(),
        collections,
    })
}

fn presence(set: bool) -> String {
    let marker = if set { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}

fn truncate(msg: &str) -> String {
    msg.chars().take(MAX_ERROR_CHARS).collect()
}

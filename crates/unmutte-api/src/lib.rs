pub mod chat;
pub mod community;
pub mod error;
pub mod extract;
pub mod health;
pub mod premium;
pub mod state;
pub mod wellness;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// All routes, open CORS, request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/test", get(health::diagnostics))
        .route("/api/chat", post(chat::chat))
        .route("/api/community/post", post(community::create_post))
        .route("/api/community/feed", get(community::feed))
        .route("/api/community/reply", post(community::add_reply))
        .route("/api/community/report", post(community::report_item))
        .route("/api/wellness/mood", post(wellness::add_mood))
        .route("/api/wellness/mood/{session_id}", get(wellness::get_moods))
        .route("/api/premium/disclaimer", get(premium::disclaimer))
        .route("/api/premium/request", post(premium::request_listener))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

use axum::{Json, extract::State};
use unmutte_types::api::{CounselorQueued, CounselorRequestBody, DisclaimerResponse};
use unmutte_types::models::{CounselorRequestDoc, CounselorStatus};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

pub const DISCLAIMER: &str = "Unmutte's human listeners are trained emotional support peers, \
    not licensed clinical therapists unless explicitly stated. They offer compassionate \
    listening, not medical advice. In an emergency, contact local services immediately.";

/// GET /api/premium/disclaimer
pub async fn disclaimer() -> Json<DisclaimerResponse> {
    Json(DisclaimerResponse {
        disclaimer: DISCLAIMER.to_string(),
    })
}

/// POST /api/premium/request — queue a request for a human listener.
pub async fn request_listener(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CounselorRequestBody>,
) -> Result<Json<CounselorQueued>, ApiError> {
    let request = CounselorRequestDoc {
        session_id: req.session_id.unwrap_or_default(),
        topic: req.topic,
        status: CounselorStatus::Queued,
    };

    let id = state
        .with_store(move |store| unmutte_db::insert(store, &request))
        .await?;

    Ok(Json(CounselorQueued {
        id,
        status: CounselorStatus::Queued,
    }))
}

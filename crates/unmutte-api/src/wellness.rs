use axum::{
    Json,
    extract::{Path, State},
};
use unmutte_db::Filter;
use unmutte_types::api::{ItemsResponse, MoodRecorded, MoodRequest};
use unmutte_types::models::{Collection, MoodEntryDoc};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

const MOOD_HISTORY_LIMIT: usize = 100;

/// POST /api/wellness/mood — mood outside 1..=5 never reaches here.
pub async fn add_mood(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<MoodRequest>,
) -> Result<Json<MoodRecorded>, ApiError> {
    let entry = MoodEntryDoc {
        session_id: req.session_id.unwrap_or_default(),
        mood: req.mood.unwrap_or_default(),
        note: req.note,
    };

    let id = state
        .with_store(move |store| unmutte_db::insert(store, &entry))
        .await?;

    Ok(Json(MoodRecorded { id }))
}

/// GET /api/wellness/mood/{session_id}
///
/// Anyone who knows a session id can read its history.
pub async fn get_moods(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let items = state
        .with_store(move |store| {
            let filter = Filter::new().eq("session_id", session_id);
            store.get_documents(Collection::MoodEntry, &filter, MOOD_HISTORY_LIMIT)
        })
        .await?;

    Ok(Json(ItemsResponse { items }))
}

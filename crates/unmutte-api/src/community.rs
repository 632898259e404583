use axum::{Json, extract::State};
use rand::Rng;
use tracing::info;
use unmutte_db::Filter;
use unmutte_types::api::{
    ItemsResponse, ModeratedCreated, NewPostRequest, NewReplyRequest, ReportQueued, ReportRequest,
};
use unmutte_types::models::{Collection, ModerationStatus, PostDoc, ReplyDoc, ReportDoc};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

const FEED_LIMIT: usize = 50;

/// Anonymous handle, `Ally-100` through `Ally-999`.
pub fn make_alias() -> String {
    format!("Ally-{}", rand::rng().random_range(100..=999))
}

fn avatar_seed() -> String {
    rand::rng().random_range(1..=9999).to_string()
}

/// POST /api/community/post — new posts wait for moderation.
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewPostRequest>,
) -> Result<Json<ModeratedCreated>, ApiError> {
    let post = PostDoc {
        alias: make_alias(),
        avatar_seed: avatar_seed(),
        content: req.content.unwrap_or_default(),
        status: ModerationStatus::Pending,
        reports: 0,
    };

    let id = state
        .with_store(move |store| unmutte_db::insert(store, &post))
        .await?;
    info!(post_id = %id, "Post queued for moderation");

    Ok(Json(ModeratedCreated {
        id,
        status: ModerationStatus::Pending,
    }))
}

/// GET /api/community/feed — published posts only.
pub async fn feed(State(state): State<AppState>) -> Result<Json<ItemsResponse>, ApiError> {
    let items = state
        .with_store(|store| {
            let filter = Filter::new().eq("status", ModerationStatus::Published.as_str());
            store.get_documents(Collection::Post, &filter, FEED_LIMIT)
        })
        .await?;

    Ok(Json(ItemsResponse { items }))
}

/// POST /api/community/reply — the parent post is not checked to exist.
pub async fn add_reply(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewReplyRequest>,
) -> Result<Json<ModeratedCreated>, ApiError> {
    let reply = ReplyDoc {
        post_id: req.post_id.unwrap_or_default(),
        alias: make_alias(),
        content: req.content.unwrap_or_default(),
        status: ModerationStatus::Pending,
    };

    let id = state
        .with_store(move |store| unmutte_db::insert(store, &reply))
        .await?;

    Ok(Json(ModeratedCreated {
        id,
        status: ModerationStatus::Pending,
    }))
}

/// POST /api/community/report
pub async fn report_item(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ReportRequest>,
) -> Result<Json<ReportQueued>, ApiError> {
    let target_type = req.target_type.unwrap_or_default();
    let report = ReportDoc {
        target_type: target_type.clone(),
        target_id: req.target_id.unwrap_or_default(),
        reason: req.reason,
    };

    let id = state
        .with_store(move |store| unmutte_db::insert(store, &report))
        .await?;
    info!(report_id = %id, target_type = %target_type, "Report queued");

    Ok(Json(ReportQueued { id, queued: true }))
}

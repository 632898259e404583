use axum::{Json, extract::State};
use tracing::{debug, warn};
use unmutte_responder::{estimate_intensity, generate_reply, suggest_break};
use unmutte_types::api::{ChatRequest, ChatResponse};
use unmutte_types::models::{MessageDoc, Role};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

const DEFAULT_LANG: &str = "en";

/// POST /api/chat — canned reply plus intensity.
///
/// Persisting the turn is best effort: a store failure is logged and the
/// reply is still returned.
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ChatRequest>,
) -> Json<ChatResponse> {
    let session_id = req.session_id.unwrap_or_default();
    let text = req.text.unwrap_or_default();
    // Empty counts as unset
    let lang = req
        .lang
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| DEFAULT_LANG.to_string());
    let intensity = estimate_intensity(&text);
    let reply = generate_reply(&text, &lang);

    match persist_turn(&state, &session_id, &text, &reply, intensity, &lang).await {
        Ok(()) => debug!(session_id = %session_id, "Chat turn stored"),
        Err(e) => warn!(session_id = %session_id, "Chat turn not stored, continuing: {}", e),
    }

    Json(ChatResponse {
        reply,
        intensity,
        lang,
        suggest_break: suggest_break(intensity),
    })
}

/// Store the user text and the reply as two sealed messages. Stops at the
/// first failure.
async fn persist_turn(
    state: &AppState,
    session_id: &str,
    text: &str,
    reply: &str,
    intensity: f64,
    lang: &str,
) -> Result<(), ApiError> {
    let user = sealed_message(state, session_id, Role::User, text, intensity, lang)?;
    let assistant = sealed_message(state, session_id, Role::Assistant, reply, intensity, lang)?;

    state
        .with_store(move |store| {
            unmutte_db::insert(store, &user)?;
            unmutte_db::insert(store, &assistant)?;
            Ok(())
        })
        .await
}

fn sealed_message(
    state: &AppState,
    session_id: &str,
    role: Role,
    content: &str,
    intensity: f64,
    lang: &str,
) -> Result<MessageDoc, ApiError> {
    let sealed = state
        .sealer
        .seal(content)
        .map_err(|e| ApiError::Internal(format!("seal failed: {}", e)))?;

    Ok(MessageDoc {
        session_id: session_id.to_string(),
        role,
        text: String::new(),
        ciphertext: sealed.ciphertext,
        nonce: sealed.nonce,
        intensity,
        lang: lang.to_string(),
    })
}

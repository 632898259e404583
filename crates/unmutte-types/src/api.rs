use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::{CounselorStatus, ModerationStatus};

fn default_lang() -> Option<String> {
    Some("en".to_string())
}

// -- Service --

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Output of `GET /test`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

// -- Chat --

// Required request fields are `Option` + `#[validate(required)]` so a body
// missing several of them is rejected with one entry per field. Handlers
// only see values that passed validation.

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(required)]
    pub session_id: Option<String>,
    #[validate(required)]
    pub text: Option<String>,
    #[serde(default = "default_lang")]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub intensity: f64,
    pub lang: String,
    pub suggest_break: bool,
}

// -- Community --

#[derive(Debug, Deserialize, Validate)]
pub struct NewPostRequest {
    #[validate(required)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewReplyRequest {
    #[validate(required)]
    pub post_id: Option<String>,
    #[validate(required)]
    pub content: Option<String>,
}

/// Shared by posts and replies, both created pending.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModeratedCreated {
    pub id: String,
    pub status: ModerationStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReportRequest {
    #[validate(required)]
    pub target_type: Option<String>,
    #[validate(required)]
    pub target_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportQueued {
    pub id: String,
    pub queued: bool,
}

/// List envelope. Items are returned as stored documents.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Value>,
}

// -- Wellness --

#[derive(Debug, Deserialize, Validate)]
pub struct MoodRequest {
    #[validate(required)]
    pub session_id: Option<String>,
    #[validate(required, range(min = 1, max = 5))]
    pub mood: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoodRecorded {
    pub id: String,
}

// -- Premium --

#[derive(Debug, Serialize, Deserialize)]
pub struct DisclaimerResponse {
    pub disclaimer: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CounselorRequestBody {
    #[validate(required)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CounselorQueued {
    pub id: String,
    pub status: CounselorStatus,
}

// -- Errors --

/// One entry of a validation failure body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody<T> {
    pub detail: T,
}

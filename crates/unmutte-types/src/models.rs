use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Document collections. The name is what the store keys documents by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Message,
    Post,
    Reply,
    Report,
    MoodEntry,
    CounselorRequest,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Message,
        Collection::Post,
        Collection::Reply,
        Collection::Report,
        Collection::MoodEntry,
        Collection::CounselorRequest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Post => "post",
            Self::Reply => "reply",
            Self::Report => "report",
            Self::MoodEntry => "moodentry",
            Self::CounselorRequest => "counselorrequest",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Moderation state shared by posts and replies. Only `Pending` is ever
/// written by this service; the other states are set by external tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Published,
    Removed,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Published => "published",
            Self::Removed => "removed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounselorStatus {
    Queued,
    Connected,
    Closed,
}

// -- Stored documents --

/// A value persisted as a flat document in a fixed collection.
pub trait Document: Serialize {
    const COLLECTION: Collection;

    /// Serialize into the field map handed to the store.
    fn fields(&self) -> serde_json::Result<Map<String, Value>> {
        serde_json::from_value(serde_json::to_value(self)?)
    }
}

/// One chat turn. `text` is always empty; the content lives in `ciphertext`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDoc {
    pub session_id: String,
    pub role: Role,
    pub text: String,
    pub ciphertext: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
    pub intensity: f64,
    pub lang: String,
}

impl Document for MessageDoc {
    const COLLECTION: Collection = Collection::Message;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDoc {
    pub alias: String,
    pub avatar_seed: String,
    pub content: String,
    pub status: ModerationStatus,
    pub reports: u32,
}

impl Document for PostDoc {
    const COLLECTION: Collection = Collection::Post;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyDoc {
    pub post_id: String,
    pub alias: String,
    pub content: String,
    pub status: ModerationStatus,
}

impl Document for ReplyDoc {
    const COLLECTION: Collection = Collection::Reply;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDoc {
    pub target_type: String,
    pub target_id: String,
    pub reason: Option<String>,
}

impl Document for ReportDoc {
    const COLLECTION: Collection = Collection::Report;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntryDoc {
    pub session_id: String,
    pub mood: i64,
    pub note: Option<String>,
}

impl Document for MoodEntryDoc {
    const COLLECTION: Collection = Collection::MoodEntry;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounselorRequestDoc {
    pub session_id: String,
    pub topic: Option<String>,
    pub status: CounselorStatus,
}

impl Document for CounselorRequestDoc {
    const COLLECTION: Collection = Collection::CounselorRequest;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_are_lowercase_entity_names() {
        let names: Vec<&str> = Collection::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            ["message", "post", "reply", "report", "moodentry", "counselorrequest"]
        );
    }

    #[test]
    fn post_fields_carry_lowercase_status() {
        let post = PostDoc {
            alias: "Ally-123".into(),
            avatar_seed: "42".into(),
            content: "hello".into(),
            status: ModerationStatus::Pending,
            reports: 0,
        };
        let fields = post.fields().unwrap();
        assert_eq!(fields["status"], "pending");
        assert_eq!(fields["reports"], 0);
    }

    #[test]
    fn message_omits_nonce_when_unsealed() {
        let msg = MessageDoc {
            session_id: "s1".into(),
            role: Role::Assistant,
            text: String::new(),
            ciphertext: "enc::olleh".into(),
            nonce: None,
            intensity: 0.25,
            lang: "en".into(),
        };
        let fields = msg.fields().unwrap();
        assert!(!fields.contains_key("nonce"));
        assert_eq!(fields["role"], "assistant");
        assert_eq!(fields["text"], "");
    }
}

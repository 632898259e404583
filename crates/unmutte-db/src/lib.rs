pub mod memory;
pub mod migrations;
pub mod sqlite;

use serde_json::{Map, Value};
use thiserror::Error;
use unmutte_types::models::{Collection, Document};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No database is configured or reachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The database answered but the operation failed.
    #[error("store operation failed: {0}")]
    Operation(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Operation(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Operation(format!("bad document: {}", err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Flat document collections keyed by `Collection`.
///
/// Calls may block; async callers run them on `spawn_blocking`.
pub trait DocumentStore: Send + Sync {
    /// Store `fields` as a new document and return its id. The store adds
    /// `created_at` and `updated_at`.
    fn create_document(&self, collection: Collection, fields: Map<String, Value>)
    -> StoreResult<String>;

    /// Documents matching every equality in `filter`, oldest first, at most
    /// `limit`. Each carries its `id`.
    fn get_documents(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Value>>;

    /// Names of non-empty collections, sorted, at most `limit`.
    fn list_collections(&self, limit: usize) -> StoreResult<Vec<String>>;
}

/// Serialize a typed document into its collection.
pub fn insert<D: Document>(store: &dyn DocumentStore, doc: &D) -> StoreResult<String> {
    store.create_document(D::COLLECTION, doc.fields()?)
}

/// Conjunction of field equalities.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    fields: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.push((field.to_string(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn matches(&self, doc: &Map<String, Value>) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field).unwrap_or(&Value::Null) == expected)
    }
}

/// Stand-in used when no database is configured. Every call fails with
/// `StoreError::Unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl DocumentStore for UnavailableStore {
    fn create_document(&self, collection: Collection, _: Map<String, Value>) -> StoreResult<String> {
        Err(StoreError::Unavailable(format!(
            "cannot write to '{}': database not initialized",
            collection
        )))
    }

    fn get_documents(&self, collection: Collection, _: &Filter, _: usize) -> StoreResult<Vec<Value>> {
        Err(StoreError::Unavailable(format!(
            "cannot read '{}': database not initialized",
            collection
        )))
    }

    fn list_collections(&self, _: usize) -> StoreResult<Vec<String>> {
        Err(StoreError::Unavailable("database not initialized".into()))
    }
}

/// Fresh id plus the stored form of `fields` with timestamps added.
pub(crate) fn stamp(mut fields: Map<String, Value>) -> (String, Map<String, Value>) {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    fields.remove("id");
    fields.insert("created_at".into(), Value::String(now.clone()));
    fields.insert("updated_at".into(), Value::String(now));
    (id, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_matches_all_fields() {
        let doc = json!({"session_id": "s1", "mood": 3});
        let doc = doc.as_object().unwrap();

        assert!(Filter::new().matches(doc));
        assert!(Filter::new().eq("session_id", "s1").matches(doc));
        assert!(Filter::new().eq("session_id", "s1").eq("mood", 3).matches(doc));
        assert!(!Filter::new().eq("session_id", "s2").matches(doc));
        assert!(!Filter::new().eq("note", "x").matches(doc));
        assert!(Filter::new().eq("note", Value::Null).matches(doc));
    }

    #[test]
    fn unavailable_store_fails_every_call() {
        let store = UnavailableStore;
        assert!(matches!(
            store.create_document(Collection::Post, Map::new()),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.get_documents(Collection::Post, &Filter::new(), 10),
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(store.list_collections(10), Err(StoreError::Unavailable(_))));
    }

    #[test]
    fn stamp_adds_timestamps_and_drops_caller_id() {
        let mut fields = Map::new();
        fields.insert("id".into(), json!("forged"));
        fields.insert("content".into(), json!("hello"));

        let (id, stored) = stamp(fields);
        assert_ne!(id, "forged");
        assert!(!stored.contains_key("id"));
        assert_eq!(stored["created_at"], stored["updated_at"]);
        assert_eq!(stored["content"], "hello");
    }
}

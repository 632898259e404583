use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Value};
use tracing::info;
use unmutte_types::models::Collection;

use crate::{DocumentStore, Filter, StoreError, StoreResult, migrations, stamp};

/// Document store on a single SQLite file. Each document is one row holding
/// its JSON body; filters go through `json_extract`.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;

        migrations::run(&conn)?;

        info!("Store opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Operation(format!("DB lock poisoned: {}", e)))?;
        f(&conn)
    }
}

impl DocumentStore for SqliteStore {
    fn create_document(&self, collection: Collection, fields: Map<String, Value>) -> StoreResult<String> {
        let (id, body) = stamp(fields);
        let created_at = body
            .get("created_at")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let body = serde_json::to_string(&body)?;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO documents (id, collection, body, created_at) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![&id, collection.as_str(), &body, &created_at],
            )?;
            Ok(())
        })?;

        Ok(id)
    }

    fn get_documents(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Value>> {
        let (sql, params) = select_documents(collection, filter, limit);

        let rows = self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(rusqlite::params_from_iter(params), |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        rows.into_iter()
            .map(|(id, body)| -> StoreResult<Value> {
                let mut doc: Map<String, Value> = serde_json::from_str(&body)?;
                doc.insert("id".into(), Value::String(id));
                Ok(Value::Object(doc))
            })
            .collect()
    }

    fn list_collections(&self, limit: usize) -> StoreResult<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT collection FROM documents ORDER BY collection LIMIT ?1",
            )?;
            let names = stmt
                .query_map([limit as i64], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(names)
        })
    }
}

/// Build the SELECT for `filter`, oldest first.
fn select_documents(collection: Collection, filter: &Filter, limit: usize) -> (String, Vec<SqlValue>) {
    let mut sql = String::from("SELECT id, body FROM documents WHERE collection = ?");
    let mut params = vec![SqlValue::Text(collection.as_str().to_string())];

    for (field, expected) in filter.iter() {
        params.push(SqlValue::Text(json_path(field)));
        match expected {
            Value::Null => sql.push_str(" AND json_extract(body, ?) IS NULL"),
            other => {
                sql.push_str(" AND json_extract(body, ?) = ?");
                params.push(sql_value(other));
            }
        }
    }

    sql.push_str(" ORDER BY rowid LIMIT ?");
    params.push(SqlValue::Integer(limit as i64));

    (sql, params)
}

fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', "\\\""))
}

/// How `json_extract` reports a JSON scalar.
fn sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        // Containers come back as minified JSON text
        other => SqlValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn created_document_reads_back_with_id_and_timestamps() {
        let store = SqliteStore::open_in_memory().unwrap();
        let id = store
            .create_document(
                Collection::MoodEntry,
                fields(json!({"session_id": "s1", "mood": 3, "note": null})),
            )
            .unwrap();

        let docs = store
            .get_documents(Collection::MoodEntry, &Filter::new().eq("session_id", "s1"), 100)
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["id"], id.as_str());
        assert_eq!(docs[0]["mood"], 3);
        assert!(docs[0]["created_at"].is_string());
        assert!(docs[0]["updated_at"].is_string());
    }

    #[test]
    fn filter_separates_values_and_collections() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .create_document(Collection::Post, fields(json!({"status": "pending", "reports": 0})))
            .unwrap();
        store
            .create_document(Collection::Post, fields(json!({"status": "published", "reports": 0})))
            .unwrap();
        store
            .create_document(Collection::Reply, fields(json!({"status": "published"})))
            .unwrap();

        let published = store
            .get_documents(Collection::Post, &Filter::new().eq("status", "published"), 50)
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0]["status"], "published");

        let by_number = store
            .get_documents(Collection::Post, &Filter::new().eq("reports", 0), 50)
            .unwrap();
        assert_eq!(by_number.len(), 2);
    }

    #[test]
    fn limit_keeps_oldest_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        for mood in 1..=5 {
            store
                .create_document(
                    Collection::MoodEntry,
                    fields(json!({"session_id": "s1", "mood": mood})),
                )
                .unwrap();
        }

        let docs = store
            .get_documents(Collection::MoodEntry, &Filter::new(), 3)
            .unwrap();
        let moods: Vec<i64> = docs.iter().map(|d| d["mood"].as_i64().unwrap()).collect();
        assert_eq!(moods, [1, 2, 3]);
    }

    #[test]
    fn null_filter_matches_missing_and_null_fields() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .create_document(Collection::Report, fields(json!({"target_id": "a", "reason": null})))
            .unwrap();
        store
            .create_document(Collection::Report, fields(json!({"target_id": "b"})))
            .unwrap();
        store
            .create_document(Collection::Report, fields(json!({"target_id": "c", "reason": "spam"})))
            .unwrap();

        let docs = store
            .get_documents(Collection::Report, &Filter::new().eq("reason", Value::Null), 10)
            .unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[test]
    fn lists_only_non_empty_collections() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.list_collections(10).unwrap().is_empty());

        store
            .create_document(Collection::Post, fields(json!({"content": "x"})))
            .unwrap();
        store
            .create_document(Collection::Message, fields(json!({"role": "user"})))
            .unwrap();

        assert_eq!(store.list_collections(10).unwrap(), ["message", "post"]);
        assert_eq!(store.list_collections(1).unwrap(), ["message"]);
    }
}

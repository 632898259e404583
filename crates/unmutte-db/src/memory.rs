use std::collections::BTreeSet;
use std::sync::Mutex;

use serde_json::{Map, Value};
use unmutte_types::models::Collection;

use crate::{DocumentStore, Filter, StoreError, StoreResult, stamp};

struct StoredDocument {
    collection: Collection,
    id: String,
    body: Map<String, Value>,
}

/// In-process store for tests and throwaway local runs. Nothing survives
/// a restart.
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<Vec<StoredDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, collection: Collection) -> usize {
        self.docs
            .lock()
            .map(|docs| docs.iter().filter(|d| d.collection == collection).count())
            .unwrap_or_default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Vec<StoredDocument>>> {
        self.docs
            .lock()
            .map_err(|e| StoreError::Operation(format!("memory store lock poisoned: {}", e)))
    }
}

impl DocumentStore for MemoryStore {
    fn create_document(&self, collection: Collection, fields: Map<String, Value>) -> StoreResult<String> {
        let (id, body) = stamp(fields);
        self.lock()?.push(StoredDocument {
            collection,
            id: id.clone(),
            body,
        });
        Ok(id)
    }

    fn get_documents(
        &self,
        collection: Collection,
        filter: &Filter,
        limit: usize,
    ) -> StoreResult<Vec<Value>> {
        let docs = self.lock()?;
        Ok(docs
            .iter()
            .filter(|d| d.collection == collection && filter.matches(&d.body))
            .take(limit)
            .map(|d| {
                let mut body = d.body.clone();
                body.insert("id".into(), Value::String(d.id.clone()));
                Value::Object(body)
            })
            .collect())
    }

    fn list_collections(&self, limit: usize) -> StoreResult<Vec<String>> {
        let docs = self.lock()?;
        let names: BTreeSet<&'static str> = docs.iter().map(|d| d.collection.as_str()).collect();
        Ok(names.into_iter().take(limit).map(String::from).collect())
    }
}

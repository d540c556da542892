//! In-memory document store used by unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use super::{Document, DocumentStore, Query, Session, SessionProvider};
use crate::constants::GENERATED_ID;
use crate::error::RemoteError;

#[derive(Default)]
struct State {
    collections: HashMap<String, Vec<Document>>,
    session: Option<Session>,
    next_id: u64,
    calls: u64,
    fail_at: Option<u64>,
}

/// Process-local stand-in for the hosted backend: sequential generated ids,
/// equality filtering, and one-shot failure injection.
#[derive(Default)]
pub struct MemoryDocumentStore {
    state: Mutex<State>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call through the store interface fail with a server
    /// error.
    pub fn fail_next_call(&self) {
        self.fail_nth_call(1);
    }

    /// Make the nth upcoming call fail (1 = next). Lets a test target the
    /// second call of a two-call operation.
    pub fn fail_nth_call(&self, n: u64) {
        let mut state = self.state.lock();
        state.fail_at = Some(state.calls + n);
    }

    pub fn set_session(&self, session: Session) {
        self.state.lock().session = Some(session);
    }

    /// Insert a document directly, bypassing the store interface.
    pub fn seed(&self, collection_id: &str, fields: Map<String, Value>) -> Document {
        let mut state = self.state.lock();
        let id = Self::generate_id(&mut state);
        let document = Document {
            id,
            collection_id: collection_id.to_string(),
            fields,
            ..Document::default()
        };
        state
            .collections
            .entry(collection_id.to_string())
            .or_default()
            .push(document.clone());
        document
    }

    /// Number of documents currently stored in a collection.
    pub fn count(&self, collection_id: &str) -> usize {
        self.state
            .lock()
            .collections
            .get(collection_id)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn generate_id(state: &mut State) -> String {
        state.next_id += 1;
        format!("doc-{}", state.next_id)
    }

    fn take_failure(state: &mut State) -> Result<(), RemoteError> {
        state.calls += 1;
        if state.fail_at == Some(state.calls) {
            state.fail_at = None;
            return Err(RemoteError::Status {
                status: 503,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn matches(document: &Document, queries: &[Query]) -> bool {
        queries.iter().all(|query| {
            match document.fields.get(query.attribute()) {
                Some(Value::String(value)) => value == query.value(),
                // Array attributes match if any element equals the filter value
                Some(Value::Array(items)) => {
                    items.iter().any(|item| item.as_str() == Some(query.value()))
                }
                _ => false,
            }
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<Document>, RemoteError> {
        let mut state = self.state.lock();
        Self::take_failure(&mut state)?;

        let documents = state
            .collections
            .get(collection_id)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| Self::matches(doc, queries))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn get(&self, collection_id: &str, document_id: &str) -> Result<Document, RemoteError> {
        let mut state = self.state.lock();
        Self::take_failure(&mut state)?;

        state
            .collections
            .get(collection_id)
            .and_then(|docs| docs.iter().find(|doc| doc.id == document_id))
            .cloned()
            .ok_or(RemoteError::NotFound)
    }

    async fn create(
        &self,
        collection_id: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, RemoteError> {
        let mut state = self.state.lock();
        Self::take_failure(&mut state)?;

        let id = if document_id == GENERATED_ID {
            Self::generate_id(&mut state)
        } else {
            document_id.to_string()
        };

        let document = Document {
            id,
            collection_id: collection_id.to_string(),
            fields,
            ..Document::default()
        };
        state
            .collections
            .entry(collection_id.to_string())
            .or_default()
            .push(document.clone());
        Ok(document)
    }

    async fn update(
        &self,
        collection_id: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, RemoteError> {
        let mut state = self.state.lock();
        Self::take_failure(&mut state)?;

        let document = state
            .collections
            .get_mut(collection_id)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == document_id))
            .ok_or(RemoteError::NotFound)?;

        for (key, value) in fields {
            document.fields.insert(key, value);
        }
        Ok(document.clone())
    }

    async fn delete(&self, collection_id: &str, document_id: &str) -> Result<(), RemoteError> {
        let mut state = self.state.lock();
        Self::take_failure(&mut state)?;

        let documents = state
            .collections
            .get_mut(collection_id)
            .ok_or(RemoteError::NotFound)?;
        let before = documents.len();
        documents.retain(|doc| doc.id != document_id);
        if documents.len() == before {
            return Err(RemoteError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl SessionProvider for MemoryDocumentStore {
    async fn current_session(&self) -> Result<Session, RemoteError> {
        let mut state = self.state.lock();
        Self::take_failure(&mut state)?;

        state.session.clone().ok_or(RemoteError::Status {
            status: 401,
            message: "no active session".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_create_generates_sequential_ids() {
        let store = MemoryDocumentStore::new();
        let first = store
            .create("tasks", GENERATED_ID, Map::new())
            .await
            .unwrap();
        let second = store
            .create("tasks", GENERATED_ID, Map::new())
            .await
            .unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.count("tasks"), 2);
    }

    #[tokio::test]
    async fn test_list_applies_equality_filter() {
        let store = MemoryDocumentStore::new();
        store.seed("tasks", fields(&[("project", "p1".into())]));
        store.seed("tasks", fields(&[("project", "p2".into())]));

        let matching = store
            .list("tasks", &[Query::equal("project", "p1")])
            .await
            .unwrap();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].fields["project"], "p1");
    }

    #[tokio::test]
    async fn test_filter_matches_array_elements() {
        let store = MemoryDocumentStore::new();
        store.seed(
            "tasks",
            fields(&[("assigned_to", serde_json::json!(["u1", "u2"]))]),
        );

        let matching = store
            .list("tasks", &[Query::equal("assigned_to", "u2")])
            .await
            .unwrap();
        assert_eq!(matching.len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryDocumentStore::new();
        let doc = store.seed(
            "tasks",
            fields(&[("title", "old".into()), ("completed", false.into())]),
        );

        let updated = store
            .update("tasks", &doc.id, fields(&[("title", "new".into())]))
            .await
            .unwrap();
        assert_eq!(updated.fields["title"], "new");
        assert_eq!(updated.fields["completed"], false);
    }

    #[tokio::test]
    async fn test_failure_injection_is_one_shot() {
        let store = MemoryDocumentStore::new();
        store.fail_next_call();

        assert!(store.list("tasks", &[]).await.is_err());
        assert!(store.list("tasks", &[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryDocumentStore::new();
        let result = store.get("tasks", "nope").await;
        assert!(matches!(result, Err(RemoteError::NotFound)));
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let store = MemoryDocumentStore::new();
        assert!(store.current_session().await.is_err());

        store.set_session(Session {
            id: "sess-1".to_string(),
            user_id: "u1".to_string(),
        });
        let session = store.current_session().await.unwrap();
        assert_eq!(session.id, "sess-1");
    }
}

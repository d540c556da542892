//! Remote document-store interface.
//!
//! The backend is a hosted document database exposing CRUD by collection id
//! plus an equality-filter query builder. Everything else (auth backends,
//! schema validation, permissions) lives server-side.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RemoteError;

pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

/// Raw document as returned by the remote store: platform metadata fields
/// plus the collection's own attributes, untyped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collectionId", default)]
    pub collection_id: String,
    #[serde(rename = "$databaseId", default)]
    pub database_id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: String,
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: String,
    #[serde(rename = "$permissions", default)]
    pub permissions: Vec<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Equality filter usable in `list` calls. Filtering runs on the backend's
/// query engine, never locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    attribute: String,
    value: String,
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Wire form of the filter, e.g. `equal("project", ["p1"])`.
    pub fn to_wire(&self) -> String {
        format!(r#"equal("{}", ["{}"])"#, self.attribute, self.value)
    }
}

/// The current auth session, as reported by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId", default)]
    pub user_id: String,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<Document>, RemoteError>;

    async fn get(&self, collection_id: &str, document_id: &str) -> Result<Document, RemoteError>;

    /// Create a document. Pass [`crate::constants::GENERATED_ID`] as the
    /// document id to let the backend assign one.
    async fn create(
        &self,
        collection_id: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, RemoteError>;

    async fn update(
        &self,
        collection_id: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, RemoteError>;

    async fn delete(&self, collection_id: &str, document_id: &str) -> Result<(), RemoteError>;
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_session(&self) -> Result<Session, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_wire_form() {
        let query = Query::equal("project", "p1");
        assert_eq!(query.to_wire(), r#"equal("project", ["p1"])"#);
    }

    #[test]
    fn test_document_splits_metadata_from_fields() {
        let raw = serde_json::json!({
            "$id": "doc1",
            "$collectionId": "tasks",
            "$databaseId": "main",
            "$createdAt": "2024-05-01T10:30:00.000+00:00",
            "$updatedAt": "2024-05-02T08:00:00.000+00:00",
            "$permissions": [],
            "title": "Ship it",
            "completed": false
        });

        let document: Document = serde_json::from_value(raw).unwrap();
        assert_eq!(document.id, "doc1");
        assert_eq!(document.collection_id, "tasks");
        assert_eq!(document.fields["title"], "Ship it");
        assert_eq!(document.fields["completed"], false);
        assert!(!document.fields.contains_key("$id"));
    }
}

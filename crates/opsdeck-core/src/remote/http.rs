use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{Document, DocumentStore, Query, Session, SessionProvider};
use crate::config::CoreConfig;
use crate::error::RemoteError;

/// REST client for the hosted document database.
pub struct HttpDocumentStore {
    client: Client,
    endpoint: String,
    project_id: String,
    api_key: Option<String>,
    database_id: String,
}

#[derive(Deserialize)]
struct DocumentList {
    documents: Vec<Document>,
}

impl HttpDocumentStore {
    pub fn new(config: &CoreConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
            database_id: config.database_id.clone(),
        }
    }

    fn collection_url(&self, collection_id: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, collection_id
        )
    }

    fn document_url(&self, collection_id: &str, document_id: &str) -> String {
        format!("{}/{}", self.collection_url(collection_id), document_id)
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("X-Project-Id", &self.project_id);
        match &self.api_key {
            Some(key) => request.header("X-Api-Key", key),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound);
        }
        let message = response.text().await.unwrap_or_default();
        Err(RemoteError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn list(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<Document>, RemoteError> {
        let params: Vec<(&str, String)> =
            queries.iter().map(|q| ("queries[]", q.to_wire())).collect();

        let response = self
            .with_headers(self.client.get(self.collection_url(collection_id)))
            .query(&params)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let list: DocumentList = response.json().await?;
        Ok(list.documents)
    }

    async fn get(&self, collection_id: &str, document_id: &str) -> Result<Document, RemoteError> {
        let response = self
            .with_headers(self.client.get(self.document_url(collection_id, document_id)))
            .send()
            .await?;
        let response = Self::check(response).await?;

        Ok(response.json().await?)
    }

    async fn create(
        &self,
        collection_id: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, RemoteError> {
        let body = serde_json::json!({
            "documentId": document_id,
            "data": fields,
        });

        let response = self
            .with_headers(self.client.post(self.collection_url(collection_id)))
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response).await?;

        Ok(response.json().await?)
    }

    async fn update(
        &self,
        collection_id: &str,
        document_id: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, RemoteError> {
        let body = serde_json::json!({ "data": fields });

        let response = self
            .with_headers(
                self.client
                    .patch(self.document_url(collection_id, document_id)),
            )
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response).await?;

        Ok(response.json().await?)
    }

    async fn delete(&self, collection_id: &str, document_id: &str) -> Result<(), RemoteError> {
        let response = self
            .with_headers(
                self.client
                    .delete(self.document_url(collection_id, document_id)),
            )
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionProvider for HttpDocumentStore {
    async fn current_session(&self) -> Result<Session, RemoteError> {
        let url = format!("{}/account/session", self.endpoint);
        let response = self.with_headers(self.client.get(url)).send().await?;
        let response = Self::check(response).await?;

        Ok(response.json().await?)
    }
}

use std::sync::Arc;

use tracing::error;

use crate::error::CoreError;
use crate::models::User;
use crate::remote::{DocumentStore, Query};
use crate::store::SharedUserStore;

/// Member directory data access. Read-only: member records are managed by
/// the backend's admin surface.
pub struct UserDb<S> {
    client: Arc<S>,
    collection_id: String,
    store: SharedUserStore,
}

impl<S: DocumentStore> UserDb<S> {
    pub fn new(client: Arc<S>, collection_id: impl Into<String>, store: SharedUserStore) -> Self {
        Self {
            client,
            collection_id: collection_id.into(),
            store,
        }
    }

    pub fn store(&self) -> &SharedUserStore {
        &self.store
    }

    /// Fetch every member and wholesale-replace the list view (which also
    /// resets the filtered view).
    pub async fn list(&self) -> Result<Vec<User>, CoreError> {
        let documents = self
            .client
            .list(&self.collection_id, &[])
            .await
            .map_err(|err| {
                error!("failed to fetch users: {err}");
                CoreError::fetch(err)
            })?;

        let users: Vec<User> = documents
            .iter()
            .map(User::from_document)
            .collect::<Result<_, _>>()?;

        self.store.update(|store| store.set_users(users.clone()));
        Ok(users)
    }

    /// Fetch a member by document id and remember it in the fetched list.
    pub async fn get(&self, user_id: &str) -> Result<User, CoreError> {
        let document = self
            .client
            .get(&self.collection_id, user_id)
            .await
            .map_err(|err| {
                error!("failed to fetch user {user_id}: {err}");
                CoreError::from_remote(err)
            })?;

        let user = User::from_document(&document)?;
        self.store
            .update(|store| store.add_fetched_user(user.clone()));
        Ok(user)
    }

    /// Look up a member by the auth backend's subject id (`userID`).
    /// First match or `None`; absence is not an error. The filter runs on
    /// the backend's query engine.
    pub async fn get_by_correlation_id(
        &self,
        correlation_id: &str,
    ) -> Result<Option<User>, CoreError> {
        let queries = [Query::equal("userID", correlation_id)];
        let documents = self
            .client
            .list(&self.collection_id, &queries)
            .await
            .map_err(|err| {
                error!("failed to look up user by correlation id: {err}");
                CoreError::fetch(err)
            })?;

        match documents.first() {
            Some(document) => Ok(Some(User::from_document(document)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryDocumentStore;
    use crate::store::Shared;
    use serde_json::{Map, Value};

    fn user_fields(name: &str, correlation_id: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("Name".to_string(), name.into());
        fields.insert("phone".to_string(), "+1 555 0100".into());
        fields.insert("email".to_string(), format!("{name}@example.com").into());
        fields.insert("userID".to_string(), correlation_id.into());
        fields
    }

    fn user_db() -> (Arc<MemoryDocumentStore>, UserDb<MemoryDocumentStore>) {
        let client = Arc::new(MemoryDocumentStore::new());
        let db = UserDb::new(Arc::clone(&client), "users", Shared::default());
        (client, db)
    }

    #[tokio::test]
    async fn test_list_resets_filtered_view() {
        let (client, db) = user_db();
        client.seed("users", user_fields("ada", "auth-1"));
        client.seed("users", user_fields("brin", "auth-2"));

        let users = db.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(db.store().read(|store| store.filtered_users.len()), 2);
    }

    #[tokio::test]
    async fn test_get_accumulates_fetched_users() {
        let (client, db) = user_db();
        let seeded = client.seed("users", user_fields("ada", "auth-1"));

        let user = db.get(&seeded.id).await.unwrap();
        assert_eq!(user.name, "ada");
        assert_eq!(db.store().read(|store| store.fetched_users.len()), 1);
    }

    #[tokio::test]
    async fn test_get_by_correlation_id() {
        let (client, db) = user_db();
        client.seed("users", user_fields("ada", "auth-1"));
        client.seed("users", user_fields("brin", "auth-2"));

        let found = db.get_by_correlation_id("auth-2").await.unwrap();
        assert_eq!(found.unwrap().name, "brin");
    }

    #[tokio::test]
    async fn test_get_by_correlation_id_absent_is_none() {
        let (_, db) = user_db();
        let found = db.get_by_correlation_id("auth-404").await.unwrap();
        assert!(found.is_none());
    }
}

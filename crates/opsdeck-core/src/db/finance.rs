use std::sync::Arc;

use tracing::error;

use crate::constants::GENERATED_ID;
use crate::error::CoreError;
use crate::models::{NewTransaction, Transaction, TransactionPatch};
use crate::remote::DocumentStore;
use crate::store::SharedFinanceStore;

/// Finance ledger data access.
pub struct FinanceDb<S> {
    client: Arc<S>,
    collection_id: String,
    store: SharedFinanceStore,
}

impl<S: DocumentStore> FinanceDb<S> {
    pub fn new(
        client: Arc<S>,
        collection_id: impl Into<String>,
        store: SharedFinanceStore,
    ) -> Self {
        Self {
            client,
            collection_id: collection_id.into(),
            store,
        }
    }

    pub fn store(&self) -> &SharedFinanceStore {
        &self.store
    }

    /// Fetch the ledger and wholesale-replace the list view. Drives the
    /// store's loading/error signal; transaction data stays untouched on
    /// failure.
    pub async fn list(&self) -> Result<Vec<Transaction>, CoreError> {
        self.store.update(|store| {
            store.set_loading(true);
            store.set_error(None);
        });

        let result = self.client.list(&self.collection_id, &[]).await;
        let documents = match result {
            Ok(documents) => documents,
            Err(err) => {
                error!("failed to fetch transactions: {err}");
                let wrapped = CoreError::fetch(err);
                self.store.update(|store| {
                    store.set_loading(false);
                    store.set_error(Some(wrapped.to_string()));
                });
                return Err(wrapped);
            }
        };

        let normalized: Result<Vec<Transaction>, CoreError> =
            documents.iter().map(Transaction::from_document).collect();
        let transactions = match normalized {
            Ok(transactions) => transactions,
            Err(err) => {
                self.store.update(|store| {
                    store.set_loading(false);
                    store.set_error(Some(err.to_string()));
                });
                return Err(err);
            }
        };

        self.store.update(|store| {
            store.set_transactions(transactions.clone());
            store.set_loading(false);
        });
        Ok(transactions)
    }

    pub async fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, CoreError> {
        let document = self
            .client
            .create(&self.collection_id, GENERATED_ID, new_transaction.fields())
            .await
            .map_err(|err| {
                error!("failed to add transaction: {err}");
                CoreError::fetch(err)
            })?;

        let transaction = Transaction::from_document(&document)?;
        self.store
            .update(|store| store.add_transaction(transaction.clone()));
        Ok(transaction)
    }

    pub async fn update(
        &self,
        transaction_id: &str,
        patch: TransactionPatch,
    ) -> Result<Transaction, CoreError> {
        let document = self
            .client
            .update(&self.collection_id, transaction_id, patch.fields())
            .await
            .map_err(|err| {
                error!("failed to update transaction {transaction_id}: {err}");
                CoreError::fetch(err)
            })?;

        let transaction = Transaction::from_document(&document)?;
        self.store
            .update(|store| store.update_transaction(transaction.clone()));
        Ok(transaction)
    }

    pub async fn delete(&self, transaction_id: &str) -> Result<(), CoreError> {
        self.client
            .delete(&self.collection_id, transaction_id)
            .await
            .map_err(|err| {
                error!("failed to delete transaction {transaction_id}: {err}");
                CoreError::fetch(err)
            })?;

        self.store
            .update(|store| store.remove_transaction(transaction_id));
        Ok(())
    }
}

use crate::models::Transaction;

/// Ledger list view plus the pending/error signal the finance screens read.
#[derive(Debug, Default)]
pub struct FinanceStore {
    pub transactions: Vec<Transaction>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl FinanceStore {
    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    /// Insert a transaction, replacing any existing entry with the same id.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        match self
            .transactions
            .iter_mut()
            .find(|existing| existing.id == transaction.id)
        {
            Some(existing) => *existing = transaction,
            None => self.transactions.push(transaction),
        }
    }

    pub fn update_transaction(&mut self, updated: Transaction) {
        if let Some(existing) = self
            .transactions
            .iter_mut()
            .find(|transaction| transaction.id == updated.id)
        {
            *existing = updated;
        }
    }

    pub fn remove_transaction(&mut self, transaction_id: &str) {
        self.transactions
            .retain(|transaction| transaction.id != transaction_id);
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DebitCredit, TransactionKind};

    fn transaction(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            title: format!("tx {id}"),
            amount: 10.0,
            description: String::new(),
            kind: TransactionKind::Internal,
            users: Vec::new(),
            debit_credit: DebitCredit::Debit,
            project: "p1".to_string(),
        }
    }

    #[test]
    fn test_update_transaction() {
        let mut store = FinanceStore::default();
        store.set_transactions(vec![transaction("t1")]);

        let mut replacement = transaction("t1");
        replacement.amount = 99.0;
        store.update_transaction(replacement);

        assert_eq!(store.transactions[0].amount, 99.0);
    }

    #[test]
    fn test_remove_transaction_is_idempotent() {
        let mut store = FinanceStore::default();
        store.set_transactions(vec![transaction("t1"), transaction("t2")]);

        store.remove_transaction("t1");
        store.remove_transaction("t1");
        assert_eq!(store.transactions.len(), 1);
    }

    #[test]
    fn test_loading_and_error_flags() {
        let mut store = FinanceStore::default();
        store.set_loading(true);
        store.set_error(Some("fetch failed (500)".to_string()));

        assert!(store.is_loading);
        assert!(store.error.is_some());

        store.set_loading(false);
        store.set_error(None);
        assert!(!store.is_loading);
        assert!(store.error.is_none());
    }
}

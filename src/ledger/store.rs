use uuid::Uuid;

use super::transaction::{Transaction, ValidationError};

/// Owns every transaction for the lifetime of a session. The observable
/// order is always descending by `occurred_at` (most recent first) after any
/// append or bulk replace; aggregation components only ever read from it.
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a validated transaction and re-sorts into store order.
    /// Ids are never reused, so a colliding id is rejected outright.
    pub fn append(&mut self, transaction: Transaction) -> Result<Uuid, ValidationError> {
        if self.transactions.iter().any(|t| t.id == transaction.id) {
            return Err(ValidationError::DuplicateId(transaction.id));
        }
        let id = transaction.id;
        self.transactions.push(transaction);
        self.resort();
        Ok(id)
    }

    /// Replaces the full contents with an already-validated sequence (the
    /// import path) and re-sorts into store order.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.resort();
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn total_sales(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.is_sale())
            .map(|t| t.amount)
            .sum()
    }

    pub fn total_expenses(&self) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum()
    }

    pub fn total_profit(&self) -> f64 {
        self.total_sales() - self.total_expenses()
    }

    fn resort(&mut self) {
        self.transactions
            .sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    }
}

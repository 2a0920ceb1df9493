use std::collections::BTreeSet;

use serde::Serialize;

use super::transaction::Transaction;

/// Per-client rollup of sale activity. Recomputed per query, never
/// persisted; transaction order mirrors the store (most recent first).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientSummary {
    pub client_name: String,
    pub total_sales: f64,
    pub transactions: Vec<Transaction>,
}

/// Distinct non-empty client names across sale transactions, sorted
/// ascending (case-sensitive ordinal order) with no duplicates.
pub fn clients_of(transactions: &[Transaction]) -> Vec<String> {
    let names: BTreeSet<&str> = transactions
        .iter()
        .filter(|t| t.is_sale())
        .filter_map(|t| t.client_name.as_deref())
        .filter(|name| !name.is_empty())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Sums sales for one client and returns the matching transactions in
/// input order. An unknown client yields a zero total, not an error.
pub fn summarize_client(transactions: &[Transaction], client_name: &str) -> ClientSummary {
    let matching: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.is_sale() && t.client_name.as_deref() == Some(client_name))
        .cloned()
        .collect();
    let total_sales = matching.iter().map(|t| t.amount).sum();
    ClientSummary {
        client_name: client_name.to_string(),
        total_sales,
        transactions: matching,
    }
}

/// Deterministic default-selection policy: keep the previous client while
/// it exists, otherwise fall back to the lexicographically-first one, or
/// none when the set is empty.
pub fn reselect_client(previous: Option<&str>, clients: &[String]) -> Option<String> {
    if let Some(name) = previous {
        if clients.iter().any(|c| c == name) {
            return Some(name.to_string());
        }
    }
    clients.first().cloned()
}

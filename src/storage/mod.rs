pub mod json_backend;

use crate::config::Settings;
use crate::errors::Result;
use crate::ledger::Transaction;

pub use json_backend::JsonStorage;

/// Blob key under which the transaction list is persisted.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Blob key under which the selected display currency is persisted.
pub const CURRENCY_KEY: &str = "currency";

/// Abstraction over persistence backends capable of storing the transaction
/// list and display settings as opaque serialized blobs under fixed keys.
pub trait StorageBackend: Send + Sync {
    /// Loads the persisted transaction list; `None` on first run.
    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>>;
    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()>;

    /// Loads the persisted display settings; `None` on first run.
    fn load_settings(&self) -> Result<Option<Settings>>;
    fn save_settings(&self, settings: &Settings) -> Result<()>;
}

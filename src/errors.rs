use thiserror::Error;

use crate::import::ImportError;
use crate::ledger::ValidationError;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),
    #[error("Categorization advisor unavailable: {0}")]
    AdvisorUnavailable(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    ImportFormat(#[from] ImportError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

pub mod clients;
pub mod period;
pub mod store;
pub mod transaction;

pub use clients::{clients_of, reselect_client, summarize_client, ClientSummary};
pub use period::{aggregate, aggregate_until, Granularity, PeriodBucket};
pub use store::TransactionStore;
pub use transaction::{Transaction, TransactionKind, ValidationError};

#![doc(test(attr(deny(warnings))))]

//! Core engine for a personal finance ledger: an in-memory transaction
//! store, calendar-period aggregation (sales, expenses, profit), per-client
//! rollups, and currency display formatting. Persistence and the expense
//! categorization advisor are modeled as boundaries the host implements.

pub mod advisor;
pub mod config;
pub mod currency;
pub mod errors;
pub mod import;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("gexpenses core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}

#![doc(test(attr(deny(warnings))))]

//! Finance Tracker records income and expense transactions against
//! user-defined categories and reports running totals. This crate wires the
//! workspace crates together and hosts the interactive shell.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

use finance_config::Config;
use finance_core::FinanceStore;
use finance_storage_json::JsonStateStorage;

pub use errors::{CliError, FinanceError};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Tracker tracing initialized.");
    });
}

/// Opens the JSON-backed store described by `config`.
///
/// The returned storage handle points at the same files as the store and is
/// used for backup management.
pub fn open_store(config: &Config) -> Result<(FinanceStore, JsonStateStorage), FinanceError> {
    let data_dir = config.resolve_data_dir();
    let storage = JsonStateStorage::with_key(data_dir, &config.storage_key)?
        .with_retention(config.backup_retention);
    let store = FinanceStore::open(storage.clone())?;
    tracing::debug!(path = %storage.state_path().display(), "store opened");
    Ok((store, storage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_does_not_panic() {
        super::init();
    }

    #[test]
    fn open_store_seeds_under_configured_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            data_dir: Some(dir.path().to_path_buf()),
            storage_key: "ledger".into(),
            ..Config::default()
        };
        let (store, storage) = open_store(&config).expect("open store");
        assert_eq!(store.list_categories(None).len(), 12);
        assert_eq!(storage.state_path(), dir.path().join("ledger.json"));
        assert!(storage.state_path().exists());
    }
}

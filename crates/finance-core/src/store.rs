//! Thread-safe owner of the finance state.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use finance_domain::{
    Category, CategoryInput, Displayable, EntryKind, FinanceState, Stats, Transaction,
    TransactionInput, UNCATEGORIZED_LABEL,
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    storage::{state_warnings, StateStorage},
    CategoryService, CoreResult, TransactionService,
};

/// Holds categories and transactions and writes every change through to storage.
///
/// Each mutation validates, applies and saves under one write guard, so the
/// reference check in [`FinanceStore::delete_category`] cannot interleave with
/// a concurrent [`FinanceStore::add_transaction`].
pub struct FinanceStore {
    state: RwLock<FinanceState>,
    storage: Box<dyn StateStorage>,
}

impl FinanceStore {
    /// Loads the saved state, seeding the default categories on first run.
    pub fn open(storage: impl StateStorage + 'static) -> CoreResult<Self> {
        let state = match storage.load()? {
            Some(state) => {
                for warning in state_warnings(&state) {
                    warn!(%warning, "loaded state has an inconsistency");
                }
                info!(
                    categories = state.categories.len(),
                    transactions = state.transactions.len(),
                    "finance state loaded"
                );
                state
            }
            None => {
                let state = FinanceState::seeded();
                storage.save(&state)?;
                info!(
                    categories = state.categories.len(),
                    "no saved state found, seeded default categories"
                );
                state
            }
        };
        Ok(Self {
            state: RwLock::new(state),
            storage: Box::new(storage),
        })
    }

    pub fn add_transaction(&self, input: TransactionInput) -> CoreResult<Transaction> {
        let txn = self.mutate(|state| TransactionService::add(state, input))?;
        debug!(id = %txn.id, kind = %txn.kind, amount = txn.amount, "transaction added");
        Ok(txn)
    }

    pub fn edit_transaction(&self, id: Uuid, input: TransactionInput) -> CoreResult<Transaction> {
        let txn = self.mutate(|state| TransactionService::edit(state, id, input))?;
        debug!(id = %txn.id, "transaction updated");
        Ok(txn)
    }

    pub fn delete_transaction(&self, id: Uuid) -> CoreResult<Transaction> {
        let txn = self.mutate(|state| TransactionService::remove(state, id))?;
        debug!(txn = %txn.display_label(), "transaction deleted");
        Ok(txn)
    }

    pub fn add_category(&self, input: CategoryInput) -> CoreResult<Category> {
        let category = self.mutate(|state| CategoryService::add(state, input))?;
        debug!(id = %category.id, name = %category.name, "category added");
        Ok(category)
    }

    pub fn edit_category(&self, id: Uuid, input: CategoryInput) -> CoreResult<Category> {
        let category = self.mutate(|state| CategoryService::edit(state, id, input))?;
        debug!(id = %category.id, name = %category.name, "category updated");
        Ok(category)
    }

    /// Removes the category unless a transaction still references it.
    pub fn delete_category(&self, id: Uuid) -> CoreResult<Category> {
        let category = self.mutate(|state| CategoryService::remove(state, id))?;
        debug!(id = %category.id, name = %category.name, "category deleted");
        Ok(category)
    }

    /// Recomputes totals from the current transactions.
    pub fn stats(&self) -> Stats {
        self.read().stats()
    }

    pub fn list_categories(&self, kind: Option<EntryKind>) -> Vec<Category> {
        CategoryService::list(&self.read(), kind)
    }

    pub fn list_transactions(&self, kind: Option<EntryKind>) -> Vec<Transaction> {
        TransactionService::list(&self.read(), kind)
    }

    pub fn category(&self, id: Uuid) -> Option<Category> {
        self.read().category(id).cloned()
    }

    pub fn transaction(&self, id: Uuid) -> Option<Transaction> {
        self.read().transaction(id).cloned()
    }

    /// `"<icon> <name>"` for known categories, the uncategorized label otherwise.
    pub fn category_label(&self, id: Uuid) -> String {
        self.read()
            .category(id)
            .map(|category| category.display_label())
            .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string())
    }

    pub fn resolve_category(&self, token: &str) -> CoreResult<Category> {
        CategoryService::resolve(&self.read(), token).cloned()
    }

    pub fn resolve_transaction(&self, token: &str) -> CoreResult<Transaction> {
        TransactionService::resolve(&self.read(), token).cloned()
    }

    pub fn snapshot(&self) -> FinanceState {
        self.read().clone()
    }

    /// Writes the current state and reports any storage failure.
    pub fn save(&self) -> CoreResult<()> {
        let state = self.write();
        self.storage.save(&state)
    }

    /// Swaps in a whole state, e.g. one restored from a backup, and saves it.
    pub fn replace(&self, next: FinanceState) -> CoreResult<()> {
        for warning in state_warnings(&next) {
            warn!(%warning, "replacement state has an inconsistency");
        }
        let mut state = self.write();
        *state = next;
        self.storage.save(&state)
    }

    fn mutate<T>(&self, op: impl FnOnce(&mut FinanceState) -> CoreResult<T>) -> CoreResult<T> {
        let mut state = self.write();
        let value = op(&mut state)?;
        if let Err(err) = self.storage.save(&state) {
            error!(error = %err, "failed to persist finance state");
        }
        Ok(value)
    }

    fn read(&self) -> RwLockReadGuard<'_, FinanceState> {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FinanceState> {
        self.state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{storage::MemoryStorage, CoreError};
    use chrono::NaiveDate;
    use std::sync::Arc;

    struct FailingStorage;

    impl StateStorage for FailingStorage {
        fn load(&self) -> CoreResult<Option<FinanceState>> {
            Ok(Some(FinanceState::default()))
        }

        fn save(&self, _state: &FinanceState) -> CoreResult<()> {
            Err(CoreError::Storage("disk full".into()))
        }
    }

    fn empty_store() -> (FinanceStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::with_state(FinanceState::default()));
        let store = FinanceStore::open(storage.clone()).expect("open store");
        (store, storage)
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn first_open_seeds_and_persists_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        let store = FinanceStore::open(storage.clone()).unwrap();
        assert_eq!(store.list_categories(Some(EntryKind::Income)).len(), 4);
        assert_eq!(store.list_categories(Some(EntryKind::Expense)).len(), 8);
        assert!(store.list_transactions(None).is_empty());
        assert_eq!(storage.stored(), Some(store.snapshot()));
    }

    #[test]
    fn every_mutation_is_written_after_it_happens() {
        let (store, storage) = empty_store();
        let category = store
            .add_category(CategoryInput::new("工资", EntryKind::Income))
            .unwrap();
        assert_eq!(storage.stored().unwrap().categories, vec![category.clone()]);

        let txn = store
            .add_transaction(TransactionInput::new(
                EntryKind::Income,
                100.0,
                category.id,
                jan(1),
            ))
            .unwrap();
        assert_eq!(storage.stored().unwrap().transactions, vec![txn]);
        assert_eq!(storage.save_count(), 2);
    }

    #[test]
    fn rejected_mutations_do_not_touch_storage() {
        let (store, storage) = empty_store();
        let err = store
            .add_transaction(TransactionInput::new(
                EntryKind::Income,
                10.0,
                Uuid::new_v4(),
                jan(1),
            ))
            .expect_err("unknown category");
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn persistence_failures_do_not_fail_the_mutation() {
        let store = FinanceStore::open(FailingStorage).unwrap();
        let category = store
            .add_category(CategoryInput::new("Rent", EntryKind::Expense))
            .expect("mutation still applies");
        assert_eq!(store.category(category.id), Some(category));
        assert!(matches!(store.save(), Err(CoreError::Storage(_))));
    }

    #[test]
    fn category_label_falls_back_for_unknown_ids() {
        let (store, _) = empty_store();
        let category = store
            .add_category(CategoryInput::new("餐饮", EntryKind::Expense).with_icon("🍔"))
            .unwrap();
        assert_eq!(store.category_label(category.id), "🍔 餐饮");
        assert_eq!(store.category_label(Uuid::new_v4()), UNCATEGORIZED_LABEL);
    }

    #[test]
    fn stats_are_idempotent() {
        let (store, _) = empty_store();
        let category = store
            .add_category(CategoryInput::new("Food", EntryKind::Expense))
            .unwrap();
        store
            .add_transaction(TransactionInput::new(
                EntryKind::Expense,
                12.5,
                category.id,
                jan(3),
            ))
            .unwrap();
        assert_eq!(store.stats(), store.stats());
        assert_eq!(store.stats().balance, -12.5);
    }

    #[test]
    fn replace_swaps_state_and_saves() {
        let (store, storage) = empty_store();
        let seeded = FinanceState::seeded();
        store.replace(seeded.clone()).unwrap();
        assert_eq!(store.snapshot(), seeded);
        assert_eq!(storage.stored(), Some(seeded));
    }
}

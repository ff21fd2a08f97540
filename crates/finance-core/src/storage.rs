use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use finance_domain::FinanceState;

use crate::CoreError;

/// Abstraction over persistence backends holding the single finance record.
pub trait StateStorage: Send + Sync {
    /// Returns the previously saved state, or `None` on first run.
    fn load(&self) -> Result<Option<FinanceState>, CoreError>;
    fn save(&self, state: &FinanceState) -> Result<(), CoreError>;
}

impl<S: StateStorage + ?Sized> StateStorage for Arc<S> {
    fn load(&self) -> Result<Option<FinanceState>, CoreError> {
        (**self).load()
    }

    fn save(&self, state: &FinanceState) -> Result<(), CoreError> {
        (**self).save(state)
    }
}

/// Volatile storage that keeps the last saved state in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<FinanceState>>,
    saves: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: FinanceState) -> Self {
        Self {
            slot: Mutex::new(Some(state)),
            saves: Mutex::new(0),
        }
    }

    /// Last state written through [`StateStorage::save`].
    pub fn stored(&self) -> Option<FinanceState> {
        lock(&self.slot).clone()
    }

    pub fn save_count(&self) -> usize {
        *lock(&self.saves)
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self) -> Result<Option<FinanceState>, CoreError> {
        Ok(lock(&self.slot).clone())
    }

    fn save(&self, state: &FinanceState) -> Result<(), CoreError> {
        *lock(&self.slot) = Some(state.clone());
        *lock(&self.saves) += 1;
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Detects dangling references and other anomalies within a loaded snapshot.
pub fn state_warnings(state: &FinanceState) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut category_ids = HashSet::new();
    for category in &state.categories {
        if !category_ids.insert(category.id) {
            warnings.push(format!("duplicate category id {}", category.id));
        }
    }

    let mut txn_ids = HashSet::new();
    for txn in &state.transactions {
        if !txn_ids.insert(txn.id) {
            warnings.push(format!("duplicate transaction id {}", txn.id));
        }
        match state.category(txn.category_id) {
            None => warnings.push(format!(
                "transaction {} references missing category {}",
                txn.id, txn.category_id
            )),
            Some(category) if category.kind != txn.kind => warnings.push(format!(
                "transaction {} is {} but category `{}` is {}",
                txn.id, txn.kind, category.name, category.kind
            )),
            Some(_) => {}
        }
        if !(txn.amount.is_finite() && txn.amount > 0.0) {
            warnings.push(format!(
                "transaction {} has non-positive amount {}",
                txn.id, txn.amount
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finance_domain::{Category, EntryKind, Transaction, TransactionInput};
    use uuid::Uuid;

    #[test]
    fn memory_storage_starts_empty_and_keeps_last_save() {
        let storage = MemoryStorage::new();
        assert!(storage.load().unwrap().is_none());

        let state = FinanceState::seeded();
        storage.save(&state).unwrap();
        assert_eq!(storage.load().unwrap(), Some(state));
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn warnings_report_dangling_and_mismatched_references() {
        let mut state = FinanceState::default();
        let salary = Category::new("Salary", EntryKind::Income);
        let salary_id = salary.id;
        state.categories.push(salary);
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        state.transactions.push(Transaction::from_input(
            Uuid::new_v4(),
            TransactionInput::new(EntryKind::Expense, 10.0, salary_id, date),
        ));
        state.transactions.push(Transaction::from_input(
            Uuid::new_v4(),
            TransactionInput::new(EntryKind::Income, 10.0, Uuid::new_v4(), date),
        ));

        let warnings = state_warnings(&state);
        assert_eq!(warnings.len(), 2, "unexpected warnings: {warnings:?}");
        assert!(warnings.iter().any(|w| w.contains("missing category")));
        assert!(warnings.iter().any(|w| w.contains("is expense")));
    }

    #[test]
    fn clean_seed_has_no_warnings() {
        assert!(state_warnings(&FinanceState::seeded()).is_empty());
    }
}

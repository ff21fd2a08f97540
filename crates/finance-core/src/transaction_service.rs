//! Business logic helpers for recording transactions.

use finance_domain::{EntryKind, FinanceState, Transaction, TransactionInput};
use uuid::Uuid;

use crate::{resolve, CoreError, CoreResult};

/// Provides validated operations for [`Transaction`] entities.
pub struct TransactionService;

impl TransactionService {
    /// Validates and prepends a new transaction so listings stay newest-first.
    pub fn add(state: &mut FinanceState, input: TransactionInput) -> CoreResult<Transaction> {
        Self::validate(state, &input)?;
        let txn = Transaction::from_input(Uuid::new_v4(), input);
        state.transactions.insert(0, txn.clone());
        Ok(txn)
    }

    /// Replaces the transaction in place, keeping its id and position.
    pub fn edit(
        state: &mut FinanceState,
        id: Uuid,
        input: TransactionInput,
    ) -> CoreResult<Transaction> {
        if state.transaction(id).is_none() {
            return Err(CoreError::TransactionNotFound(id));
        }
        Self::validate(state, &input)?;
        let txn = state
            .transaction_mut(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        *txn = Transaction::from_input(id, input);
        Ok(txn.clone())
    }

    pub fn remove(state: &mut FinanceState, id: Uuid) -> CoreResult<Transaction> {
        let index = state
            .transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        Ok(state.transactions.remove(index))
    }

    pub fn list(state: &FinanceState, kind: Option<EntryKind>) -> Vec<Transaction> {
        state
            .transactions
            .iter()
            .filter(|txn| kind.map_or(true, |kind| txn.kind == kind))
            .cloned()
            .collect()
    }

    pub fn resolve<'a>(state: &'a FinanceState, token: &str) -> CoreResult<&'a Transaction> {
        resolve::by_id_or_prefix(&state.transactions, token)
    }

    /// Rejects non-positive amounts, unknown categories and kind mismatches.
    pub fn validate(state: &FinanceState, input: &TransactionInput) -> CoreResult<()> {
        if !input.amount.is_finite() || input.amount <= 0.0 {
            return Err(CoreError::Validation(format!(
                "amount must be greater than zero (got {})",
                input.amount
            )));
        }
        let category = state.category(input.category_id).ok_or_else(|| {
            CoreError::Validation(format!("category {} does not exist", input.category_id))
        })?;
        if category.kind != input.kind {
            return Err(CoreError::Validation(format!(
                "{} transaction cannot use {} category `{}`",
                input.kind, category.kind, category.name
            )));
        }
        Ok(())
    }
}

//! Aggregate totals derived from the transaction list.

use serde::{Deserialize, Serialize};

use crate::{common::EntryKind, transaction::Transaction};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

impl Stats {
    /// Folds the transactions once, summing amounts per kind.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (total_income, total_expense) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                    EntryKind::Income => (income + txn.amount, expense),
                    EntryKind::Expense => (income, expense + txn.amount),
                });
        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    pub fn total_for(&self, kind: EntryKind) -> f64 {
        match kind {
            EntryKind::Income => self.total_income,
            EntryKind::Expense => self.total_expense,
        }
    }
}

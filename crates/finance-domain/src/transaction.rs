//! Domain model for recorded income and expense transactions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub category_id: Uuid,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl Transaction {
    pub fn from_input(id: Uuid, input: TransactionInput) -> Self {
        Self {
            id,
            amount: input.amount,
            description: input.description,
            date: input.date,
            category_id: input.category_id,
            kind: input.kind,
        }
    }

    /// Amount with the sign implied by its kind.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            EntryKind::Income => self.amount,
            EntryKind::Expense => -self.amount,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{} {}]", self.id, self.kind, self.date)
    }
}

/// Transaction fields supplied by callers; the id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInput {
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    pub category_id: Uuid,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl TransactionInput {
    pub fn new(kind: EntryKind, amount: f64, category_id: Uuid, date: NaiveDate) -> Self {
        Self {
            amount,
            description: String::new(),
            date,
            category_id,
            kind,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl From<&Transaction> for TransactionInput {
    fn from(txn: &Transaction) -> Self {
        Self {
            amount: txn.amount,
            description: txn.description.clone(),
            date: txn.date,
            category_id: txn.category_id,
            kind: txn.kind,
        }
    }
}

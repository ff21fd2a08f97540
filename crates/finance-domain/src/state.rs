//! The persisted finance record and its first-run seed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    category::Category, common::EntryKind, stats::Stats, transaction::Transaction,
};

/// Default categories created on first run, in display order.
pub const DEFAULT_CATEGORIES: [(&str, EntryKind, &str); 12] = [
    ("工资", EntryKind::Income, "💰"),
    ("奖金", EntryKind::Income, "🎁"),
    ("投资", EntryKind::Income, "📈"),
    ("其他收入", EntryKind::Income, "💵"),
    ("餐饮", EntryKind::Expense, "🍔"),
    ("购物", EntryKind::Expense, "🛒"),
    ("交通", EntryKind::Expense, "🚗"),
    ("住房", EntryKind::Expense, "🏠"),
    ("娱乐", EntryKind::Expense, "🎬"),
    ("医疗", EntryKind::Expense, "💊"),
    ("教育", EntryKind::Expense, "📚"),
    ("其他支出", EntryKind::Expense, "📝"),
];

/// Label shown for transactions whose category no longer resolves.
pub const UNCATEGORIZED_LABEL: &str = "未分类";

/// Complete store contents: transactions newest-first, categories in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinanceState {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl FinanceState {
    /// Empty transaction list plus the twelve default categories with fresh ids.
    pub fn seeded() -> Self {
        Self {
            transactions: Vec::new(),
            categories: default_categories(),
        }
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    /// Number of transactions pointing at `category_id`.
    pub fn references_to(&self, category_id: Uuid) -> usize {
        self.transactions
            .iter()
            .filter(|txn| txn.category_id == category_id)
            .count()
    }

    pub fn stats(&self) -> Stats {
        Stats::from_transactions(&self.transactions)
    }
}

pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, kind, icon)| Category::new(*name, *kind).with_icon(*icon))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seeded_state_has_four_income_and_eight_expense_categories() {
        let state = FinanceState::seeded();
        let income = state
            .categories
            .iter()
            .filter(|c| c.kind == EntryKind::Income)
            .count();
        let expense = state
            .categories
            .iter()
            .filter(|c| c.kind == EntryKind::Expense)
            .count();
        assert_eq!((income, expense), (4, 8));
        assert!(state.transactions.is_empty());
    }

    #[test]
    fn seeded_ids_are_unique() {
        let state = FinanceState::seeded();
        let ids: HashSet<_> = state.categories.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), state.categories.len());
    }

    #[test]
    fn missing_collections_deserialize_as_empty() {
        let state: FinanceState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, FinanceState::default());
    }
}

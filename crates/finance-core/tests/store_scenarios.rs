use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use finance_core::{CoreError, FinanceStore, MemoryStorage};
use finance_domain::{CategoryInput, EntryKind, FinanceState, Stats, TransactionInput};

fn empty_store() -> FinanceStore {
    FinanceStore::open(MemoryStorage::with_state(FinanceState::default())).expect("open store")
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid date")
}

#[test]
fn salary_then_income_shows_up_in_stats() {
    let store = empty_store();
    let salary = store
        .add_category(CategoryInput::new("工资", EntryKind::Income))
        .expect("add category");
    store
        .add_transaction(TransactionInput::new(
            EntryKind::Income,
            100.0,
            salary.id,
            date("2024-01-01"),
        ))
        .expect("add transaction");

    assert_eq!(
        store.stats(),
        Stats {
            total_income: 100.0,
            total_expense: 0.0,
            balance: 100.0,
        }
    );
}

#[test]
fn referenced_category_cannot_be_deleted_until_transaction_is_gone() {
    let store = empty_store();
    let food = store
        .add_category(CategoryInput::new("Food", EntryKind::Expense))
        .unwrap();
    let txn = store
        .add_transaction(TransactionInput::new(
            EntryKind::Expense,
            50.0,
            food.id,
            date("2024-01-02"),
        ))
        .unwrap();

    let before = store.snapshot();
    let err = store.delete_category(food.id).expect_err("category in use");
    assert!(matches!(
        err,
        CoreError::CategoryInUse {
            transactions: 1,
            ..
        }
    ));
    assert_eq!(store.snapshot(), before);

    store.delete_transaction(txn.id).expect("delete transaction");
    let removed = store.delete_category(food.id).expect("delete category");
    assert_eq!(removed.id, food.id);
    assert!(store.list_categories(None).is_empty());
}

#[test]
fn fresh_store_seeds_four_income_and_eight_expense_categories() {
    let store = FinanceStore::open(MemoryStorage::new()).unwrap();
    assert_eq!(store.list_categories(Some(EntryKind::Income)).len(), 4);
    assert_eq!(store.list_categories(Some(EntryKind::Expense)).len(), 8);
}

#[test]
fn stats_track_each_kind_and_balance_exactly() {
    let store = FinanceStore::open(MemoryStorage::new()).unwrap();
    let income = store.list_categories(Some(EntryKind::Income))[0].clone();
    let expense = store.list_categories(Some(EntryKind::Expense))[0].clone();

    let amounts = [(EntryKind::Income, 1200.5), (EntryKind::Expense, 80.25)];
    let mut expected = Stats::default();
    for (kind, amount) in amounts {
        let category = if kind == EntryKind::Income { &income } else { &expense };
        store
            .add_transaction(TransactionInput::new(
                kind,
                amount,
                category.id,
                date("2024-02-01"),
            ))
            .unwrap();
        match kind {
            EntryKind::Income => expected.total_income += amount,
            EntryKind::Expense => expected.total_expense += amount,
        }
        let stats = store.stats();
        assert_eq!(stats.total_income, expected.total_income);
        assert_eq!(stats.total_expense, expected.total_expense);
        assert_eq!(stats.balance, stats.total_income - stats.total_expense);
    }
}

#[test]
fn deleting_unused_category_removes_exactly_that_category() {
    let store = FinanceStore::open(MemoryStorage::new()).unwrap();
    let before = store.list_categories(None);
    let target = before[6].clone();

    store.delete_category(target.id).expect("unused category");

    let after = store.list_categories(None);
    let mut expected = before.clone();
    expected.remove(6);
    assert_eq!(after, expected);
}

#[test]
fn editing_a_transaction_keeps_its_slot() {
    let store = FinanceStore::open(MemoryStorage::new()).unwrap();
    let expense = store.list_categories(Some(EntryKind::Expense))[1].clone();
    let ids: Vec<_> = (1..=4)
        .map(|n| {
            store
                .add_transaction(TransactionInput::new(
                    EntryKind::Expense,
                    n as f64,
                    expense.id,
                    date("2024-03-01"),
                ))
                .unwrap()
                .id
        })
        .collect();

    let order_before: Vec<_> = store.list_transactions(None).iter().map(|t| t.id).collect();
    store
        .edit_transaction(
            ids[2],
            TransactionInput::new(EntryKind::Expense, 99.0, expense.id, date("2024-03-05"))
                .with_description("edited"),
        )
        .unwrap();
    let order_after: Vec<_> = store.list_transactions(None).iter().map(|t| t.id).collect();
    assert_eq!(order_before, order_after);
    assert_eq!(store.transaction(ids[2]).unwrap().description, "edited");
}

#[test]
fn concurrent_writers_never_orphan_a_transaction() {
    let store = Arc::new(empty_store());
    let categories: Vec<_> = (0..8)
        .map(|n| {
            store
                .add_category(CategoryInput::new(format!("c{n}"), EntryKind::Expense))
                .unwrap()
        })
        .collect();

    let mut handles = Vec::new();
    for (n, category) in categories.iter().cloned().enumerate() {
        let adder = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..20 {
                let _ = adder.add_transaction(TransactionInput::new(
                    EntryKind::Expense,
                    1.0 + n as f64,
                    category.id,
                    NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                ));
            }
        }));
        let deleter = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for _ in 0..20 {
                let _ = deleter.delete_category(category.id);
            }
        }));
    }
    for handle in handles {
        handle.join().expect("worker thread");
    }

    let state = store.snapshot();
    for txn in &state.transactions {
        assert!(
            state.category(txn.category_id).is_some(),
            "transaction {} points at a deleted category",
            txn.id
        );
    }
}

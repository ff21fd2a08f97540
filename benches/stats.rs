use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finance_core::{FinanceStore, MemoryStorage};
use finance_domain::{EntryKind, FinanceState, Transaction, TransactionInput};
use uuid::Uuid;

fn build_store(txn_count: usize) -> FinanceStore {
    let mut state = FinanceState::seeded();
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    for idx in 0..txn_count {
        let category = &state.categories[idx % state.categories.len()];
        let input = TransactionInput::new(
            category.kind,
            10.0 + (idx % 250) as f64 * 0.37,
            category.id,
            start + Duration::days((idx % 365) as i64),
        );
        state
            .transactions
            .push(Transaction::from_input(Uuid::new_v4(), input));
    }
    FinanceStore::open(MemoryStorage::with_state(state)).expect("open store")
}

fn bench_stats(c: &mut Criterion) {
    let store = build_store(10_000);

    c.bench_function("stats_10k", |b| {
        b.iter(|| black_box(store.stats()));
    });

    c.bench_function("list_expenses_10k", |b| {
        b.iter(|| black_box(store.list_transactions(Some(EntryKind::Expense))));
    });
}

criterion_group!(benches, bench_stats);
criterion_main!(benches);

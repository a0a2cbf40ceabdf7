//! Aggregation Benchmarks - Dashboard Hot Path
//!
//! Every dashboard refresh recomputes statistics, the ranking and the
//! filtered listings from full collections. These benchmarks keep that
//! cheap for offices with a few thousand transactions.
//!
//! Run with: cargo bench --bench aggregation_bench

use chrono::{Days, NaiveDate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use ltms::domain::filter::{FilterSpec, apply_filters};
use ltms::domain::monthly::monthly_comparison;
use ltms::domain::ranking::rank_lawyers;
use ltms::domain::record::{Lawyer, PaymentStatus, Transaction};
use ltms::domain::statistics::statistics;

const LAWYERS: usize = 50;
const TRANSACTIONS: usize = 5_000;

fn dataset() -> (Vec<Lawyer>, Vec<Transaction>) {
    let lawyers: Vec<Lawyer> = (0..LAWYERS)
        .map(|i| Lawyer::new(format!("Lawyer {i}"), format!("LAW-2024-{i:03}"), "0501234567"))
        .collect();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let transactions = (0..TRANSACTIONS)
        .map(|i| {
            Transaction::new(
                lawyers[i % LAWYERS].id.clone(),
                (i % 12 + 1) as u32,
                start + Days::new((i % 500) as u64),
                Decimal::new((i as i64 % 900 + 100) * 100, 2),
                i % 3 != 0,
            )
        })
        .collect();

    (lawyers, transactions)
}

/// Benchmark global statistics.
fn bench_statistics(c: &mut Criterion) {
    let (lawyers, transactions) = dataset();

    c.bench_function("statistics_5k", |b| {
        b.iter(|| statistics(black_box(&lawyers), black_box(&transactions)));
    });
}

/// Benchmark the lawyer ranking (one pass per lawyer).
fn bench_ranking(c: &mut Criterion) {
    let (lawyers, transactions) = dataset();

    c.bench_function("rank_lawyers_50x5k", |b| {
        b.iter(|| rank_lawyers(black_box(&lawyers), black_box(&transactions)));
    });
}

/// Benchmark the monthly comparison.
fn bench_monthly(c: &mut Criterion) {
    let (_, transactions) = dataset();
    let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();

    c.bench_function("monthly_comparison_5k", |b| {
        b.iter(|| monthly_comparison(black_box(&transactions), black_box(today)));
    });
}

/// Benchmark search + date + status filtering.
fn bench_filters(c: &mut Criterion) {
    let (_, transactions) = dataset();
    let spec = FilterSpec {
        search: "2024-06".into(),
        date_from: NaiveDate::from_ymd_opt(2024, 3, 1),
        date_to: NaiveDate::from_ymd_opt(2024, 9, 30),
        payment_status: PaymentStatus::Unpaid,
    };

    c.bench_function("apply_filters_5k", |b| {
        b.iter(|| apply_filters(black_box(&transactions), black_box(&spec)));
    });
}

criterion_group!(
    benches,
    bench_statistics,
    bench_ranking,
    bench_monthly,
    bench_filters,
);
criterion_main!(benches);

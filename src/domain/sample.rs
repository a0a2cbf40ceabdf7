//! Demonstration data seeded into an empty store.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::record::{Lawyer, Transaction};

fn lawyer(id: &str, name: &str, professional_id: &str, phone: &str) -> Lawyer {
    Lawyer {
        id: id.to_string(),
        name: name.to_string(),
        professional_id: professional_id.to_string(),
        phone: phone.to_string(),
    }
}

/// Calendar date for a sample literal. Only called in const items, so a bad
/// date fails the build.
const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid sample date"),
    }
}

const JAN_05: NaiveDate = ymd(2025, 1, 5);
const JAN_06: NaiveDate = ymd(2025, 1, 6);
const JAN_07: NaiveDate = ymd(2025, 1, 7);
const JAN_08: NaiveDate = ymd(2025, 1, 8);
const DEC_20: NaiveDate = ymd(2024, 12, 20);

fn transaction(
    id: &str,
    lawyer_id: &str,
    document_count: u32,
    date: NaiveDate,
    amount: i64,
    is_paid: bool,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        lawyer_id: lawyer_id.to_string(),
        document_count,
        date,
        amount: Decimal::from(amount),
        is_paid,
    }
}

/// The three sample lawyers.
pub fn sample_lawyers() -> Vec<Lawyer> {
    vec![
        lawyer("1", "أحمد محمد العلي", "LAW-2024-001", "0501234567"),
        lawyer("2", "فاطمة خالد السالم", "LAW-2024-002", "0507654321"),
        lawyer("3", "محمد عبدالله الحربي", "LAW-2024-003", "0509876543"),
    ]
}

/// The five sample transactions, referencing [`sample_lawyers`].
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        transaction("1", "1", 5, JAN_05, 2500, true),
        transaction("2", "1", 3, JAN_07, 1500, false),
        transaction("3", "2", 8, JAN_06, 4000, true),
        transaction("4", "2", 2, JAN_08, 1000, false),
        transaction("5", "3", 10, DEC_20, 5000, true),
    ]
}

//! Paid/unpaid rollups over transaction collections.
//!
//! Pure functions: callers load the collections, these only aggregate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::record::{Lawyer, Transaction};

/// Inclusive date range; `None` on either side leaves it open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Range bounded on both sides.
    pub const fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Whether `date` falls within the range (bounds inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

/// Paid/unpaid split over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentTotals {
    pub paid_amount: Decimal,
    pub unpaid_amount: Decimal,
    pub paid_count: usize,
    pub unpaid_count: usize,
}

impl PaymentTotals {
    /// Single pass over `transactions`, splitting amounts by payment flag.
    ///
    /// Sums saturate at `Decimal::MAX` instead of overflowing.
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Self::default(), |mut totals, t| {
                if t.is_paid {
                    totals.paid_amount = totals.paid_amount.saturating_add(t.amount);
                    totals.paid_count += 1;
                } else {
                    totals.unpaid_amount = totals.unpaid_amount.saturating_add(t.amount);
                    totals.unpaid_count += 1;
                }
                totals
            })
    }

    pub fn total_amount(&self) -> Decimal {
        self.paid_amount.saturating_add(self.unpaid_amount)
    }

    pub const fn total_count(&self) -> usize {
        self.paid_count + self.unpaid_count
    }
}

/// Global dashboard statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_transactions: usize,
    pub total_paid: Decimal,
    pub total_unpaid: Decimal,
    pub total_amount: Decimal,
    pub total_lawyers: usize,
    pub paid_count: usize,
    pub unpaid_count: usize,
}

/// Compute the global statistics over both collections.
pub fn statistics(lawyers: &[Lawyer], transactions: &[Transaction]) -> Statistics {
    let totals = PaymentTotals::from_transactions(transactions);

    Statistics {
        total_transactions: transactions.len(),
        total_paid: totals.paid_amount,
        total_unpaid: totals.unpaid_amount,
        total_amount: totals.total_amount(),
        total_lawyers: lawyers.len(),
        paid_count: totals.paid_count,
        unpaid_count: totals.unpaid_count,
    }
}

/// Statistics scoped to one lawyer and an optional date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LawyerStatistics {
    /// The lawyer's transactions that fell inside the range, in stored order.
    pub transactions: Vec<Transaction>,
    pub total_transactions: usize,
    pub total_paid: Decimal,
    pub total_unpaid: Decimal,
    pub total_amount: Decimal,
    pub total_documents: u64,
    pub paid_count: usize,
    pub unpaid_count: usize,
}

/// Compute statistics for `lawyer_id` over transactions dated within `range`.
pub fn lawyer_statistics(
    transactions: &[Transaction],
    lawyer_id: &str,
    range: DateRange,
) -> LawyerStatistics {
    let scoped: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.lawyer_id == lawyer_id && range.contains(t.date))
        .cloned()
        .collect();

    let totals = PaymentTotals::from_transactions(&scoped);
    let total_documents = scoped.iter().map(|t| u64::from(t.document_count)).sum();

    LawyerStatistics {
        total_transactions: scoped.len(),
        total_paid: totals.paid_amount,
        total_unpaid: totals.unpaid_amount,
        total_amount: totals.total_amount(),
        total_documents,
        paid_count: totals.paid_count,
        unpaid_count: totals.unpaid_count,
        transactions: scoped,
    }
}

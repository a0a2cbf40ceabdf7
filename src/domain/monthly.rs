//! Month-over-month comparison.
//!
//! The reference day is always passed in, so results are reproducible;
//! the wall clock only enters through the `Clock` port.

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::record::Transaction;
use super::statistics::{DateRange, PaymentTotals};

/// First day of `date`'s month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Last day of `date`'s month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// First day of the month before `date`'s month.
pub fn last_month_start(date: NaiveDate) -> NaiveDate {
    month_start(last_month_end(date))
}

/// Last day of the month before `date`'s month.
pub fn last_month_end(date: NaiveDate) -> NaiveDate {
    month_start(date).pred_opt().unwrap_or(NaiveDate::MIN)
}

/// Count and amount summary for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub count: usize,
    pub amount: Decimal,
    /// Number of paid transactions.
    pub paid: usize,
    /// Number of unpaid transactions.
    pub unpaid: usize,
}

impl MonthSummary {
    fn over(transactions: &[Transaction], range: DateRange) -> Self {
        let totals =
            PaymentTotals::from_transactions(transactions.iter().filter(|t| range.contains(t.date)));
        Self {
            count: totals.total_count(),
            amount: totals.total_amount(),
            paid: totals.paid_count,
            unpaid: totals.unpaid_count,
        }
    }
}

/// This month (to date) against the whole previous month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyComparison {
    pub this_month: MonthSummary,
    pub last_month: MonthSummary,
}

impl MonthlyComparison {
    /// Amount change from last month to this month, in percent.
    ///
    /// `None` when last month had no billed amount, or when the change does
    /// not fit in a `Decimal`.
    pub fn amount_change_percent(&self) -> Option<Decimal> {
        self.this_month
            .amount
            .checked_sub(self.last_month.amount)?
            .checked_div(self.last_month.amount)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}

/// Partition `transactions` into this month `[1st, today]` and last month.
pub fn monthly_comparison(transactions: &[Transaction], today: NaiveDate) -> MonthlyComparison {
    let this_month = DateRange::between(month_start(today), today);
    let last_month = DateRange::between(last_month_start(today), last_month_end(today));

    MonthlyComparison {
        this_month: MonthSummary::over(transactions, this_month),
        last_month: MonthSummary::over(transactions, last_month),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::sample_transactions;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(date(2025, 3, 17)), date(2025, 3, 1));
        assert_eq!(month_end(date(2025, 3, 17)), date(2025, 3, 31));
        assert_eq!(month_end(date(2024, 2, 10)), date(2024, 2, 29));
        assert_eq!(last_month_start(date(2025, 3, 17)), date(2025, 2, 1));
        assert_eq!(last_month_end(date(2025, 3, 17)), date(2025, 2, 28));
    }

    #[test]
    fn test_january_rolls_back_a_year() {
        assert_eq!(last_month_start(date(2025, 1, 9)), date(2024, 12, 1));
        assert_eq!(last_month_end(date(2025, 1, 9)), date(2024, 12, 31));
    }

    #[test]
    fn test_sample_comparison_in_january() {
        let cmp = monthly_comparison(&sample_transactions(), date(2025, 1, 31));
        assert_eq!(cmp.this_month.count, 4);
        assert_eq!(cmp.this_month.amount, dec!(9000));
        assert_eq!(cmp.this_month.paid, 2);
        assert_eq!(cmp.this_month.unpaid, 2);

        assert_eq!(cmp.last_month.count, 1);
        assert_eq!(cmp.last_month.amount, dec!(5000));
        assert_eq!(cmp.last_month.paid, 1);
        assert_eq!(cmp.last_month.unpaid, 0);

        assert_eq!(cmp.amount_change_percent(), Some(dec!(80)));
    }

    #[test]
    fn test_this_month_stops_at_today() {
        let cmp = monthly_comparison(&sample_transactions(), date(2025, 1, 6));
        assert_eq!(cmp.this_month.count, 2);
        assert_eq!(cmp.this_month.amount, dec!(6500));
    }

    #[test]
    fn test_no_previous_amount() {
        let cmp = monthly_comparison(&sample_transactions(), date(2025, 6, 1));
        assert_eq!(cmp.this_month, MonthSummary::default());
        assert_eq!(cmp.last_month, MonthSummary::default());
        assert_eq!(cmp.amount_change_percent(), None);
    }

    #[test]
    fn test_change_percent_overflow_is_none() {
        let cmp = MonthlyComparison {
            this_month: MonthSummary {
                count: 2,
                amount: Decimal::MAX,
                paid: 2,
                unpaid: 0,
            },
            last_month: MonthSummary {
                count: 1,
                amount: dec!(0.01),
                paid: 0,
                unpaid: 1,
            },
        };
        assert_eq!(cmp.amount_change_percent(), None);
    }
}

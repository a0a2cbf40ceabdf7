//! Lawyer ranking by billed amount.

use rust_decimal::Decimal;
use serde::Serialize;

use super::record::{Lawyer, Transaction};
use super::statistics::PaymentTotals;

/// One row of the ranking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LawyerRanking {
    pub lawyer: Lawyer,
    pub transaction_count: usize,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub unpaid_amount: Decimal,
    /// `paid / total * 100`, or zero when nothing was billed.
    pub paid_percentage: Decimal,
}

/// Share of `total` that was paid, in percent. Zero when `total` is zero.
pub fn paid_percentage(paid: Decimal, total: Decimal) -> Decimal {
    paid.checked_div(total)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Rank every lawyer by total billed amount, highest first.
///
/// Lawyers without transactions are included with zero totals. The sort
/// is stable, so lawyers with equal totals keep their stored order.
pub fn rank_lawyers(lawyers: &[Lawyer], transactions: &[Transaction]) -> Vec<LawyerRanking> {
    let mut ranking: Vec<LawyerRanking> = lawyers
        .iter()
        .map(|lawyer| {
            let totals = PaymentTotals::from_transactions(
                transactions.iter().filter(|t| t.lawyer_id == lawyer.id),
            );
            let total_amount = totals.total_amount();
            LawyerRanking {
                lawyer: lawyer.clone(),
                transaction_count: totals.total_count(),
                total_amount,
                paid_amount: totals.paid_amount,
                unpaid_amount: totals.unpaid_amount,
                paid_percentage: paid_percentage(totals.paid_amount, total_amount),
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::domain::sample::{sample_lawyers, sample_transactions};
    use rust_decimal_macros::dec;

    #[test]
    fn test_sample_ranking_order() {
        let ranking = rank_lawyers(&sample_lawyers(), &sample_transactions());
        let ids: Vec<&str> = ranking.iter().map(|r| r.lawyer.id.as_str()).collect();
        // totals: 1 → 4000, 2 → 5000, 3 → 5000
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sample_ranking_amounts() {
        let ranking = rank_lawyers(&sample_lawyers(), &sample_transactions());
        let first = &ranking[0];
        assert_eq!(first.transaction_count, 2);
        assert_eq!(first.total_amount, dec!(5000));
        assert_eq!(first.paid_amount, dec!(4000));
        assert_eq!(first.unpaid_amount, dec!(1000));
        assert_eq!(first.paid_percentage, dec!(80));

        let fully_paid = &ranking[1];
        assert_eq!(fully_paid.paid_percentage, dec!(100));
    }

    #[test]
    fn test_lawyer_without_transactions() {
        let mut lawyers = sample_lawyers();
        lawyers.push(Lawyer::new("Idle", "LAW-9", "0500000000"));
        let ranking = rank_lawyers(&lawyers, &sample_transactions());
        let last = ranking.last().unwrap();
        assert_eq!(last.lawyer.name, "Idle");
        assert_eq!(last.transaction_count, 0);
        assert_eq!(last.total_amount, Decimal::ZERO);
        assert_eq!(last.paid_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_paid_percentage_zero_total() {
        assert_eq!(paid_percentage(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(paid_percentage(dec!(1), dec!(4)), dec!(25));
    }

    fn huge(id: &str, lawyer_id: &str, is_paid: bool) -> Transaction {
        Transaction {
            id: id.to_string(),
            lawyer_id: lawyer_id.to_string(),
            document_count: 1,
            date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            amount: dec!(50000000000000000000000000000),
            is_paid,
        }
    }

    #[test]
    fn test_huge_amounts_do_not_overflow() {
        let txs = [huge("a", "1", true), huge("b", "1", true), huge("c", "1", false)];
        let ranking = rank_lawyers(&sample_lawyers(), &txs);
        assert_eq!(ranking[0].lawyer.id, "1");
        assert_eq!(ranking[0].total_amount, Decimal::MAX);
        assert_eq!(ranking[0].paid_percentage, dec!(100));
        assert_eq!(paid_percentage(Decimal::MAX, Decimal::MAX), dec!(100));
    }
}

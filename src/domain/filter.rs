//! Free-text, date-range and payment-status filtering.
//!
//! Works over any record type that can describe its fields as text. The
//! search is deliberately permissive: a record matches when ANY field's
//! text contains the search term, case-insensitively.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::{Lawyer, PaymentStatus, Transaction};

/// A record that can be filtered.
pub trait Filterable {
    /// Every field value rendered as text, in declaration order.
    fn field_texts(&self) -> Vec<String>;

    /// The record's date, if it has one.
    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// The record's payment flag, if it has one.
    fn is_paid(&self) -> Option<bool> {
        None
    }
}

impl Filterable for Lawyer {
    fn field_texts(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.professional_id.clone(),
            self.phone.clone(),
        ]
    }
}

impl Filterable for Transaction {
    fn field_texts(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.lawyer_id.clone(),
            self.document_count.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
            // 2500.50 → "2500.5", 2500 → "2500"
            self.amount.normalize().to_string(),
            self.is_paid.to_string(),
        ]
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn is_paid(&self) -> Option<bool> {
        Some(self.is_paid)
    }
}

/// Filter criteria; every set criterion must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Substring searched in every field; empty disables the search.
    #[serde(default)]
    pub search: String,
    /// Inclusive lower date bound.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl FilterSpec {
    /// Whether `record` passes every criterion.
    ///
    /// Records without a date never pass a date bound, and records without
    /// a payment flag never pass a paid/unpaid selection.
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let found = record
                .field_texts()
                .iter()
                .any(|text| text.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        if let Some(from) = self.date_from {
            if !record.date().is_some_and(|d| d >= from) {
                return false;
            }
        }

        if let Some(to) = self.date_to {
            if !record.date().is_some_and(|d| d <= to) {
                return false;
            }
        }

        match self.payment_status.as_flag() {
            Some(wanted) => record.is_paid() == Some(wanted),
            None => true,
        }
    }
}

/// Return the records matching `spec`, in input order.
pub fn apply_filters<T>(records: &[T], spec: &FilterSpec) -> Vec<T>
where
    T: Filterable + Clone,
{
    records.iter().filter(|r| spec.matches(*r)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{sample_lawyers, sample_transactions};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids<T: Filterable>(records: &[T]) -> Vec<String> {
        records.iter().map(|r| r.field_texts()[0].clone()).collect()
    }

    #[test]
    fn test_default_spec_keeps_everything() {
        let txs = sample_transactions();
        assert_eq!(apply_filters(&txs, &FilterSpec::default()), txs);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let spec = FilterSpec {
            search: "law-2024-002".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply_filters(&sample_lawyers(), &spec)), vec!["2"]);
    }

    #[test]
    fn test_search_matches_numeric_and_boolean_fields() {
        let txs = sample_transactions();
        let by_amount = FilterSpec {
            search: "4000".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply_filters(&txs, &by_amount)), vec!["3"]);

        let by_flag = FilterSpec {
            search: "FALSE".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply_filters(&txs, &by_flag)), vec!["2", "4"]);

        let by_date = FilterSpec {
            search: "2024-12".to_string(),
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply_filters(&txs, &by_date)), vec!["5"]);
    }

    #[test]
    fn test_paid_within_range() {
        let spec = FilterSpec {
            date_from: Some(date(2025, 1, 5)),
            date_to: Some(date(2025, 1, 6)),
            payment_status: PaymentStatus::Paid,
            ..FilterSpec::default()
        };
        assert_eq!(ids(&apply_filters(&sample_transactions(), &spec)), vec!["1", "3"]);
    }

    #[test]
    fn test_unpaid_only() {
        let spec = FilterSpec {
            payment_status: PaymentStatus::Unpaid,
            ..FilterSpec::default()
        };
        let out = apply_filters(&sample_transactions(), &spec);
        assert!(out.iter().all(|t| !t.is_paid));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_undated_records_fail_date_bounds() {
        let spec = FilterSpec {
            date_from: Some(date(2000, 1, 1)),
            ..FilterSpec::default()
        };
        assert!(apply_filters(&sample_lawyers(), &spec).is_empty());

        let paid = FilterSpec {
            payment_status: PaymentStatus::Paid,
            ..FilterSpec::default()
        };
        assert!(apply_filters(&sample_lawyers(), &paid).is_empty());
    }

    #[test]
    fn test_input_untouched() {
        let txs = sample_transactions();
        let before = txs.clone();
        let spec = FilterSpec {
            search: "nothing-matches".to_string(),
            ..FilterSpec::default()
        };
        assert!(apply_filters(&txs, &spec).is_empty());
        assert_eq!(txs, before);
    }
}

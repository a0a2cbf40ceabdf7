//! Reports Use Case - Per-Lawyer Statements and Filtered Listings

use serde::Serialize;

use crate::domain::filter::{FilterSpec, apply_filters};
use crate::domain::record::{Lawyer, Transaction};
use crate::domain::statistics::{DateRange, LawyerStatistics, lawyer_statistics};
use crate::ports::repository::{Repository, RepositoryError};

/// A lawyer with their statistics over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LawyerReport {
  pub lawyer: Lawyer,
  #[serde(flatten)]
  pub statistics: LawyerStatistics,
}

/// Statement for one lawyer; fails if the lawyer does not exist.
pub async fn lawyer_report<R>(
  repo: &R,
  lawyer_id: &str,
  range: DateRange,
) -> Result<LawyerReport, RepositoryError>
where
  R: Repository + ?Sized,
{
  let lawyer = repo
    .lawyer(lawyer_id)
    .await
    .ok_or_else(|| RepositoryError::lawyer_not_found(lawyer_id))?;
  let transactions = repo.transactions_by_lawyer(lawyer_id).await;

  Ok(LawyerReport {
    statistics: lawyer_statistics(&transactions, lawyer_id, range),
    lawyer,
  })
}

/// Transactions matching `spec`, optionally limited to one lawyer.
pub async fn find_transactions<R>(
  repo: &R,
  lawyer_id: Option<&str>,
  spec: &FilterSpec,
) -> Vec<Transaction>
where
  R: Repository + ?Sized,
{
  let transactions = match lawyer_id {
    Some(id) => repo.transactions_by_lawyer(id).await,
    None => repo.transactions().await,
  };
  apply_filters(&transactions, spec)
}

/// Lawyers matching a free-text search.
pub async fn find_lawyers<R>(repo: &R, search: &str) -> Vec<Lawyer>
where
  R: Repository + ?Sized,
{
  let spec = FilterSpec {
    search: search.to_string(),
    ..FilterSpec::default()
  };
  apply_filters(&repo.lawyers().await, &spec)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::persistence::{MemoryStore, RepositoryImpl};
  use crate::domain::record::PaymentStatus;
  use chrono::NaiveDate;
  use rust_decimal_macros::dec;

  async fn seeded() -> RepositoryImpl<MemoryStore> {
    let repo = RepositoryImpl::from_store(MemoryStore::new()).unwrap();
    repo.init().await.unwrap();
    repo
  }

  #[tokio::test]
  async fn test_lawyer_report() {
    let repo = seeded().await;
    let report = lawyer_report(&repo, "2", DateRange::default()).await.unwrap();
    assert_eq!(report.lawyer.professional_id, "LAW-2024-002");
    assert_eq!(report.statistics.total_amount, dec!(5000));
    assert_eq!(report.statistics.total_documents, 10);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["totalDocuments"], 10);
    assert_eq!(json["lawyer"]["id"], "2");
  }

  #[tokio::test]
  async fn test_report_for_missing_lawyer() {
    let repo = seeded().await;
    let err = lawyer_report(&repo, "nope", DateRange::default()).await.unwrap_err();
    assert!(err.is_not_found());
  }

  #[tokio::test]
  async fn test_find_transactions_scoped() {
    let repo = seeded().await;
    let spec = FilterSpec {
      payment_status: PaymentStatus::Unpaid,
      date_to: NaiveDate::from_ymd_opt(2025, 1, 7),
      ..FilterSpec::default()
    };
    let all = find_transactions(&repo, None, &spec).await;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "2");

    assert!(find_transactions(&repo, Some("2"), &spec).await.is_empty());
  }

  #[tokio::test]
  async fn test_find_lawyers() {
    let repo = seeded().await;
    assert_eq!(find_lawyers(&repo, "0507654321").await.len(), 1);
    assert_eq!(find_lawyers(&repo, "LAW-2024").await.len(), 3);
    assert_eq!(find_lawyers(&repo, "").await.len(), 3);
  }
}

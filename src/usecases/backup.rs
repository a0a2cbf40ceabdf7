//! Backup Use Case - JSON Export and Import
//!
//! Export bundles both collections with a timestamp. Import parses and
//! validates the whole document before touching storage, then replaces
//! each collection present in it (no merge).
//!
//! Import flow:
//! 1. Parse the document (malformed JSON → nothing written)
//! 2. Decode and validate every record (any failure → nothing written)
//! 3. Replace lawyers, then transactions, when present

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::record::{Lawyer, Transaction};
use crate::domain::validation::{ValidationError, validate_lawyer, validate_transaction};
use crate::ports::clock::Clock;
use crate::ports::repository::{RecordKind, Repository, RepositoryError};

/// Exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backup {
  pub lawyers: Vec<Lawyer>,
  pub transactions: Vec<Transaction>,
  pub export_date: DateTime<Utc>,
}

/// Incoming document; both collections are optional.
#[derive(Debug, Deserialize)]
struct ImportDocument {
  #[serde(default)]
  lawyers: Option<Vec<serde_json::Value>>,
  #[serde(default)]
  transactions: Option<Vec<serde_json::Value>>,
}

/// Why an import was refused or failed.
#[derive(Debug, Error)]
pub enum ImportError {
  /// The file is not a JSON object of the expected shape.
  #[error("backup is not valid JSON: {0}")]
  Parse(#[from] serde_json::Error),
  /// A record has the wrong shape.
  #[error("{kind} #{index} is malformed: {reason}")]
  MalformedRecord {
    kind: RecordKind,
    index: usize,
    reason: String,
  },
  /// A record decoded but broke a field rule.
  #[error("{kind} #{index} is invalid: {source}")]
  InvalidRecord {
    kind: RecordKind,
    index: usize,
    #[source]
    source: ValidationError,
  },
  /// Storage rejected the replacement.
  #[error(transparent)]
  Repository(#[from] RepositoryError),
}

/// What an import replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
  /// Lawyers written, if the document had a `lawyers` key.
  pub lawyers: Option<usize>,
  /// Transactions written, if the document had a `transactions` key.
  pub transactions: Option<usize>,
}

/// `ltms_backup_<YYYY-MM-DD>.json`
pub fn backup_file_name(date: NaiveDate) -> String {
  format!("ltms_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Snapshot both collections.
pub async fn export_data<R, C>(repo: &R, clock: &C) -> Backup
where
  R: Repository + ?Sized,
  C: Clock + ?Sized,
{
  Backup {
    lawyers: repo.lawyers().await,
    transactions: repo.transactions().await,
    export_date: clock.now(),
  }
}

/// Export to `<dir>/ltms_backup_<date>.json`, returning the path written.
#[instrument(skip(repo, clock))]
pub async fn export_to_dir<R, C>(repo: &R, clock: &C, dir: &Path) -> anyhow::Result<PathBuf>
where
  R: Repository + ?Sized,
  C: Clock + ?Sized,
{
  let backup = export_data(repo, clock).await;
  let path = dir.join(backup_file_name(clock.today()));
  let json = serde_json::to_string_pretty(&backup).context("Failed to serialize backup")?;

  tokio::fs::write(&path, json)
    .await
    .with_context(|| format!("Failed to write backup to {}", path.display()))?;

  info!(
    path = %path.display(),
    lawyers = backup.lawyers.len(),
    transactions = backup.transactions.len(),
    "Backup exported"
  );
  Ok(path)
}

fn decode_all<T: DeserializeOwned>(
  kind: RecordKind,
  values: Vec<serde_json::Value>,
  validate: fn(&T) -> Result<(), ValidationError>,
) -> Result<Vec<T>, ImportError> {
  values
    .into_iter()
    .enumerate()
    .map(|(index, value)| {
      let record: T = serde_json::from_value(value).map_err(|e| ImportError::MalformedRecord {
        kind,
        index,
        reason: e.to_string(),
      })?;
      validate(&record).map_err(|source| ImportError::InvalidRecord {
        kind,
        index,
        source,
      })?;
      Ok(record)
    })
    .collect()
}

/// Replace stored collections with the ones in `bytes`.
#[instrument(skip(repo, bytes), fields(bytes = bytes.len()))]
pub async fn import_data<R>(repo: &R, bytes: &[u8]) -> Result<ImportSummary, ImportError>
where
  R: Repository + ?Sized,
{
  let document: ImportDocument = serde_json::from_slice(bytes)?;

  let lawyers = document
    .lawyers
    .map(|values| decode_all(RecordKind::Lawyer, values, validate_lawyer))
    .transpose()?;
  let transactions = document
    .transactions
    .map(|values| decode_all(RecordKind::Transaction, values, validate_transaction))
    .transpose()?;

  let summary = ImportSummary {
    lawyers: lawyers.as_ref().map(Vec::len),
    transactions: transactions.as_ref().map(Vec::len),
  };

  repo.replace_all(lawyers, transactions).await?;

  info!(
    lawyers = ?summary.lawyers,
    transactions = ?summary.transactions,
    "Backup imported"
  );
  Ok(summary)
}

//! Repository Port - Lawyer and Transaction CRUD Interface
//!
//! Every mutation reads the full collection, changes it in memory and
//! writes the full collection back (snapshot write). There is no
//! journal and no cross-collection atomicity.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::record::{Lawyer, Transaction};
use crate::domain::validation::ValidationError;
use crate::ports::key_value::StoreError;

/// Which collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
  Lawyer,
  Transaction,
}

impl std::fmt::Display for RecordKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Lawyer => write!(f, "lawyer"),
      Self::Transaction => write!(f, "transaction"),
    }
  }
}

/// Failure of a repository operation.
#[derive(Debug, Error)]
pub enum RepositoryError {
  /// Update/delete target does not exist. Nothing was written.
  #[error("{kind} '{id}' not found")]
  NotFound { kind: RecordKind, id: String },
  /// The record broke a field rule. Nothing was written.
  #[error(transparent)]
  Invalid(#[from] ValidationError),
  /// The collection could not be serialized. Nothing was written.
  #[error("failed to serialize collection: {0}")]
  Serialize(#[from] serde_json::Error),
  /// The store rejected the write.
  #[error(transparent)]
  Store(#[from] StoreError),
}

impl RepositoryError {
  pub(crate) fn lawyer_not_found(id: &str) -> Self {
    Self::NotFound {
      kind: RecordKind::Lawyer,
      id: id.to_string(),
    }
  }

  pub(crate) fn transaction_not_found(id: &str) -> Self {
    Self::NotFound {
      kind: RecordKind::Transaction,
      id: id.to_string(),
    }
  }

  /// Whether this is a missing-record failure rather than a storage one.
  pub const fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }
}

/// Trait for lawyer/transaction persistence.
///
/// Reads never fail: missing or unreadable collections come back empty.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
  /// All lawyers in stored order.
  async fn lawyers(&self) -> Vec<Lawyer>;

  /// Lawyer by id.
  async fn lawyer(&self, id: &str) -> Option<Lawyer>;

  /// Validate, append a lawyer and persist the collection.
  async fn add_lawyer(&self, lawyer: Lawyer) -> Result<(), RepositoryError>;

  /// Validate and replace the lawyer with the same id. Never inserts.
  async fn update_lawyer(&self, lawyer: Lawyer) -> Result<(), RepositoryError>;

  /// Delete a lawyer and every transaction referencing it.
  ///
  /// A missing lawyer is `NotFound` and nothing is written.
  /// Transactions are written first. If the second write fails the lawyer
  /// survives with no transactions, and the error is returned.
  async fn delete_lawyer(&self, id: &str) -> Result<(), RepositoryError>;

  /// All transactions in stored order.
  async fn transactions(&self) -> Vec<Transaction>;

  /// Transaction by id.
  async fn transaction(&self, id: &str) -> Option<Transaction>;

  /// Transactions belonging to one lawyer.
  async fn transactions_by_lawyer(&self, lawyer_id: &str) -> Vec<Transaction>;

  /// Validate, append a transaction and persist the collection.
  async fn add_transaction(&self, transaction: Transaction) -> Result<(), RepositoryError>;

  /// Validate and replace the transaction with the same id. Never inserts.
  async fn update_transaction(&self, transaction: Transaction) -> Result<(), RepositoryError>;

  /// Delete one transaction; `NotFound` if no transaction has `id`.
  async fn delete_transaction(&self, id: &str) -> Result<(), RepositoryError>;

  /// Replace whole collections; `None` leaves that collection as is.
  async fn replace_all(
    &self,
    lawyers: Option<Vec<Lawyer>>,
    transactions: Option<Vec<Transaction>>,
  ) -> Result<(), RepositoryError>;

  /// Drop transactions whose lawyer no longer exists. Returns how many.
  async fn prune_orphans(&self) -> Result<usize, RepositoryError>;
}

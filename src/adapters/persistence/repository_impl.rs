//! Repository Implementation - Concrete Adapter for the Repository Port
//!
//! Builds lawyer/transaction CRUD on top of `CollectionStore` snapshots.
//! This is the hexagonal architecture glue: usecases only know about the
//! `Repository` trait, never about keys or JSON.

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::collections::{CollectionStore, keys};
use crate::adapters::metrics::StorageMetrics;
use crate::domain::record::{Lawyer, Theme, Transaction};
use crate::domain::validation::{validate_lawyer, validate_transaction};
use crate::ports::key_value::KeyValueStore;
use crate::ports::repository::{Repository, RepositoryError};

/// Concrete repository over any byte store.
pub struct RepositoryImpl<S: KeyValueStore> {
    collections: CollectionStore<S>,
}

impl<S: KeyValueStore> RepositoryImpl<S> {
    /// Create a repository from an existing collection store.
    pub const fn new(collections: CollectionStore<S>) -> Self {
        Self { collections }
    }

    /// Create a repository over `store` with a fresh metrics registry.
    pub fn from_store(store: S) -> anyhow::Result<Self> {
        Ok(Self::new(CollectionStore::new(store, StorageMetrics::new()?)))
    }

    pub const fn collections(&self) -> &CollectionStore<S> {
        &self.collections
    }

    /// Seed sample data into an empty store. See [`CollectionStore::init`].
    pub async fn init(&self) -> Result<bool, RepositoryError> {
        self.collections.init().await
    }

    /// Wipe both collections, then seed again.
    pub async fn clear_and_reseed(&self) -> Result<bool, RepositoryError> {
        self.collections.clear_all().await?;
        self.collections.init().await
    }

    pub async fn theme(&self) -> Theme {
        self.collections.theme().await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), RepositoryError> {
        self.collections.set_theme(theme).await
    }

    async fn save_lawyers(&self, lawyers: &[Lawyer]) -> Result<(), RepositoryError> {
        self.collections.save(keys::LAWYERS, lawyers).await
    }

    async fn save_transactions(&self, transactions: &[Transaction]) -> Result<(), RepositoryError> {
        self.collections.save(keys::TRANSACTIONS, transactions).await
    }
}

#[async_trait]
impl<S: KeyValueStore> Repository for RepositoryImpl<S> {
    async fn lawyers(&self) -> Vec<Lawyer> {
        self.collections.load(keys::LAWYERS).await
    }

    async fn lawyer(&self, id: &str) -> Option<Lawyer> {
        self.lawyers().await.into_iter().find(|l| l.id == id)
    }

    #[instrument(skip(self, lawyer), fields(id = %lawyer.id))]
    async fn add_lawyer(&self, lawyer: Lawyer) -> Result<(), RepositoryError> {
        validate_lawyer(&lawyer)?;
        let mut lawyers = self.lawyers().await;
        lawyers.push(lawyer);
        self.save_lawyers(&lawyers).await
    }

    #[instrument(skip(self, lawyer), fields(id = %lawyer.id))]
    async fn update_lawyer(&self, lawyer: Lawyer) -> Result<(), RepositoryError> {
        validate_lawyer(&lawyer)?;
        let mut lawyers = self.lawyers().await;
        let slot = lawyers
            .iter_mut()
            .find(|l| l.id == lawyer.id)
            .ok_or_else(|| RepositoryError::lawyer_not_found(&lawyer.id))?;
        *slot = lawyer;
        self.save_lawyers(&lawyers).await
    }

    #[instrument(skip(self))]
    async fn delete_lawyer(&self, id: &str) -> Result<(), RepositoryError> {
        let mut lawyers = self.lawyers().await;
        if !lawyers.iter().any(|l| l.id == id) {
            return Err(RepositoryError::lawyer_not_found(id));
        }

        let mut transactions = self.transactions().await;
        let before = transactions.len();
        transactions.retain(|t| t.lawyer_id != id);
        let removed = before - transactions.len();
        if removed > 0 {
            self.save_transactions(&transactions).await?;
        }

        lawyers.retain(|l| l.id != id);
        if let Err(e) = self.save_lawyers(&lawyers).await {
            warn!(
                lawyer_id = id,
                transactions_removed = removed,
                "Lawyer record survived cascade delete; its transactions are gone"
            );
            return Err(e);
        }

        info!(lawyer_id = id, transactions_removed = removed, "Lawyer deleted");
        Ok(())
    }

    async fn transactions(&self) -> Vec<Transaction> {
        self.collections.load(keys::TRANSACTIONS).await
    }

    async fn transaction(&self, id: &str) -> Option<Transaction> {
        self.transactions().await.into_iter().find(|t| t.id == id)
    }

    async fn transactions_by_lawyer(&self, lawyer_id: &str) -> Vec<Transaction> {
        self.transactions()
            .await
            .into_iter()
            .filter(|t| t.lawyer_id == lawyer_id)
            .collect()
    }

    #[instrument(skip(self, transaction), fields(id = %transaction.id))]
    async fn add_transaction(&self, transaction: Transaction) -> Result<(), RepositoryError> {
        validate_transaction(&transaction)?;
        let mut transactions = self.transactions().await;
        transactions.push(transaction);
        self.save_transactions(&transactions).await
    }

    #[instrument(skip(self, transaction), fields(id = %transaction.id))]
    async fn update_transaction(&self, transaction: Transaction) -> Result<(), RepositoryError> {
        validate_transaction(&transaction)?;
        let mut transactions = self.transactions().await;
        let slot = transactions
            .iter_mut()
            .find(|t| t.id == transaction.id)
            .ok_or_else(|| RepositoryError::transaction_not_found(&transaction.id))?;
        *slot = transaction;
        self.save_transactions(&transactions).await
    }

    #[instrument(skip(self))]
    async fn delete_transaction(&self, id: &str) -> Result<(), RepositoryError> {
        let mut transactions = self.transactions().await;
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        if transactions.len() == before {
            return Err(RepositoryError::transaction_not_found(id));
        }
        self.save_transactions(&transactions).await
    }

    #[instrument(skip(self, lawyers, transactions))]
    async fn replace_all(
        &self,
        lawyers: Option<Vec<Lawyer>>,
        transactions: Option<Vec<Transaction>>,
    ) -> Result<(), RepositoryError> {
        if let Some(lawyers) = lawyers {
            self.save_lawyers(&lawyers).await?;
            info!(count = lawyers.len(), "Lawyers replaced");
        }
        if let Some(transactions) = transactions {
            self.save_transactions(&transactions).await?;
            info!(count = transactions.len(), "Transactions replaced");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn prune_orphans(&self) -> Result<usize, RepositoryError> {
        let lawyers = self.lawyers().await;
        let mut transactions = self.transactions().await;
        let before = transactions.len();
        transactions.retain(|t| lawyers.iter().any(|l| l.id == t.lawyer_id));
        let removed = before - transactions.len();

        if removed > 0 {
            self.save_transactions(&transactions).await?;
            info!(removed, "Pruned orphaned transactions");
        }
        Ok(removed)
    }
}

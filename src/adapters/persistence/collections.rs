//! Collection Store - Whole-Collection JSON Snapshots
//!
//! Reads and writes complete lawyer/transaction collections under fixed
//! keys. Reads never fail: a missing, unreadable or unparseable value is
//! an empty collection. Elements that do not decode or validate are
//! rejected individually so one bad record does not hide the rest.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::adapters::metrics::StorageMetrics;
use crate::domain::record::{Lawyer, Theme, Transaction};
use crate::domain::sample::{sample_lawyers, sample_transactions};
use crate::domain::validation::{ValidationError, validate_lawyer, validate_transaction};
use crate::ports::key_value::KeyValueStore;
use crate::ports::repository::RepositoryError;

/// Fixed storage keys.
pub mod keys {
    pub const LAWYERS: &str = "ltms_lawyers";
    pub const TRANSACTIONS: &str = "ltms_transactions";
    pub const THEME: &str = "ltms_theme";
}

/// A record type that can live in a stored collection.
pub trait StoredRecord: Serialize + DeserializeOwned + Send + Sync {
    /// Domain validation applied to every element read back from storage.
    fn check(&self) -> Result<(), ValidationError>;
}

impl StoredRecord for Lawyer {
    fn check(&self) -> Result<(), ValidationError> {
        validate_lawyer(self)
    }
}

impl StoredRecord for Transaction {
    fn check(&self) -> Result<(), ValidationError> {
        validate_transaction(self)
    }
}

/// Snapshot persistence for the two collections and the theme.
pub struct CollectionStore<S: KeyValueStore> {
    store: S,
    metrics: StorageMetrics,
    /// Whether `init` seeds sample data into an empty store.
    seed_sample_data: bool,
}

impl<S: KeyValueStore> CollectionStore<S> {
    /// Wrap a byte store. Seeding is enabled by default.
    pub const fn new(store: S, metrics: StorageMetrics) -> Self {
        Self {
            store,
            metrics,
            seed_sample_data: true,
        }
    }

    /// Enable or disable sample seeding in [`Self::init`].
    #[must_use]
    pub fn with_seeding(mut self, enabled: bool) -> Self {
        self.seed_sample_data = enabled;
        self
    }

    /// Underlying byte store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn metrics(&self) -> &StorageMetrics {
        &self.metrics
    }

    /// Load the collection under `key`, degrading to empty on any failure.
    #[instrument(skip(self))]
    pub async fn load<T: StoredRecord>(&self, key: &str) -> Vec<T> {
        self.metrics.loads.with_label_values(&[key]).inc();

        match self.store.get(key).await {
            Ok(Some(bytes)) => self.decode(key, &bytes),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "Failed to read collection, treating as empty");
                Vec::new()
            }
        }
    }

    fn decode<T: StoredRecord>(&self, key: &str, bytes: &[u8]) -> Vec<T> {
        let values: Vec<serde_json::Value> = match serde_json::from_slice(bytes) {
            Ok(values) => values,
            Err(e) => {
                warn!(key, error = %e, "Stored collection is not a JSON array, treating as empty");
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<T>(value) {
                Ok(record) => match record.check() {
                    Ok(()) => records.push(record),
                    Err(e) => {
                        warn!(key, index, error = %e, "Rejecting invalid stored record");
                        self.metrics
                            .records_rejected
                            .with_label_values(&[key, "invalid"])
                            .inc();
                    }
                },
                Err(e) => {
                    warn!(key, index, error = %e, "Rejecting undecodable stored record");
                    self.metrics
                        .records_rejected
                        .with_label_values(&[key, "decode"])
                        .inc();
                }
            }
        }
        records
    }

    /// Persist the whole collection under `key`.
    ///
    /// The collection is serialized fully before the store is touched, so a
    /// serialization failure leaves the previous snapshot in place.
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub async fn save<T: StoredRecord>(&self, key: &str, records: &[T]) -> Result<(), RepositoryError> {
        let result = match serde_json::to_vec(records) {
            Ok(bytes) => self.store.set(key, bytes).await.map_err(RepositoryError::from),
            Err(e) => Err(RepositoryError::from(e)),
        };

        match &result {
            Ok(()) => self.metrics.writes.with_label_values(&[key]).inc(),
            Err(e) => {
                error!(key, error = %e, "Failed to save collection");
                self.metrics.write_failures.with_label_values(&[key]).inc();
            }
        }
        result
    }

    /// Seed sample data when no lawyers are stored. Returns whether it did.
    ///
    /// Never overwrites existing lawyers; safe to call on every start.
    #[instrument(skip(self))]
    pub async fn init(&self) -> Result<bool, RepositoryError> {
        if !self.seed_sample_data {
            return Ok(false);
        }
        if !self.load::<Lawyer>(keys::LAWYERS).await.is_empty() {
            return Ok(false);
        }

        let lawyers = sample_lawyers();
        let transactions = sample_transactions();
        self.save(keys::LAWYERS, &lawyers).await?;
        self.save(keys::TRANSACTIONS, &transactions).await?;
        self.metrics.seeds.inc();

        info!(
            lawyers = lawyers.len(),
            transactions = transactions.len(),
            "Seeded sample data"
        );
        Ok(true)
    }

    /// Stored theme; light when unset or unreadable.
    pub async fn theme(&self) -> Theme {
        match self.store.get(keys::THEME).await {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read theme, using default");
                Theme::default()
            }
        }
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), RepositoryError> {
        let bytes = serde_json::to_vec(&theme)?;
        self.store.set(keys::THEME, bytes).await?;
        Ok(())
    }

    /// Remove both collections. The theme is kept.
    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> Result<(), RepositoryError> {
        self.store.remove(keys::LAWYERS).await?;
        self.store.remove(keys::TRANSACTIONS).await?;
        info!("Cleared all lawyers and transactions");
        Ok(())
    }
}

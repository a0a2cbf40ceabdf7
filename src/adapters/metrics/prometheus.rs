//! Prometheus Metrics Registry - Storage Observability
//!
//! Counts collection loads and writes, write failures, records rejected
//! at the storage boundary and sample-data seeding. Rendered in the text
//! exposition format on demand.

use ::prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Centralized Prometheus metrics for the persistence layer.
///
/// All metrics follow the naming convention `ltms_*` and carry the
/// storage key as a label where one applies.
#[derive(Clone)]
pub struct StorageMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// Collection loads, by key.
    pub loads: IntCounterVec,
    /// Successful collection writes, by key.
    pub writes: IntCounterVec,
    /// Failed collection writes, by key.
    pub write_failures: IntCounterVec,
    /// Stored records dropped on load, by key and reason.
    pub records_rejected: IntCounterVec,
    /// Times the sample data was seeded.
    pub seeds: IntCounter,
}

impl StorageMetrics {
    /// Create and register all storage metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let loads = IntCounterVec::new(
            Opts::new("ltms_collection_loads_total", "Collection loads"),
            &["key"],
        )?;

        let writes = IntCounterVec::new(
            Opts::new("ltms_store_writes_total", "Successful snapshot writes"),
            &["key"],
        )?;

        let write_failures = IntCounterVec::new(
            Opts::new("ltms_store_write_failures_total", "Failed snapshot writes"),
            &["key"],
        )?;

        let records_rejected = IntCounterVec::new(
            Opts::new(
                "ltms_records_rejected_total",
                "Stored records dropped because they failed to decode or validate",
            ),
            &["key", "reason"],
        )?;

        let seeds = IntCounter::new("ltms_sample_seeds_total", "Sample data seeding runs")?;

        // Register all metrics
        registry.register(Box::new(loads.clone()))?;
        registry.register(Box::new(writes.clone()))?;
        registry.register(Box::new(write_failures.clone()))?;
        registry.register(Box::new(records_rejected.clone()))?;
        registry.register(Box::new(seeds.clone()))?;

        Ok(Self {
            registry,
            loads,
            writes,
            write_failures,
            records_rejected,
            seeds,
        })
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_counters() {
        let metrics = StorageMetrics::new().unwrap();
        metrics.writes.with_label_values(&["ltms_lawyers"]).inc();
        metrics.seeds.inc();

        let text = metrics.render().unwrap();
        assert!(text.contains("ltms_store_writes_total{key=\"ltms_lawyers\"} 1"));
        assert!(text.contains("ltms_sample_seeds_total 1"));
    }

    #[test]
    fn test_registries_are_independent() {
        let a = StorageMetrics::new().unwrap();
        let b = StorageMetrics::new().unwrap();
        a.seeds.inc();
        assert_eq!(a.seeds.get(), 1);
        assert_eq!(b.seeds.get(), 0);
    }
}

//! Metrics Adapters
//!
//! Prometheus counters for the persistence layer, printed by the CLI on
//! `--print-metrics`.

pub mod prometheus;

pub use self::prometheus::StorageMetrics;

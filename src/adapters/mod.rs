//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! infrastructure (file I/O, in-process memory, wall clock). Each
//! sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `clock`: system and fixed clocks
//! - `metrics`: Prometheus storage counters
//! - `persistence`: byte stores, collection snapshots and the repository

pub mod clock;
pub mod metrics;
pub mod persistence;

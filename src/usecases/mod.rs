//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! workflows the CLI exposes. Each use case is a self-contained
//! operation over a `Repository`.
//!
//! Use cases:
//! - `backup`: JSON export/import of both collections
//! - `dashboard`: statistics snapshot and periodic refresh
//! - `reports`: per-lawyer statements and filtered listings

pub mod backup;
pub mod dashboard;
pub mod reports;

//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `KeyValueStore`: whole-value byte storage under fixed keys
//! - `Repository`: lawyer/transaction CRUD with cascade delete
//! - `Clock`: current date/time, injectable for tests

pub mod clock;
pub mod key_value;
pub mod repository;

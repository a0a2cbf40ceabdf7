//! Domain layer - Records, validation and pure aggregation.
//!
//! No I/O happens here (hexagonal architecture inner ring). Everything
//! operates on collections that the persistence adapters already loaded,
//! which keeps the statistics deterministic and testable in isolation.

pub mod filter;
pub mod monthly;
pub mod ranking;
pub mod record;
pub mod sample;
pub mod statistics;
pub mod validation;

// Re-export core types for convenience
pub use filter::{FilterSpec, Filterable, apply_filters};
pub use monthly::{MonthSummary, MonthlyComparison, monthly_comparison};
pub use ranking::{LawyerRanking, rank_lawyers};
pub use record::{Lawyer, LawyerId, PaymentStatus, Theme, Transaction, TransactionId};
pub use statistics::{DateRange, LawyerStatistics, Statistics, lawyer_statistics, statistics};
pub use validation::{ValidationError, validate_lawyer, validate_transaction};

//! Clock Port - Injectable Notion of "Now"
//!
//! Month boundaries and export timestamps depend on the current date.
//! Routing them through this trait keeps the aggregation deterministic
//! under test.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync + 'static {
  /// Current instant.
  fn now(&self) -> DateTime<Utc>;

  /// Current calendar day.
  fn today(&self) -> NaiveDate {
    self.now().date_naive()
  }
}

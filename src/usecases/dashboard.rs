//! Dashboard Use Case - Snapshot and Periodic Refresh
//!
//! Builds the dashboard figures (global statistics, monthly comparison,
//! top lawyers) from the repository, and republishes them on a fixed
//! interval. A refresh only reads; overlapping ticks are skipped rather
//! than queued.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument};

use crate::domain::monthly::{MonthlyComparison, monthly_comparison};
use crate::domain::ranking::{LawyerRanking, rank_lawyers};
use crate::domain::statistics::{Statistics, statistics};
use crate::ports::clock::Clock;
use crate::ports::repository::Repository;

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
  pub statistics: Statistics,
  pub monthly: MonthlyComparison,
  /// Highest-billing lawyers, best first.
  pub top_lawyers: Vec<LawyerRanking>,
  pub generated_at: DateTime<Utc>,
}

/// Read both collections once and compute the dashboard.
pub async fn build_snapshot<R, C>(repo: &R, clock: &C, top_n: usize) -> DashboardSnapshot
where
  R: Repository + ?Sized,
  C: Clock + ?Sized,
{
  let lawyers = repo.lawyers().await;
  let transactions = repo.transactions().await;

  let mut top_lawyers = rank_lawyers(&lawyers, &transactions);
  top_lawyers.truncate(top_n);

  DashboardSnapshot {
    statistics: statistics(&lawyers, &transactions),
    monthly: monthly_comparison(&transactions, clock.today()),
    top_lawyers,
    generated_at: clock.now(),
  }
}

/// Periodically rebuilds the dashboard and publishes it on a watch channel.
pub struct DashboardRefresher<R: Repository, C: Clock> {
  repo: Arc<R>,
  clock: Arc<C>,
  interval: Duration,
  top_n: usize,
  snapshot_tx: watch::Sender<Option<DashboardSnapshot>>,
}

impl<R: Repository, C: Clock> DashboardRefresher<R, C> {
  /// Create a refresher.
  ///
  /// Returns the refresher and a receiver that sees every new snapshot.
  /// The receiver holds `None` until the first refresh completes.
  pub fn new(
    repo: Arc<R>,
    clock: Arc<C>,
    interval: Duration,
    top_n: usize,
  ) -> (Self, watch::Receiver<Option<DashboardSnapshot>>) {
    let (snapshot_tx, snapshot_rx) = watch::channel(None);
    let refresher = Self {
      repo,
      clock,
      interval,
      top_n,
      snapshot_tx,
    };
    (refresher, snapshot_rx)
  }

  /// Rebuild and publish once.
  pub async fn refresh(&self) -> DashboardSnapshot {
    let snapshot = build_snapshot(self.repo.as_ref(), self.clock.as_ref(), self.top_n).await;
    debug!(
      transactions = snapshot.statistics.total_transactions,
      lawyers = snapshot.statistics.total_lawyers,
      "Dashboard refreshed"
    );
    self.snapshot_tx.send_replace(Some(snapshot.clone()));
    snapshot
  }

  /// Refresh immediately, then every `interval`, until shutdown.
  #[instrument(skip(self, shutdown_rx), fields(interval_secs = self.interval.as_secs()))]
  pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) {
    let mut ticker = tokio::time::interval(self.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!("Dashboard refresher started");
    loop {
      tokio::select! {
        biased;
        _ = shutdown_rx.recv() => {
          info!("Dashboard refresher received shutdown signal");
          break;
        }
        _ = ticker.tick() => {
          self.refresh().await;
        }
      }
    }
  }
}

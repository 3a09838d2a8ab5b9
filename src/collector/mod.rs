//! This module defines a trait for collecting job results.
//!
//! A collector is the single consumer of the result queue and the only owner
//! of the running statistics, so no locking is involved while aggregating.
mod console;
mod silent;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

pub use console::ConsoleCollector;
pub use silent::SilentCollector;

use crate::{
    histogram::LatencyHistogram,
    job::JobResult,
    report::BenchReport,
    stats::JobStats,
    status::StatusKind,
};

/// A trait for collecting job results.
#[async_trait]
pub trait ReportCollector: Send + Sync {
    /// Consume results until the result queue is closed and drained, then
    /// generate the test report.
    async fn run(&mut self) -> anyhow::Result<BenchReport>;
}

/// Aggregation state shared by the collectors.
struct Accumulator {
    stats: JobStats,
    hist: LatencyHistogram,
    start: Instant,
    started_at: DateTime<Utc>,
}

impl Accumulator {
    fn start() -> Self {
        Self {
            stats: JobStats::new(),
            hist: LatencyHistogram::new(),
            start: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Fold one result into the statistics.
    ///
    /// The counters are always updated. The histogram is best-effort: a latency
    /// it cannot hold is logged and left out of the percentiles.
    fn record(&mut self, res: &JobResult) {
        self.stats.record(res);
        match res.status.kind() {
            StatusKind::Success => {
                if let Err(e) = self.hist.record(res.elapsed) {
                    tracing::warn!("latency not recorded in histogram: {e}");
                }
            }
            StatusKind::Failed => tracing::debug!(error = %res.message, "job failed"),
            StatusKind::Error => (),
        }
    }

    fn finish(self, concurrency: usize) -> BenchReport {
        BenchReport {
            concurrency,
            stats: self.stats,
            hist: self.hist,
            started_at: self.started_at,
            elapsed: self.start.elapsed(),
        }
    }
}

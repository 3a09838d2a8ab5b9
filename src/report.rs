//! The final test report.
use chrono::{DateTime, Utc};
use tokio::time::Duration;

use crate::{histogram::LatencyHistogram, stats::JobStats};

/// The final report of a test run.
#[derive(Clone, Debug)]
pub struct BenchReport {
    /// Number of workers that ran concurrently.
    pub concurrency: usize,
    /// Result statistics.
    pub stats: JobStats,
    /// Latency distribution of successful probes.
    pub hist: LatencyHistogram,
    /// Wall time when the collector started.
    pub started_at: DateTime<Utc>,
    /// Time elapsed between the collector start and the last result.
    pub elapsed: Duration,
}

impl BenchReport {
    /// Successful requests per second over the whole test.
    pub fn rps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.stats.success.count as f64 / secs
    }
}

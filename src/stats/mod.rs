//! Running statistics of a test.
//!
//! [`JobStats`] is the aggregate the collector updates for every received
//! [`JobResult`]. It is owned by a single task and never shared for writing.
//!
//! Every recorded result lands in exactly one bucket, so at any time
//! `total == success.count + failed + sum(server_errors)`.

mod counter;

pub use counter::Counter;

use std::collections::BTreeMap;

use crate::{job::JobResult, status::StatusKind};

/// Aggregated statistics of the results seen so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobStats {
    /// Number of results recorded.
    pub total: u64,
    /// Results with a code in the success band, with their summed latency.
    pub success: Counter,
    /// Results of probes that never got a response.
    pub failed: u64,
    /// Occurrences of every other status code.
    pub server_errors: BTreeMap<i32, u64>,
}

impl JobStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Account one result.
    pub fn record(&mut self, res: &JobResult) {
        self.total += 1;
        match res.status.kind() {
            StatusKind::Failed => self.failed += 1,
            StatusKind::Success => self.success += res,
            StatusKind::Error => *self.server_errors.entry(res.status.code()).or_default() += 1,
        }
    }

    /// Number of requests that reached the target.
    pub fn sent(&self) -> u64 {
        self.total - self.failed
    }

    /// Sum of all per-code error buckets.
    pub fn server_error_count(&self) -> u64 {
        self.server_errors.values().sum()
    }

    /// Live average line, present once at least one success was recorded.
    pub fn avg_line(&self) -> Option<String> {
        (self.success.count > 0).then(|| {
            format!(
                "{} requests: avg response time, sec: {:.3}",
                self.success.count,
                self.success.mean_secs()
            )
        })
    }
}

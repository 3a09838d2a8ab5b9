//! Silent (headless) report collector.
//!
//! This module provides [`SilentCollector`], a collector that aggregates job
//! results without printing live progress. Useful in scripts where only the
//! final report matters, e.g. together with
//! [`JsonReporter`](crate::reporter::JsonReporter).

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::Accumulator;
use crate::{job::JobResult, report::BenchReport};

/// A report collector that only produces the final report.
pub struct SilentCollector {
    concurrency: usize,
    res_rx: mpsc::Receiver<JobResult>,
}

impl SilentCollector {
    /// Create a new silent report collector.
    pub fn new(concurrency: usize, res_rx: mpsc::Receiver<JobResult>) -> Self {
        Self { concurrency, res_rx }
    }
}

#[async_trait]
impl super::ReportCollector for SilentCollector {
    async fn run(&mut self) -> anyhow::Result<BenchReport> {
        let mut acc = Accumulator::start();
        while let Some(res) = self.res_rx.recv().await {
            acc.record(&res);
        }
        Ok(acc.finish(self.concurrency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::ReportCollector;
    use tokio::time::Duration;

    #[tokio::test]
    async fn test_collects_until_closed() {
        let (tx, rx) = mpsc::channel(4);
        let mut collector = SilentCollector::new(2, rx);
        let handle = tokio::spawn(async move { collector.run().await });

        for code in [200u16, 200, 503, 0] {
            tx.send(JobResult::new(code, Duration::from_millis(10))).await.unwrap();
        }
        tx.send(JobResult::failed("timeout", Duration::from_secs(5))).await.unwrap();
        drop(tx);

        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.concurrency, 2);
        assert_eq!(report.stats.total, 5);
        assert_eq!(report.stats.success.count, 2);
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.server_errors.len(), 2);
        assert!(!report.hist.is_empty());
    }

    #[tokio::test]
    async fn test_oversized_latency_keeps_counting() {
        let (tx, rx) = mpsc::channel(4);
        let mut collector = SilentCollector::new(1, rx);
        let handle = tokio::spawn(async move { collector.run().await });

        tx.send(JobResult::new(200u16, Duration::from_millis(10))).await.unwrap();
        tx.send(JobResult::new(200u16, Duration::MAX)).await.unwrap();
        tx.send(JobResult::new(503u16, Duration::from_millis(10))).await.unwrap();
        drop(tx);

        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.stats.total, 3);
        assert_eq!(report.stats.success.count, 2);
        assert_eq!(report.stats.server_errors.get(&503), Some(&1));
        assert!(!report.hist.is_empty());
        assert_eq!(report.stats.success.duration, Duration::MAX);
    }
}

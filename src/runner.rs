//! Orchestration of a test run.
//!
//! A run wires three concurrent actors together:
//!
//! ```text
//! producer --(jobs)--> worker pool --(results)--> collector
//! ```
//!
//! The producer runs on the calling task. Once it stops, the job queue is
//! closed, the workers drain it and exit, [`WorkerPool::join`] closes the
//! result queue, and the collector returns the report after draining it.
use anyhow::Result;
use tokio::sync::mpsc;

use crate::{
    collector::ReportCollector,
    job::{Job, JobResult},
    pool::WorkerPool,
    producer::{self, ProducerOpts},
    report::BenchReport,
};

/// Run a test with `workers` workers.
///
/// `make_collector` receives the result queue and returns the collector that
/// will consume it. `make_job` builds the job with the given id.
///
/// Fails before spawning anything if `workers` is zero.
pub async fn run<J, F, C>(workers: usize, opts: &ProducerOpts, make_collector: C, make_job: F) -> Result<BenchReport>
where
    J: Job,
    F: FnMut(u64) -> J,
    C: FnOnce(mpsc::Receiver<JobResult>) -> Box<dyn ReportCollector>,
{
    let (pool, job_tx, res_rx) = WorkerPool::new(workers)?;

    let mut collector = make_collector(res_rx);
    let report = tokio::spawn(async move { collector.run().await });

    // the job queue is closed when the producer returns
    let (produced, reason) = producer::produce(opts, job_tx, make_job).await;
    tracing::debug!(produced, ?reason, "waiting for workers to drain");

    pool.join().await;
    report.await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::num::NonZeroU64;
    use tokio::time::Duration;

    use crate::{collector::SilentCollector, error::PoolError, status::Status};

    struct FixedJob {
        code: i32,
        elapsed: Duration,
    }

    #[async_trait]
    impl Job for FixedJob {
        async fn run(self) -> JobResult {
            JobResult::new(Status::new(self.code), self.elapsed)
        }
    }

    fn silent(workers: usize) -> impl FnOnce(mpsc::Receiver<JobResult>) -> Box<dyn ReportCollector> {
        move |rx| Box::new(SilentCollector::new(workers, rx))
    }

    fn count(n: u64) -> ProducerOpts {
        ProducerOpts { requests: NonZeroU64::new(n), ..Default::default() }
    }

    #[tokio::test]
    async fn test_code_zero_scenario() {
        let report = run(10, &count(10), silent(10), |_| FixedJob { code: 0, elapsed: Duration::from_secs(1) })
            .await
            .unwrap();

        let stats = &report.stats;
        assert_eq!(stats.total, 10);
        assert_eq!(stats.success.count, 0);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.server_errors.get(&0), Some(&10));
        assert_eq!(stats.server_errors.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_every_job_is_reported_once() {
        let codes = [200, 503, -1, 404, 0];
        let report = run(7, &count(1000), silent(7), |id| FixedJob {
            code: codes[(id % 5) as usize],
            elapsed: Duration::from_millis(2),
        })
        .await
        .unwrap();

        let stats = &report.stats;
        assert_eq!(stats.total, 1000);
        assert_eq!(stats.failed, 200);
        assert_eq!(stats.success.count, 400);
        assert_eq!(stats.success.duration, Duration::from_millis(800));
        assert_eq!(stats.server_errors.get(&503), Some(&200));
        assert_eq!(stats.server_errors.get(&0), Some(&200));
        assert_eq!(stats.total, stats.success.count + stats.server_error_count() + stats.failed);
        assert_eq!(report.concurrency, 7);
    }

    #[tokio::test]
    async fn test_duration_bound_run() {
        struct SlowJob;

        #[async_trait]
        impl Job for SlowJob {
            async fn run(self) -> JobResult {
                tokio::time::sleep(Duration::from_millis(20)).await;
                JobResult::new(200u16, Duration::from_millis(20))
            }
        }

        let opts = ProducerOpts { duration: Some(Duration::from_millis(200)), ..Default::default() };
        let report = run(4, &opts, silent(4), |_| SlowJob).await.unwrap();

        assert!(report.elapsed >= Duration::from_millis(200));
        assert!(report.stats.total > 0);
        assert_eq!(report.stats.total, report.stats.success.count);
    }

    #[tokio::test]
    async fn test_rejects_empty_pool() {
        let err = run(0, &count(1), silent(0), |_| FixedJob { code: 200, elapsed: Duration::ZERO })
            .await
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<PoolError>(), Some(PoolError::InvalidSize(0))));
    }
}

//! Report collector printing live progress.
use std::io::Write;

use async_trait::async_trait;
use tokio::{
    select,
    sync::mpsc,
    time::{self, Duration, Instant, MissedTickBehavior},
};

use super::Accumulator;
use crate::{job::JobResult, report::BenchReport};

/// Interval between two live progress lines.
const TICK: Duration = Duration::from_secs(1);

/// A report collector that prints the running average latency every second.
///
/// Nothing is printed until the first successful result. Every line reports
/// the average since the start of the test, not since the previous line.
pub struct ConsoleCollector<W> {
    concurrency: usize,
    res_rx: mpsc::Receiver<JobResult>,
    out: W,
}

impl<W> ConsoleCollector<W>
where
    W: Write + Send + Sync,
{
    /// Create a new console collector writing progress lines to `out`.
    pub fn new(concurrency: usize, res_rx: mpsc::Receiver<JobResult>, out: W) -> Self {
        Self { concurrency, res_rx, out }
    }
}

#[async_trait]
impl<W> super::ReportCollector for ConsoleCollector<W>
where
    W: Write + Send + Sync,
{
    async fn run(&mut self) -> anyhow::Result<BenchReport> {
        let mut acc = Accumulator::start();
        let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut live = true;

        loop {
            select! {
                r = self.res_rx.recv() => match r {
                    Some(res) => acc.record(&res),
                    None => break,
                },
                _ = ticker.tick(), if live => {
                    let Some(line) = acc.stats.avg_line() else { continue };
                    if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
                        // keep aggregating, the final report is still owed
                        tracing::warn!("live progress disabled: {e}");
                        live = false;
                    }
                }
            }
        }

        Ok(acc.finish(self.concurrency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::collector::ReportCollector;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// An output whose reader went away.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_average_is_cumulative() {
        let (tx, rx) = mpsc::channel(8);
        let buf = SharedBuf::default();
        let mut collector = ConsoleCollector::new(1, rx, buf.clone());
        let handle = tokio::spawn(async move { collector.run().await });

        tx.send(JobResult::new(200u16, Duration::from_millis(250))).await.unwrap();
        time::sleep(Duration::from_millis(1500)).await;
        tx.send(JobResult::new(204u16, Duration::from_millis(750))).await.unwrap();
        time::sleep(Duration::from_millis(1000)).await;
        drop(tx);

        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.stats.success.count, 2);
        assert_eq!(
            buf.lines(),
            vec![
                "1 requests: avg response time, sec: 0.250",
                "2 requests: avg response time, sec: 0.500",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_until_first_success() {
        let (tx, rx) = mpsc::channel(8);
        let buf = SharedBuf::default();
        let mut collector = ConsoleCollector::new(1, rx, buf.clone());
        let handle = tokio::spawn(async move { collector.run().await });

        tx.send(JobResult::new(503u16, Duration::from_millis(10))).await.unwrap();
        tx.send(JobResult::failed("connection refused", Duration::from_millis(1)))
            .await
            .unwrap();
        time::sleep(Duration::from_millis(3500)).await;
        drop(tx);

        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.stats.total, 2);
        assert!(buf.lines().is_empty());
        assert!(report.elapsed >= Duration::from_millis(3500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_failure_keeps_draining() {
        let (tx, rx) = mpsc::channel(8);
        let mut collector = ConsoleCollector::new(1, rx, BrokenPipe);
        let handle = tokio::spawn(async move { collector.run().await });

        tx.send(JobResult::new(200u16, Duration::from_millis(100))).await.unwrap();
        time::sleep(Duration::from_millis(2500)).await;
        tx.send(JobResult::new(200u16, Duration::MAX)).await.unwrap();
        tx.send(JobResult::new(500u16, Duration::from_millis(100))).await.unwrap();
        time::sleep(Duration::from_millis(1000)).await;
        drop(tx);

        let report = handle.await.unwrap().unwrap();
        assert_eq!(report.stats.total, 3);
        assert_eq!(report.stats.success.count, 2);
        assert_eq!(report.stats.server_errors.get(&500), Some(&1));
    }
}

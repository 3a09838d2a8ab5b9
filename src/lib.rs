//! A concurrent HTTP load tester.
//!
//! A test run is made of three concurrently running actors connected by two
//! bounded queues:
//!
//! - a **producer** generating numbered jobs until a request count or a time
//!   limit is reached,
//! - a **worker pool** of fixed size executing the jobs,
//! - a **collector** aggregating the results into running statistics and
//!   printing live progress.
//!
//! The queue sizes bound how far each actor can run ahead of the next one: the
//! job queue holds one job per worker and the result queue three results per
//! worker.
//!
//! ## Example
//!
//! Any type implementing [`Job`] can be run through the pool:
//!
//! ```no_run
//! use async_trait::async_trait;
//! use httptester::{
//!     collector::{ReportCollector, SilentCollector},
//!     producer::ProducerOpts,
//!     runner, Job, JobResult,
//! };
//! use std::num::NonZeroU64;
//! use tokio::time::{Duration, Instant};
//!
//! struct SleepJob;
//!
//! #[async_trait]
//! impl Job for SleepJob {
//!     async fn run(self) -> JobResult {
//!         let t = Instant::now();
//!         tokio::time::sleep(Duration::from_millis(10)).await;
//!         JobResult::new(200u16, t.elapsed())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let opts = ProducerOpts { requests: NonZeroU64::new(100), ..Default::default() };
//!     let collector = |rx| -> Box<dyn ReportCollector> { Box::new(SilentCollector::new(8, rx)) };
//!     let report = runner::run(8, &opts, collector, |_| SleepJob).await?;
//!     println!("{:.0} rps", report.rps());
//!     Ok(())
//! }
//! ```
#![deny(missing_docs)]

mod histogram;
mod job;
mod report;
mod stats;
mod status;

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod pool;
pub mod probe;
pub mod producer;
pub mod reporter;
pub mod runner;

pub use crate::{
    config::{Config, Target},
    histogram::LatencyHistogram,
    job::{Job, JobResult},
    report::BenchReport,
    stats::{Counter, JobStats},
    status::{Status, StatusKind},
};

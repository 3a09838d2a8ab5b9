//! Error types of the load tester.
//!
//! Configuration and pool errors are fatal and detected before any task is
//! spawned. Failures of a single probe are never represented here: they are
//! folded into a failed [`JobResult`](crate::JobResult) instead.
use std::time::Duration;

use thiserror::Error;

/// A fatal configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The target URL was not provided.
    #[error("URL flag \"--url\" should be provided")]
    MissingTarget,

    /// The requested number of workers is not positive.
    #[error("number of workers must be positive, got {0}")]
    InvalidWorkers(i64),

    /// The requested number of workers exceeds the pool limit.
    #[error("number of workers must be at most {max}, got {requested}")]
    TooManyWorkers {
        /// Requested number of workers.
        requested: i64,
        /// Largest supported pool.
        max: usize,
    },
}

/// An error raised while creating a worker pool.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool must have at least one worker.
    #[error("pool size must be positive, got {0}")]
    InvalidSize(usize),

    /// The queues of a pool this large cannot be allocated.
    #[error("pool size must be at most {max}, got {size}")]
    TooLarge {
        /// Requested pool size.
        size: usize,
        /// Largest supported pool.
        max: usize,
    },
}

/// An error raised while aggregating results.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The latency cannot be represented in the histogram.
    #[error("latency {latency:?} is too large to record")]
    LatencyTooLarge {
        /// The offending latency.
        latency: Duration,
    },

    /// The histogram rejected the value.
    #[error("failed to record latency: {0}")]
    HistogramRecord(#[from] hdrhistogram::errors::RecordError),
}

impl ConfigError {
    /// Process exit code used for every fatal configuration error.
    pub const EXIT_CODE: u8 = 255;
}

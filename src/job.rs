//! The unit of work executed by the worker pool.
use async_trait::async_trait;
use tokio::time::Duration;

use crate::status::Status;

/// The outcome of a single job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobResult {
    /// The reported status of the job.
    pub status: Status,
    /// Failure description, empty unless the job failed.
    pub message: String,
    /// Time spent in the probe call. Zero when no probe was attempted.
    pub elapsed: Duration,
}

impl JobResult {
    /// Creates the result of a probe that returned a status code.
    pub fn new(status: impl Into<Status>, elapsed: Duration) -> Self {
        Self { status: status.into(), message: String::new(), elapsed }
    }

    /// Creates the result of a probe that failed without a response.
    pub fn failed(message: impl Into<String>, elapsed: Duration) -> Self {
        Self { status: Status::failed(), message: message.into(), elapsed }
    }
}

/// A self-contained unit of work.
///
/// A job is consumed by exactly one worker. It must turn every failure into a
/// [`JobResult`] rather than erroring out.
#[async_trait]
pub trait Job: Send + 'static {
    /// Run the job and report its outcome.
    async fn run(self) -> JobResult;
}

//! Generation of the job stream.
//!
//! The producer is the only holder of the job queue sender. Returning from
//! [`produce`] drops it, which closes the queue for the workers.
use std::{future, num::NonZeroU64};

use tokio::{
    select,
    sync::mpsc,
    time::{self, Duration},
};

cfg_if::cfg_if! {
    if #[cfg(feature = "rate_limit")] {
        use std::num::NonZeroU32;
        use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
        use nonzero_ext::nonzero;
    }
}

use crate::config::Config;

/// Limits applied to the job stream.
#[derive(Clone, Debug, Default)]
pub struct ProducerOpts {
    /// Stop after this many jobs were enqueued.
    pub requests: Option<NonZeroU64>,

    /// Stop once this much time has elapsed, even while waiting on a full queue.
    pub duration: Option<Duration>,

    #[cfg(feature = "rate_limit")]
    /// Maximum number of jobs enqueued per second.
    pub rate: Option<NonZeroU32>,
}

impl From<&Config> for ProducerOpts {
    fn from(config: &Config) -> Self {
        Self {
            requests: config.requests,
            duration: config.duration,
            #[cfg(feature = "rate_limit")]
            rate: config.rate,
        }
    }
}

/// Why the producer stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The request count limit was reached.
    Count,
    /// The time limit expired.
    Deadline,
    /// The job queue was closed by the consumer side.
    Closed,
}

/// Feed jobs built by `make_job` into `jobs` until a limit is hit.
///
/// Job ids start at 1 and increase by one for every built job. Returns the
/// number of jobs that were actually enqueued and the reason for stopping.
pub async fn produce<J, F>(opts: &ProducerOpts, jobs: mpsc::Sender<J>, mut make_job: F) -> (u64, StopReason)
where
    F: FnMut(u64) -> J,
{
    #[cfg(feature = "rate_limit")]
    let limiter: Option<DefaultDirectRateLimiter> =
        opts.rate.map(|r| RateLimiter::direct(Quota::per_second(r).allow_burst(nonzero!(1u32))));

    let timer = deadline(opts.duration);
    tokio::pin!(timer);

    let mut seq = 0u64;
    let mut produced = 0u64;
    let reason = loop {
        seq += 1;
        let job = make_job(seq);

        let enqueue = async {
            #[cfg(feature = "rate_limit")]
            if let Some(limiter) = &limiter {
                limiter.until_ready().await;
            }
            jobs.send(job).await
        };

        select! {
            biased;
            _ = &mut timer => break StopReason::Deadline,
            res = enqueue => {
                if res.is_err() {
                    break StopReason::Closed;
                }
                produced += 1;
                if opts.requests.is_some_and(|n| produced >= n.get()) {
                    break StopReason::Count;
                }
            }
        }
    };

    tracing::info!(produced, ?reason, "job production stopped");
    (produced, reason)
}

async fn deadline(duration: Option<Duration>) {
    match duration {
        Some(d) => time::sleep(d).await,
        None => future::pending().await,
    }
}

//! A fixed-size pool of workers fed through a bounded queue.
//!
//! The pool owns two bounded channels. The job queue holds one job per worker,
//! so a producer can run at most `size` jobs ahead of the workers before it is
//! suspended. The result queue holds three results per worker; a consumer that
//! falls behind suspends the workers instead of letting results pile up.
//!
//! The result queue is closed by [`WorkerPool::join`] and by nothing else.
//! Callers must keep draining results while joining, otherwise a full result
//! queue deadlocks the pool.
use std::sync::Arc;

use tokio::{
    sync::{Mutex, mpsc},
    task::JoinSet,
    time::Duration,
};

use crate::{
    error::PoolError,
    job::{Job, JobResult},
};

/// Number of result slots per worker.
const RESULTS_PER_WORKER: usize = 3;

/// Largest supported number of workers.
pub const MAX_SIZE: usize = 1 << 20;

/// A fixed set of workers sharing one job queue and one result queue.
pub struct WorkerPool<J> {
    size: usize,
    workers: JoinSet<()>,
    res_tx: mpsc::Sender<JobResult>,
    _job: std::marker::PhantomData<fn(J)>,
}

impl<J: Job> WorkerPool<J> {
    /// Spawn `size` workers.
    ///
    /// Returns the pool together with the sending side of the job queue and
    /// the receiving side of the result queue. Dropping the job sender closes
    /// the job queue; workers exit once it is drained.
    ///
    /// Fails without spawning anything if `size` is zero or above [`MAX_SIZE`].
    ///
    /// Must be called within a tokio runtime.
    pub fn new(size: usize) -> Result<(Self, mpsc::Sender<J>, mpsc::Receiver<JobResult>), PoolError> {
        if size == 0 {
            return Err(PoolError::InvalidSize(size));
        }
        let res_capacity = size
            .checked_mul(RESULTS_PER_WORKER)
            .filter(|_| size <= MAX_SIZE)
            .ok_or(PoolError::TooLarge { size, max: MAX_SIZE })?;

        let (job_tx, job_rx) = mpsc::channel::<J>(size);
        let (res_tx, res_rx) = mpsc::channel(res_capacity);
        let job_rx = Arc::new(Mutex::new(job_rx));

        let mut workers = JoinSet::new();
        for id in 0..size {
            workers.spawn(work(id, job_rx.clone(), res_tx.clone()));
        }
        tracing::debug!(size, "worker pool started");

        let pool = Self { size, workers, res_tx, _job: std::marker::PhantomData };
        Ok((pool, job_tx, res_rx))
    }
}

impl<J> WorkerPool<J> {
    /// Number of workers in the pool.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Wait until every worker has terminated, then close the result queue.
    pub async fn join(mut self) {
        while let Some(res) = self.workers.join_next().await {
            if let Err(e) = res {
                tracing::error!("worker terminated abnormally: {e}");
            }
        }
        tracing::debug!(size = self.size, "worker pool drained");
        // the last sender is dropped here, which closes the result queue
        drop(self.res_tx);
    }
}

async fn work<J: Job>(id: usize, jobs: Arc<Mutex<mpsc::Receiver<J>>>, results: mpsc::Sender<JobResult>) {
    loop {
        // the lock is released as soon as a job is taken
        let job = jobs.lock().await.recv().await;
        let Some(job) = job else { break };

        let res = execute(job).await;
        if results.send(res).await.is_err() {
            tracing::warn!(worker = id, "result queue closed, worker exits early");
            break;
        }
    }
    tracing::debug!(worker = id, "worker finished");
}

/// Run a job in its own task so that a panicking job cannot take the worker down.
async fn execute<J: Job>(job: J) -> JobResult {
    match tokio::spawn(job.run()).await {
        Ok(res) => res,
        Err(e) => JobResult::failed(format!("job aborted: {e}"), Duration::ZERO),
    }
}

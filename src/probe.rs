//! HTTP probes executed by the jobs.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Method, Request};
use tokio::time::{Duration, Instant};

use crate::{
    config::{Config, Target},
    job::{Job, JobResult},
};

/// The capability of executing one probe against a target.
///
/// A probe is shared read-only by every job of a run.
#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// A request ready to be executed.
    type Request: Send;

    /// Build the request for `target`.
    fn prepare(&self, target: &Target) -> Result<Self::Request>;

    /// Execute the request and return the response status code.
    async fn execute(&self, request: Self::Request) -> Result<u16>;
}

/// A [`Probe`] sending HTTP requests through a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Create a probe whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    type Request = Request;

    fn prepare(&self, target: &Target) -> Result<Request> {
        let method = Method::from_bytes(target.method.as_bytes())?;
        let request = self
            .client
            .request(method, target.url.as_str())
            .body(target.payload.clone())
            .build()?;
        Ok(request)
    }

    async fn execute(&self, request: Request) -> Result<u16> {
        let resp = self.client.execute(request).await?;
        Ok(resp.status().as_u16())
    }
}

/// A single probe of the target.
pub struct HttpJob<P> {
    /// Sequence number assigned by the producer, starting at 1.
    pub id: u64,
    target: Arc<Target>,
    probe: Arc<P>,
}

impl<P> HttpJob<P> {
    /// Create a job probing `target` with the shared `probe`.
    pub fn new(id: u64, target: Arc<Target>, probe: Arc<P>) -> Self {
        Self { id, target, probe }
    }
}

#[async_trait]
impl<P: Probe> Job for HttpJob<P> {
    async fn run(self) -> JobResult {
        let request = match self.probe.prepare(&self.target) {
            Ok(request) => request,
            Err(e) => return JobResult::failed(e.to_string(), Duration::ZERO),
        };

        let t = Instant::now();
        let res = self.probe.execute(request).await;
        let elapsed = t.elapsed();

        match res {
            Ok(code) => JobResult::new(code, elapsed),
            Err(e) => {
                tracing::trace!(id = self.id, "probe error: {e:#}");
                JobResult::failed(format!("{e:#}"), elapsed)
            }
        }
    }
}

/// Factory of the jobs of one run.
pub struct JobFactory<P> {
    target: Arc<Target>,
    probe: Arc<P>,
}

impl<P> JobFactory<P> {
    /// Create a factory for the target of `config`.
    pub fn new(config: &Config, probe: P) -> Self {
        Self { target: Arc::new(config.target.clone()), probe: Arc::new(probe) }
    }

    /// Build the job with the given id.
    pub fn job(&self, id: u64) -> HttpJob<P> {
        HttpJob::new(id, self.target.clone(), self.probe.clone())
    }
}

//! Immutable run configuration.
use std::num::NonZeroU64;
#[cfg(feature = "rate_limit")]
use std::num::NonZeroU32;

use bytes::Bytes;
use tokio::time::Duration;

use crate::{cli::Cli, error::ConfigError, pool};

/// Description of the probed endpoint.
///
/// The fields are kept as provided: an unparsable URL or method surfaces as a
/// failed job, not as a startup error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Target URL.
    pub url: String,
    /// HTTP method.
    pub method: String,
    /// Request body.
    pub payload: Bytes,
}

/// Options of a single test run, built once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of concurrent workers.
    pub workers: usize,

    /// Number of requests to send. Unlimited when unset.
    pub requests: Option<NonZeroU64>,

    /// Time limit of the test. Unlimited when unset.
    pub duration: Option<Duration>,

    /// The probed endpoint.
    pub target: Target,

    /// Timeout of a single probe.
    pub timeout: Duration,

    #[cfg(feature = "rate_limit")]
    /// Rate limit, in jobs per second.
    pub rate: Option<NonZeroU32>,
}

impl TryFrom<&Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let url = match cli.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_owned(),
            _ => return Err(ConfigError::MissingTarget),
        };
        let workers = usize::try_from(cli.workers)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(ConfigError::InvalidWorkers(cli.workers))?;
        if workers > pool::MAX_SIZE {
            return Err(ConfigError::TooManyWorkers { requested: cli.workers, max: pool::MAX_SIZE });
        }

        let duration: Duration = cli.timeout.into();

        Ok(Self {
            workers,
            requests: NonZeroU64::new(cli.count),
            duration: (!duration.is_zero()).then_some(duration),
            target: Target {
                url,
                method: cli.method.clone(),
                payload: Bytes::from(cli.data.clone().into_bytes()),
            },
            timeout: cli.reqtimeout.into(),
            #[cfg(feature = "rate_limit")]
            rate: cli.rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("httptester").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::try_from(&parse(&["--url", "http://localhost:8080/"])).unwrap();
        assert_eq!(config.workers, 100);
        assert_eq!(config.requests, None);
        assert_eq!(config.duration, None);
        assert_eq!(config.target.method, "GET");
        assert!(config.target.payload.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_explicit_values() {
        let cli = parse(&[
            "--url", "http://localhost/", "-w", "8", "-c", "50", "-t", "2s", "-m", "POST", "-d", "hello",
            "--reqtimeout", "250ms",
        ]);
        let config = Config::try_from(&cli).unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.requests.map(NonZeroU64::get), Some(50));
        assert_eq!(config.duration, Some(Duration::from_secs(2)));
        assert_eq!(config.target.method, "POST");
        assert_eq!(config.target.payload, Bytes::from_static(b"hello"));
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_missing_url() {
        let res = Config::try_from(&parse(&[]));
        assert!(matches!(res, Err(ConfigError::MissingTarget)));
    }

    #[test]
    fn test_non_positive_workers() {
        let res = Config::try_from(&parse(&["--url", "http://x/", "-w", "0"]));
        assert!(matches!(res, Err(ConfigError::InvalidWorkers(0))));

        let res = Config::try_from(&parse(&["--url", "http://x/", "-w", "-3"]));
        assert!(matches!(res, Err(ConfigError::InvalidWorkers(-3))));
    }

    #[test]
    fn test_too_many_workers() {
        let res = Config::try_from(&parse(&["--url", "http://x/", "-w", "1000000000000000000"]));
        assert!(matches!(
            res,
            Err(ConfigError::TooManyWorkers { requested: 1_000_000_000_000_000_000, max: pool::MAX_SIZE })
        ));

        let max = pool::MAX_SIZE.to_string();
        let config = Config::try_from(&parse(&["--url", "http://x/", "-w", &max])).unwrap();
        assert_eq!(config.workers, pool::MAX_SIZE);
    }
}

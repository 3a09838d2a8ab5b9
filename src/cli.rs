//! This module provides the command line interface of the load tester.
//!
//! ```shell
//! $ httptester --help
//! Usage: httptester [OPTIONS]
//!
//! Options:
//!   -w, --workers <WORKERS>          Parallel workers which perform requests [default: 100]
//!   -c, --count <COUNT>              Total count of requests to send [default: 0]
//!   -t, --timeout <TIMEOUT>          Time limit to perform test [default: 0s]
//!       --url <URL>                  URL to test
//!   -m, --method <METHOD>            HTTP method for test requests [default: GET]
//!   -d, --data <DATA>                Payload for test requests [default: ]
//!       --reqtimeout <REQTIMEOUT>    Timeout for a single request [default: 5s]
//!   -r, --rate <RATE>                Rate limit, in requests per second
//!   -q, --quiet                      Do not print live progress
//!   -o, --output <OUTPUT>            Output format for the report [default: text]
//!   -O, --output-file <OUTPUT_FILE>  Output file path for the report
//!   -h, --help                       Print help
//! ```
use std::{
    fs::File,
    io::{Write, stdout},
    path::PathBuf,
};
#[cfg(feature = "rate_limit")]
use std::num::NonZeroU32;

use clap::{
    Parser, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use crate::{
    collector::{ConsoleCollector, ReportCollector, SilentCollector},
    config::Config,
    error::{ConfigError, PoolError},
    probe::{HttpProbe, JobFactory},
    producer::ProducerOpts,
    report::BenchReport,
    reporter::{BenchReporter, JsonReporter, TextReporter},
    runner,
};

#[derive(Parser, Clone, Debug)]
#[clap(
    version,
    about,
    styles(Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
    )
)]
#[allow(missing_docs)]
pub struct Cli {
    /// Parallel workers which perform requests
    #[clap(long, short = 'w', default_value_t = 100, allow_negative_numbers = true)]
    pub workers: i64,

    /// Total count of requests to send
    ///
    /// 0 means no limit.
    #[clap(long, short = 'c', default_value_t = 0)]
    pub count: u64,

    /// Time limit to perform test
    ///
    /// 0 means no time limit. Examples: -t 10s, -t 5m, -t 1h
    #[clap(long, short = 't', default_value = "0s")]
    pub timeout: humantime::Duration,

    /// URL to test
    #[clap(long)]
    pub url: Option<String>,

    /// HTTP method for test requests
    #[clap(long, short = 'm', default_value = "GET")]
    pub method: String,

    /// Payload for test requests
    #[clap(long, short = 'd', default_value = "")]
    pub data: String,

    /// Timeout for a single request
    #[clap(long, default_value = "5s")]
    pub reqtimeout: humantime::Duration,

    #[cfg(feature = "rate_limit")]
    /// Rate limit, in requests per second
    ///
    /// When set, requests are sent no faster than the given rate.
    #[clap(long, short = 'r')]
    pub rate: Option<NonZeroU32>,

    /// Do not print live progress
    #[clap(long, short = 'q')]
    pub quiet: bool,

    /// Output format for the report
    #[clap(short, long, value_enum, default_value_t = ReportFormat::Text, ignore_case = true)]
    pub output: ReportFormat,

    /// Output file path for the report
    ///
    /// When set, the report will be written to the specified file instead of stdout.
    #[clap(long, short = 'O')]
    pub output_file: Option<PathBuf>,
}

impl Cli {
    /// Get the collector type.
    pub fn collector(&self) -> Collector {
        if self.quiet { Collector::Silent } else { Collector::Console }
    }
}

/// The type of result collector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Collector {
    /// Prints live progress. See [`ConsoleCollector`].
    Console,

    /// Prints nothing until the end. See [`SilentCollector`].
    Silent,
}

/// Report format.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    /// Report in plain text format. See [`TextReporter`].
    Text,

    /// Report in JSON format. See [`JsonReporter`].
    Json,
}

/// Run the load test described by the command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::try_from(&cli)?;
    println!("Starting test for {} {}\n", config.target.method, config.target.url);

    let factory = JobFactory::new(&config, HttpProbe::new(config.timeout)?);
    let workers = config.workers;
    let collector = cli.collector();
    let make_collector = move |res_rx| -> Box<dyn ReportCollector> {
        match collector {
            Collector::Console => Box::new(ConsoleCollector::new(workers, res_rx, stdout())),
            Collector::Silent => Box::new(SilentCollector::new(workers, res_rx)),
        }
    };

    let report = runner::run(workers, &ProducerOpts::from(&config), make_collector, |id| factory.job(id)).await?;

    match cli.output_file {
        Some(path) => print(cli.output, &mut File::create(path)?, &report),
        None => print(cli.output, &mut stdout(), &report),
    }
}

/// Process exit code for a failed run.
///
/// Configuration errors, including an invalid pool size, exit with
/// [`ConfigError::EXIT_CODE`]. Anything else exits with 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.is::<ConfigError>() || err.is::<PoolError>() { ConfigError::EXIT_CODE } else { 1 }
}

fn print(format: ReportFormat, w: &mut dyn Write, report: &BenchReport) -> anyhow::Result<()> {
    let reporter: &dyn BenchReporter = match format {
        ReportFormat::Text => &TextReporter,
        ReportFormat::Json => &JsonReporter,
    };
    reporter.print(w, report)
}

use crate::{histogram::PERCENTAGES, report::BenchReport};

use super::BenchReporter;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{collections::BTreeMap, io::Write};

/// Report in JSON format.
pub struct JsonReporter;

impl BenchReporter for JsonReporter {
    fn print(&self, w: &mut dyn Write, report: &BenchReport) -> anyhow::Result<()> {
        let stats = &report.stats;
        let summary = Summary {
            started_at: report.started_at,
            total_time: report.elapsed.as_secs_f64(),
            concurrency: report.concurrency,
            total: stats.total,
            sent: stats.sent(),
            success: stats.success.count,
            failed: stats.failed,
            rps: report.rps(),
        };

        let latency = if report.hist.is_empty() {
            None
        } else {
            Latency {
                avg: stats.success.mean_secs(),
                min: report.hist.min().as_secs_f64(),
                max: report.hist.max().as_secs_f64(),
                stdev: report.hist.stdev().as_secs_f64(),
                percentiles: report
                    .hist
                    .percentiles(PERCENTAGES)
                    .map(|(p, v)| (format!("p{p}"), v.as_secs_f64()))
                    .collect(),
            }
            .into()
        };

        serde_json::to_writer_pretty(
            &mut *w,
            &Report {
                summary,
                latency,
                server_errors: stats.server_errors.iter().map(|(k, &v)| (k.to_string(), v)).collect(),
            },
        )?;

        writeln!(w)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct Summary {
    started_at: DateTime<Utc>,
    total_time: f64,
    concurrency: usize,
    total: u64,
    sent: u64,
    success: u64,
    failed: u64,
    rps: f64,
}

#[derive(Serialize)]
struct Latency {
    avg: f64,
    min: f64,
    max: f64,
    stdev: f64,
    percentiles: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct Report {
    summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency: Option<Latency>,
    server_errors: BTreeMap<String, u64>,
}

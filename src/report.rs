use anyhow::Result;
use chrono::{DateTime, Utc};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::runner::BenchOutcome;
use crate::stats::Summary;
use crate::types::{InvocationSpec, TimingSample};

/// `Elapsed times: <mean> +/- <stddev>`, seconds with six decimals.
pub fn format_text(summary: &Summary) -> String {
    let mean = format!("{:.6}", summary.mean);
    let std_dev = format!("{:.6}", summary.std_dev);
    format!(
        "Elapsed times: {} +/- {}\n",
        mean.if_supports_color(Stream::Stdout, |s| s.green()),
        std_dev.if_supports_color(Stream::Stdout, |s| s.yellow()),
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    test_file: String,
    iterations: usize,
    heap_size: u64,
    started_at: DateTime<Utc>,
    mean_secs: f64,
    stddev_secs: f64,
    min_secs: f64,
    max_secs: f64,
    samples: &'a [TimingSample],
}

pub fn format_json(spec: &InvocationSpec, outcome: &BenchOutcome) -> Result<String> {
    let report = JsonReport {
        target: &spec.target,
        test_file: outcome.test_file.to_string_lossy().to_string(),
        iterations: outcome.summary.count,
        heap_size: spec.heap_size,
        started_at: outcome.started_at,
        mean_secs: outcome.summary.mean,
        stddev_secs: outcome.summary.std_dev,
        min_secs: outcome.summary.min,
        max_secs: outcome.summary.max,
        samples: &outcome.samples,
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::process::Launcher;
use crate::report;
use crate::stats::Summary;
use crate::types::{InvocationSpec, ReportFormat, TimingSample};

pub const PROGRESS_MARKER: &str = ".";

/// Result of a completed benchmark.
#[derive(Debug, Clone)]
pub struct BenchOutcome {
    pub samples: Vec<TimingSample>,
    pub summary: Summary,
    pub test_file: PathBuf,
    pub started_at: DateTime<Utc>,
}

/// Build, then run the VM `spec.iterations` times, writing one progress
/// marker to `out` per run. A failed build returns before anything is written.
/// If a run fails after markers were written, the marker line is ended first.
pub fn run_benchmark<L: Launcher, W: Write>(
    launcher: &mut L,
    spec: &InvocationSpec,
    test_file: &Path,
    out: &mut W,
) -> Result<BenchOutcome> {
    launcher.build(spec)?;

    let started_at = Utc::now();
    let mut samples = Vec::with_capacity(spec.iterations as usize);

    for i in 0..spec.iterations {
        let sample = match launcher.run_target(spec, test_file) {
            Ok(sample) => sample,
            Err(err) => {
                if i > 0 {
                    writeln!(out)?;
                    out.flush()?;
                }
                return Err(err);
            }
        };
        tracing::debug!(
            iteration = i,
            elapsed_secs = sample.elapsed_secs,
            exit_code = ?sample.exit_code,
            "sample"
        );
        samples.push(sample);

        out.write_all(PROGRESS_MARKER.as_bytes())?;
        out.flush()?;
    }

    let times: Vec<f64> = samples.iter().map(|s| s.elapsed_secs).collect();
    let summary = Summary::from_samples(&times)
        .ok_or_else(|| anyhow::anyhow!("Iteration count must be at least 1"))?;

    Ok(BenchOutcome {
        samples,
        summary,
        test_file: test_file.to_path_buf(),
        started_at,
    })
}

/// Write the final report, preceded by the newline that ends the progress line.
pub fn write_report<W: Write>(
    out: &mut W,
    spec: &InvocationSpec,
    outcome: &BenchOutcome,
    format: ReportFormat,
) -> Result<()> {
    let body = match format {
        ReportFormat::Text => report::format_text(&outcome.summary),
        ReportFormat::Json => report::format_json(spec, outcome)?,
    };
    write!(out, "\n{}", body)?;
    out.flush()?;
    Ok(())
}

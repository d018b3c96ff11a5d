//! Probe aggregation and run-level statistics
//!
//! The aggregator owns the measurement loop: it runs probes strictly
//! sequentially (each probe owns the device for its whole window),
//! checks the cancellation flag between probes, and turns the finished
//! series into a `RunResult` with ping-style statistics.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use colored::Colorize;

use crate::error::{AppError, Result};
use crate::models::{Config, ProbeSample, ProbeSeries, RunResult};
use crate::probe::probe_once;
use crate::session::MeasurementSession;

/// Settings the aggregator needs from the full configuration
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Number of probes to run
    pub probe_count: u32,
    /// Per-probe timeout budget
    pub timeout: Duration,
    /// Emit one line per probe as it completes
    pub verbose: bool,
    /// Color the per-probe lines
    pub enable_color: bool,
}

impl From<&Config> for AggregatorConfig {
    fn from(config: &Config) -> Self {
        Self {
            probe_count: config.probe_count,
            timeout: config.timeout(),
            verbose: config.verbose,
            enable_color: config.enable_color,
        }
    }
}

/// Executor seam for the measurement loop. The binary uses
/// `ProbeAggregator`; tests substitute their own runner.
#[async_trait]
pub trait ProbeRunner {
    /// Run the configured number of probes against the session's device
    async fn run(&self, session: &MeasurementSession) -> Result<RunResult>;
}

/// Sequential probe loop with statistics at the end
pub struct ProbeAggregator {
    config: AggregatorConfig,
}

impl ProbeAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(AggregatorConfig::from(config))
    }

    /// One ping-style line per probe, only in verbose mode
    fn emit_sample(&self, sample: &ProbeSample) {
        if !self.config.verbose {
            return;
        }
        let line = format_probe_line(sample);
        if self.config.enable_color {
            let colored_line = if sample.is_successful() {
                line.green()
            } else {
                line.red()
            };
            println!("{}", colored_line);
        } else {
            println!("{}", line);
        }
    }
}

/// Render one probe outcome the way ping renders one reply
pub fn format_probe_line(sample: &ProbeSample) -> String {
    match sample.latency_us() {
        Some(us) => format!(
            "seq={} latency={} µs polls={}",
            sample.sequence, us, sample.poll_count
        ),
        None => {
            let (reason, message) = sample
                .failure()
                .expect("sample without latency carries a failure");
            format!("seq={} {}: {}", sample.sequence, reason.tag(), message)
        }
    }
}

#[async_trait]
impl ProbeRunner for ProbeAggregator {
    async fn run(&self, session: &MeasurementSession) -> Result<RunResult> {
        let started_at = Utc::now();
        let run_start = Instant::now();
        let mut series = ProbeSeries::with_capacity(self.config.probe_count as usize);

        for sequence in 1..=self.config.probe_count {
            if session.is_cancelled() {
                break;
            }

            let sample = probe_once(session, sequence, self.config.timeout).await;
            self.emit_sample(&sample);
            series.push(sample);
        }

        let elapsed = run_start.elapsed();

        if series.success_count() == 0 {
            return Err(AppError::all_probes_failed(format!(
                "0 of {} probes succeeded ({} timeouts, {} device errors)",
                series.len(),
                series.timeout_count(),
                series.failed_count()
            )));
        }

        Ok(RunResult::from_series(
            self.config.probe_count,
            series,
            elapsed,
            started_at,
        ))
    }
}

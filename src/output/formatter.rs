//! Core formatting traits and implementations
//!
//! This module defines the output formatting interface and provides
//! a plain text implementation for the run report.

use crate::{
    error::{AppError, Result},
    models::{LatencyStatistics, RunResult},
};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format run summary (counts and wall-clock duration)
    fn format_run_summary(&self, result: &RunResult) -> Result<String>;

    /// Format latency statistics in ping style
    fn format_statistics(&self, stats: &LatencyStatistics) -> Result<String>;

    /// Format recommendations
    fn format_recommendations(&self, result: &RunResult) -> Result<String>;

    /// Format a quick one-line summary for progress updates
    fn format_quick_summary(&self, result: &RunResult) -> Result<String>;

    /// Format error messages
    fn format_error(&self, error: &str) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;

    /// Format success messages
    fn format_success(&self, message: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Enable verbose mode with detailed information
    pub verbose_mode: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
        }
    }
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    /// Format a microsecond latency in human-readable units
    pub(super) fn format_latency(&self, us: f64) -> String {
        if us < 1_000.0 {
            format!("{:.0}µs", us)
        } else if us < 1_000_000.0 {
            format!("{:.2}ms", us / 1_000.0)
        } else {
            format!("{:.2}s", us / 1_000_000.0)
        }
    }

    /// Format a wall-clock duration in seconds
    pub(super) fn format_elapsed(&self, elapsed: std::time::Duration) -> String {
        let secs = elapsed.as_secs_f64();
        if secs < 1.0 {
            format!("{:.0}ms", secs * 1_000.0)
        } else if secs < 60.0 {
            format!("{:.2}s", secs)
        } else {
            let minutes = (secs / 60.0) as u32;
            format!("{}m{:.1}s", minutes, secs % 60.0)
        }
    }

    /// Format percentage with appropriate precision
    pub(super) fn format_percentage(&self, percentage: f64) -> String {
        if percentage >= 99.95 {
            "100.0%".to_string()
        } else if percentage < 0.05 {
            "0.0%".to_string()
        } else {
            format!("{:.1}%", percentage)
        }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "=".repeat(title.len() + 4);

        writeln!(output, "{}", border)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        writeln!(output, "  {}  ", title)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        write!(output, "{}", border)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;

        Ok(output)
    }

    fn format_run_summary(&self, result: &RunResult) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "Run Summary:")
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(output, "-----------")
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(
            output,
            "Probes executed:  {} of {} requested{}",
            result.executed_count,
            result.requested_count,
            if result.was_cancelled() {
                " (interrupted)"
            } else {
                ""
            }
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(
            output,
            "Successful:       {} ({})",
            result.success_count,
            self.format_percentage(result.success_rate())
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(output, "Timeouts:         {}", result.timeout_count)
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(output, "Device errors:    {}", result.failed_count)
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(output, "Bits transferred: {}", result.bits_transferred)
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        if self.options.verbose_mode {
            writeln!(
                output,
                "Started at:       {}",
                result.started_at.format("%Y-%m-%d %H:%M:%S%.3f UTC")
            )
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        }
        write!(
            output,
            "Total duration:   {}",
            self.format_elapsed(result.elapsed)
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;

        Ok(output)
    }

    fn format_statistics(&self, stats: &LatencyStatistics) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "Latency Statistics:")
            .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(output, "------------------")
            .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(
            output,
            "round-trip min/avg/max = {}/{}/{} µs",
            stats.min_us, stats.mean_us.round() as u64, stats.max_us
        )
        .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(
            output,
            "spread (max-min):  {} µs",
            stats.spread_us
        )
        .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(output, "std deviation:     {:.1} µs", stats.std_dev_us)
            .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        write!(
            output,
            "throughput:        {:.3} bits/ms over {} samples",
            stats.throughput_bits_per_ms, stats.sample_count
        )
        .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;

        Ok(output)
    }

    fn format_recommendations(&self, result: &RunResult) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "Recommendations:")
            .map_err(|e| AppError::io(format!("Failed to format recommendations: {}", e)))?;
        writeln!(output, "---------------")
            .map_err(|e| AppError::io(format!("Failed to format recommendations: {}", e)))?;

        let mut wrote_any = false;

        if result.success_rate() < 95.0 {
            writeln!(
                output,
                "• Success rate is below 95% - check the TX to RX jumper wiring"
            )
            .map_err(|e| AppError::io(format!("Failed to format recommendations: {}", e)))?;
            wrote_any = true;
        }

        if result.timeout_count > 0 && result.success_count == 0 {
            writeln!(
                output,
                "• Every probe timed out - the loopback jumper is likely missing"
            )
            .map_err(|e| AppError::io(format!("Failed to format recommendations: {}", e)))?;
            wrote_any = true;
        }

        if let Some(ref stats) = result.statistics {
            if stats.mean_us > 10_000.0 {
                writeln!(
                    output,
                    "• Mean latency above 10ms suggests USB hub or driver buffering, try a direct port"
                )
                .map_err(|e| AppError::io(format!("Failed to format recommendations: {}", e)))?;
                wrote_any = true;
            }
            if stats.sample_count >= 3 && stats.std_dev_us > stats.mean_us {
                writeln!(
                    output,
                    "• Latency jitter exceeds the mean, consider a longer run for stable numbers"
                )
                .map_err(|e| AppError::io(format!("Failed to format recommendations: {}", e)))?;
                wrote_any = true;
            }
        }

        if !wrote_any {
            writeln!(output, "• Loopback path looks healthy")
                .map_err(|e| AppError::io(format!("Failed to format recommendations: {}", e)))?;
        }

        Ok(output)
    }

    fn format_quick_summary(&self, result: &RunResult) -> Result<String> {
        let avg = result
            .statistics
            .as_ref()
            .map(|s| format!("{:.0} µs avg", s.mean_us))
            .unwrap_or_else(|| "no samples".to_string());

        Ok(format!(
            "Probes: {}/{} successful ({}) | {} | Duration: {}",
            result.success_count,
            result.executed_count,
            self.format_percentage(result.success_rate()),
            avg,
            self.format_elapsed(result.elapsed)
        ))
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("ERROR: {}", error))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("WARNING: {}", warning))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("SUCCESS: {}", message))
    }
}

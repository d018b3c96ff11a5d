//! Colored formatter implementation with terminal color support
//!
//! This module provides a colored output formatter that uses ANSI
//! colors for enhanced visual presentation of the run report.

use crate::{
    error::Result,
    models::{LatencyStatistics, RunResult},
    types::LatencyLevel,
};
use super::formatter::{FormattingOptions, OutputFormatter, PlainFormatter};
use colored::*;
use std::time::Duration;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            muted: Color::BrightBlack,
        }
    }
}

/// Terminal color for a latency classification
fn latency_color(level: LatencyLevel) -> Color {
    match level {
        LatencyLevel::Good => Color::Green,
        LatencyLevel::Moderate => Color::Yellow,
        LatencyLevel::Poor => Color::Red,
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        let plain_formatter = PlainFormatter::new(options.clone());
        Self {
            plain_formatter,
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Create a colored formatter with custom color scheme
    pub fn with_color_scheme(options: FormattingOptions, color_scheme: ColorScheme) -> Self {
        let plain_formatter = PlainFormatter::new(options.clone());
        Self {
            plain_formatter,
            options,
            color_scheme,
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Apply bold formatting if colors are enabled
    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// Color a success rate by how healthy it is
    fn success_rate_color(&self, percentage: f64) -> Color {
        if percentage >= 95.0 {
            self.color_scheme.success
        } else if percentage >= 80.0 {
            self.color_scheme.warning
        } else {
            self.color_scheme.error
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let plain = self.plain_formatter.format_header(title)?;
        Ok(self.bold(&self.colorize(&plain, self.color_scheme.header)).to_string())
    }

    fn format_run_summary(&self, result: &RunResult) -> Result<String> {
        let plain = self.plain_formatter.format_run_summary(result)?;

        let mut lines = Vec::new();
        for line in plain.lines() {
            if line.starts_with("Successful:") {
                let color = self.success_rate_color(result.success_rate());
                lines.push(self.colorize(line, color).to_string());
            } else if line.starts_with("Timeouts:") && result.timeout_count > 0 {
                lines.push(self.colorize(line, self.color_scheme.warning).to_string());
            } else if line.starts_with("Device errors:") && result.failed_count > 0 {
                lines.push(self.colorize(line, self.color_scheme.error).to_string());
            } else {
                lines.push(line.to_string());
            }
        }

        Ok(lines.join("\n"))
    }

    fn format_statistics(&self, stats: &LatencyStatistics) -> Result<String> {
        let plain = self.plain_formatter.format_statistics(stats)?;
        let level = LatencyLevel::from_duration(Duration::from_micros(stats.mean_us as u64));
        let color = latency_color(level);

        let mut lines = Vec::new();
        for line in plain.lines() {
            if line.starts_with("round-trip") {
                lines.push(self.colorize(line, color).to_string());
            } else {
                lines.push(line.to_string());
            }
        }

        Ok(lines.join("\n"))
    }

    fn format_recommendations(&self, result: &RunResult) -> Result<String> {
        let plain = self.plain_formatter.format_recommendations(result)?;

        let mut lines = Vec::new();
        for line in plain.lines() {
            if line.contains("looks healthy") {
                lines.push(self.colorize(line, self.color_scheme.success).to_string());
            } else if line.starts_with('•') {
                lines.push(self.colorize(line, self.color_scheme.warning).to_string());
            } else {
                lines.push(line.to_string());
            }
        }

        Ok(lines.join("\n"))
    }

    fn format_quick_summary(&self, result: &RunResult) -> Result<String> {
        let plain = self.plain_formatter.format_quick_summary(result)?;
        let color = self.success_rate_color(result.success_rate());
        Ok(self.colorize(&plain, color).to_string())
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!(
            "{} {}",
            self.bold(&self.colorize("ERROR:", self.color_scheme.error)),
            error
        ))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!(
            "{} {}",
            self.bold(&self.colorize("WARNING:", self.color_scheme.warning)),
            warning
        ))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!(
            "{} {}",
            self.bold(&self.colorize("SUCCESS:", self.color_scheme.success)),
            message
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProbeSample, ProbeSeries};
    use chrono::Utc;

    fn sample_result() -> RunResult {
        let mut series = ProbeSeries::with_capacity(2);
        series.push(ProbeSample::success(1, Duration::from_micros(400), 10));
        series.push(ProbeSample::success(2, Duration::from_micros(600), 12));
        RunResult::from_series(2, series, Duration::from_millis(50), Utc::now())
    }

    fn uncolored() -> ColoredFormatter {
        ColoredFormatter::new(FormattingOptions {
            enable_color: false,
            verbose_mode: false,
        })
    }

    #[test]
    fn test_latency_color_mapping() {
        assert_eq!(latency_color(LatencyLevel::Good), Color::Green);
        assert_eq!(latency_color(LatencyLevel::Moderate), Color::Yellow);
        assert_eq!(latency_color(LatencyLevel::Poor), Color::Red);
    }

    #[test]
    fn test_success_rate_color_thresholds() {
        let formatter = uncolored();
        assert_eq!(formatter.success_rate_color(100.0), Color::Green);
        assert_eq!(formatter.success_rate_color(85.0), Color::Yellow);
        assert_eq!(formatter.success_rate_color(50.0), Color::Red);
    }

    #[test]
    fn test_disabled_colors_match_plain_content() {
        let formatter = uncolored();
        let result = sample_result();

        let summary = formatter.format_run_summary(&result).unwrap();
        assert!(summary.contains("Successful:       2"));
        assert!(!summary.contains("\u{1b}["), "no ANSI codes expected");
    }

    #[test]
    fn test_statistics_keep_ping_style_line() {
        let formatter = uncolored();
        let result = sample_result();
        let stats = result.statistics.as_ref().unwrap();

        let formatted = formatter.format_statistics(stats).unwrap();
        assert!(formatted.contains("round-trip min/avg/max = 400/500/600 µs"));
    }

    #[test]
    fn test_message_prefixes_survive_colorizing() {
        let formatter = uncolored();
        assert!(formatter.format_error("boom").unwrap().contains("ERROR:"));
        assert!(formatter.format_warning("care").unwrap().contains("WARNING:"));
        assert!(formatter.format_success("done").unwrap().contains("SUCCESS:"));
    }

    #[test]
    fn test_custom_color_scheme() {
        let scheme = ColorScheme {
            header: Color::Magenta,
            ..ColorScheme::default()
        };
        let formatter = ColoredFormatter::with_color_scheme(
            FormattingOptions {
                enable_color: false,
                verbose_mode: false,
            },
            scheme,
        );

        let header = formatter.format_header("Report").unwrap();
        assert!(header.contains("Report"));
    }
}

//! Output formatting and display system
//!
//! This module provides a flexible output formatting system for the
//! run report, supporting both colored and plain text output.

mod formatter;
mod colored;

pub use formatter::{FormattingOptions, OutputFormatter, PlainFormatter};
pub use colored::{ColorScheme, ColoredFormatter};

use crate::{
    error::Result,
    models::{Config, RunResult},
};

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }

    /// Create a formatter from the application configuration
    pub fn from_config(config: &Config) -> Box<dyn OutputFormatter> {
        Self::create_formatter(config.enable_color, config.verbose)
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn OutputFormatter> {
        Self::create_formatter(false, true)
    }
}

/// Main output coordinator that handles all result display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the specified formatter
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Create a coordinator from the application configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(OutputFormatterFactory::from_config(config))
    }

    /// Display complete run results
    pub fn display_results(&self, result: &RunResult) -> Result<String> {
        let mut output = String::new();

        // Header
        output.push_str(&self.formatter.format_header("Loopback Latency Results")?);
        output.push_str("\n\n");

        // Run summary
        output.push_str(&self.formatter.format_run_summary(result)?);
        output.push_str("\n\n");

        // Statistics over the successful probes
        if let Some(ref stats) = result.statistics {
            output.push_str(&self.formatter.format_statistics(stats)?);
            output.push_str("\n\n");
        }

        // Recommendations
        output.push_str(&self.formatter.format_recommendations(result)?);

        Ok(output)
    }

    /// Display a quick summary for progress updates
    pub fn display_quick_summary(&self, result: &RunResult) -> Result<String> {
        self.formatter.format_quick_summary(result)
    }

    /// Display an error message in the configured style
    pub fn display_error(&self, error: &str) -> Result<String> {
        self.formatter.format_error(error)
    }

    /// Display a warning message in the configured style
    pub fn display_warning(&self, warning: &str) -> Result<String> {
        self.formatter.format_warning(warning)
    }
}

//! Command-line interface module with topic help system

pub mod help;

pub use help::HelpSystem;

use clap::Parser;

/// Loopback Latency Tester - measures hardware round-trip latency through an FTDI bit-bang loopback
#[derive(Parser, Debug, Clone)]
#[command(name = "llt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of loopback probes to run
    #[arg(short, long, default_value_t = crate::defaults::DEFAULT_PROBE_COUNT)]
    pub count: u32,

    /// Per-probe timeout in milliseconds
    #[arg(short, long = "timeout-ms", value_name = "MS", value_parser = parse_timeout_ms,
          default_value_t = crate::defaults::DEFAULT_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,

    /// USB vendor ID of the adapter (hex or decimal)
    #[arg(long, value_parser = parse_usb_id_arg, default_value = "0x0403")]
    pub vid: u16,

    /// USB product ID of the adapter (hex or decimal)
    #[arg(long, value_parser = parse_usb_id_arg, default_value = "0x6001")]
    pub pid: u16,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output (one line per probe)
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Run the diagnostic bit sweep instead of measuring
    #[arg(long)]
    pub sweep: bool,

    /// Blink this pin (1-8) instead of measuring
    #[arg(short, long, value_name = "PIN")]
    pub blink: Option<u8>,

    /// Blink half-period in milliseconds
    #[arg(long, value_name = "MS", default_value_t = crate::defaults::DEFAULT_BLINK_PERIOD.as_millis() as u64)]
    pub blink_period_ms: u64,

    /// Show help for specific topic (wiring, timeout, output, examples)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.sweep && self.blink.is_some() {
            return Err("Cannot specify both --sweep and --blink".to_string());
        }

        if let Some(pin) = self.blink {
            if !(1..=8).contains(&pin) {
                return Err(format!("Blink pin must be between 1 and 8, got {}", pin));
            }
        }

        if self.blink_period_ms == 0 {
            return Err("Blink period must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Check if help should be displayed for a specific topic
    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    /// Get the help topic if specified
    pub fn get_help_topic(&self) -> Option<&str> {
        self.help_topic.as_deref()
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }

    /// Display help for the specified topic or main help
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();

        if let Some(topic) = &self.help_topic {
            help_system.display_topic_help(topic, use_colors).unwrap_or_else(|| {
                format!(
                    "Unknown help topic: '{}'\n\nAvailable topics: wiring, timeout, output, examples, env\n\n{}",
                    topic,
                    help_system.display_main_help(use_colors)
                )
            })
        } else {
            help_system.display_main_help(use_colors)
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Configuration Summary:\n");
        summary.push_str(&format!("  Probe count: {}\n", self.count));
        summary.push_str(&format!("  Timeout: {}ms\n", self.timeout_ms));
        summary.push_str(&format!("  Adapter: {:04x}:{:04x}\n", self.vid, self.pid));
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        if self.sweep {
            summary.push_str("  Mode: diagnostic sweep\n");
        }

        if let Some(pin) = self.blink {
            summary.push_str(&format!(
                "  Mode: blink pin {} every {}ms\n",
                pin, self.blink_period_ms
            ));
        }

        summary
    }
}

/// Parse a probe timeout given in milliseconds
fn parse_timeout_ms(s: &str) -> Result<u64, String> {
    // Reject strings with leading + sign or hex prefixes
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid timeout: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid timeout: {}", s))
        .and_then(|ms| {
            if ms == 0 {
                Err("Timeout must be greater than 0".to_string())
            } else if ms > 60_000 {
                Err("Timeout cannot exceed 60000 milliseconds".to_string())
            } else {
                Ok(ms)
            }
        })
}

/// Parse a USB vendor/product ID in hex or decimal form
fn parse_usb_id_arg(s: &str) -> Result<u16, String> {
    crate::models::config::parse_usb_id(s).ok_or_else(|| format!("Invalid USB ID: {}", s))
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    // Check for common environment variables that indicate color support
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check for NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for FORCE_COLOR environment variable
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Default to true on Unix-like systems, false on Windows
    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}

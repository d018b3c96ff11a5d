//! Configuration data model and validation

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of probes per run
    #[serde(default = "default_probe_count")]
    pub probe_count: u32,

    /// Per-probe timeout budget in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// USB vendor ID of the adapter
    #[serde(default = "default_vid")]
    pub vid: u16,

    /// USB product ID of the adapter
    #[serde(default = "default_pid")]
    pub pid: u16,

    /// Bit-bang clock baud rate
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output (per-probe lines)
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,

    /// Run the diagnostic bit sweep instead of measuring
    #[serde(default)]
    pub sweep: bool,

    /// Blink this 1-based pin instead of measuring
    #[serde(default)]
    pub blink_pin: Option<u8>,

    /// Blink half-period in milliseconds
    #[serde(default = "default_blink_period_ms")]
    pub blink_period_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_count: default_probe_count(),
            timeout_ms: default_timeout_ms(),
            vid: default_vid(),
            pid: default_pid(),
            baud_rate: default_baud_rate(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
            sweep: false,
            blink_pin: None,
            blink_period_ms: default_blink_period_ms(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-probe timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Blink half-period as a Duration
    pub fn blink_period(&self) -> Duration {
        Duration::from_millis(self.blink_period_ms)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.probe_count == 0 {
            return Err(AppError::config("Probe count must be greater than 0"));
        }

        if self.probe_count > 10_000 {
            return Err(AppError::config("Probe count cannot exceed 10000"));
        }

        if self.timeout_ms == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_ms > 60_000 {
            return Err(AppError::config("Timeout cannot exceed 60000 milliseconds"));
        }

        if self.vid == 0 {
            return Err(AppError::config("Vendor ID cannot be zero"));
        }

        if self.pid == 0 {
            return Err(AppError::config("Product ID cannot be zero"));
        }

        if self.baud_rate == 0 {
            return Err(AppError::config("Baud rate must be greater than 0"));
        }

        if let Some(pin) = self.blink_pin {
            if !(1..=8).contains(&pin) {
                return Err(AppError::config(format!(
                    "Blink pin must be between 1 and 8, got {}",
                    pin
                )));
            }
        }

        if self.blink_period_ms < 10 {
            return Err(AppError::config(
                "Blink period must be at least 10 milliseconds",
            ));
        }

        if self.blink_period_ms > 60_000 {
            return Err(AppError::config(
                "Blink period cannot exceed 60000 milliseconds",
            ));
        }

        if self.sweep && self.blink_pin.is_some() {
            return Err(AppError::config(
                "Sweep and blink modes cannot be combined",
            ));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(count) = std::env::var("PROBE_COUNT") {
            self.probe_count = count.parse().map_err(|e| {
                AppError::config(format!("Invalid PROBE_COUNT value '{}': {}", count, e))
            })?;
        }

        if let Ok(timeout) = std::env::var("TIMEOUT_MS") {
            self.timeout_ms = timeout.parse().map_err(|e| {
                AppError::config(format!("Invalid TIMEOUT_MS value '{}': {}", timeout, e))
            })?;
        }

        if let Ok(vid) = std::env::var("FTDI_VID") {
            self.vid = parse_usb_id(&vid)
                .ok_or_else(|| AppError::config(format!("Invalid FTDI_VID value '{}'", vid)))?;
        }

        if let Ok(pid) = std::env::var("FTDI_PID") {
            self.pid = parse_usb_id(&pid)
                .ok_or_else(|| AppError::config(format!("Invalid FTDI_PID value '{}'", pid)))?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.parse().map_err(|e| {
                AppError::config(format!(
                    "Invalid ENABLE_COLOR value '{}': {}",
                    enable_color, e
                ))
            })?;
        }

        Ok(())
    }
}

/// Parse a USB ID given as hex (with or without `0x`) or decimal
pub fn parse_usb_id(value: &str) -> Option<u16> {
    let trimmed = value.trim();
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16).ok()
    } else if trimmed.chars().any(|c| c.is_ascii_hexdigit() && !c.is_ascii_digit()) {
        u16::from_str_radix(trimmed, 16).ok()
    } else {
        trimmed.parse().ok()
    }
}

// Default value functions for serde
fn default_probe_count() -> u32 {
    crate::defaults::DEFAULT_PROBE_COUNT
}

fn default_timeout_ms() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_vid() -> u16 {
    crate::defaults::DEFAULT_VID
}

fn default_pid() -> u16 {
    crate::defaults::DEFAULT_PID
}

fn default_baud_rate() -> u32 {
    crate::defaults::DEFAULT_BAUD_RATE
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

fn default_blink_period_ms() -> u64 {
    crate::defaults::DEFAULT_BLINK_PERIOD.as_millis() as u64
}

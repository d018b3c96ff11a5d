//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::models::config::parse_usb_id;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        // Try to load .env from current directory
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

            if debug {
                println!("Loaded configuration from .env file");
            }
        } else if debug {
            println!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# Loopback Latency Tester Configuration
#
# This file contains environment variables that can be used to configure
# the loopback latency tester. Values specified here will be used as
# defaults, but can be overridden by command-line arguments.

# Number of probes per run (1-10000)
# PROBE_COUNT=10

# Per-probe timeout in milliseconds (1-60000)
# TIMEOUT_MS=1000

# USB vendor ID of the adapter (hex or decimal)
# FTDI_VID=0x0403

# USB product ID of the adapter (hex or decimal)
# FTDI_PID=0x6001

# Enable colored output (true/false)
# ENABLE_COLOR=true

# Example configurations for different scenarios:
#
# Quick wiring check with a short timeout:
# PROBE_COUNT=5
# TIMEOUT_MS=50
#
# Long soak run:
# PROBE_COUNT=1000
# TIMEOUT_MS=1000
#
# FT-X series adapter:
# FTDI_PID=0x6015
"#
        .to_string()
    }

    /// Save example .env file to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        use std::fs;

        let content = Self::create_example_env_content();
        fs::write(path, content)
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))?;

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "PROBE_COUNT" => {
                let count: u32 = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid PROBE_COUNT value '{}': {}", value, e))
                })?;
                if count == 0 || count > 10_000 {
                    return Err(AppError::config(format!(
                        "PROBE_COUNT must be between 1 and 10000, got: {}",
                        count
                    )));
                }
            }
            "TIMEOUT_MS" => {
                let timeout: u64 = value.parse().map_err(|e| {
                    AppError::config(format!("Invalid TIMEOUT_MS value '{}': {}", value, e))
                })?;
                if timeout == 0 || timeout > 60_000 {
                    return Err(AppError::config(format!(
                        "TIMEOUT_MS must be between 1 and 60000, got: {}",
                        timeout
                    )));
                }
            }
            "FTDI_VID" => {
                let vid = parse_usb_id(value).ok_or_else(|| {
                    AppError::config(format!("Invalid FTDI_VID value '{}'", value))
                })?;
                if vid == 0 {
                    return Err(AppError::config("FTDI_VID cannot be zero".to_string()));
                }
            }
            "FTDI_PID" => {
                let pid = parse_usb_id(value).ok_or_else(|| {
                    AppError::config(format!("Invalid FTDI_PID value '{}'", value))
                })?;
                if pid == 0 {
                    return Err(AppError::config("FTDI_PID cannot be zero".to_string()));
                }
            }
            "ENABLE_COLOR" => {
                value.parse::<bool>().map_err(|e| {
                    AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e))
                })?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("PROBE_COUNT", "Number of probes per run (1-10000)", "10"),
            ("TIMEOUT_MS", "Per-probe timeout in milliseconds (1-60000)", "1000"),
            ("FTDI_VID", "USB vendor ID of the adapter", "0x0403"),
            ("FTDI_PID", "USB product ID of the adapter", "0x6001"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<14} {}\n", var, description));
            help.push_str(&format!("  {:<14} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Result<Vec<String>> {
        let mut warnings = Vec::new();

        for (var_name, _, _) in Self::get_supported_env_vars() {
            if let Ok(value) = std::env::var(var_name) {
                if let Err(e) = Self::validate_env_var(var_name, &value) {
                    warnings.push(format!("Warning: {}", e));
                }
            }
        }

        Ok(warnings)
    }

    /// Check if .env file exists and validate its contents
    pub fn check_env_file() -> Result<Option<Vec<String>>> {
        if !Path::new(".env").exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(".env")
            .map_err(|e| AppError::config(format!("Failed to read .env file: {}", e)))?;

        let mut warnings = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim();

                if let Err(e) = Self::validate_env_var(key, value) {
                    warnings.push(format!("Line '{}': {}", line, e));
                }
            }
        }

        Ok(Some(warnings))
    }
}

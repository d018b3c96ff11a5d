//! Configuration validation utilities and rules

use crate::{
    error::Result,
    models::Config,
};

/// Configuration validator with advanced validation rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration with comprehensive checks
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();

        // Basic validation (already done in Config::validate)
        config.validate()?;

        // Advanced validation checks
        warnings.extend(Self::validate_adapter(config));
        warnings.extend(Self::validate_measurement_settings(config));
        warnings.extend(Self::validate_diagnostic_settings(config));

        Ok(warnings)
    }

    /// Validate adapter identity and baud rate
    fn validate_adapter(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.vid != 0x0403 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Vendor ID {:#06x} is not the FTDI vendor ID (0x0403), ensure the adapter supports bit-bang mode",
                    config.vid
                ),
            ));
        } else if let Some(name) = Self::known_ftdi_product(config.pid) {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Using well-known FTDI product: {} ({:#06x})", name, config.pid),
            ));
        } else {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Product ID {:#06x} is not a known FTDI bit-bang device",
                    config.pid
                ),
            ));
        }

        // FT232R supports 300 baud to 3 Mbaud; bit-bang clocks at 16x the nominal rate
        if config.baud_rate < 300 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Baud rate {} is below the FT232R minimum of 300",
                    config.baud_rate
                ),
            ));
        } else if config.baud_rate > 3_000_000 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Baud rate {} exceeds the FT232R maximum of 3000000",
                    config.baud_rate
                ),
            ));
        }

        warnings
    }

    /// Validate measurement-related settings
    fn validate_measurement_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        // Check probe count
        if config.probe_count < 3 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Probe count of {} may not provide reliable statistics (recommended: >= 3)",
                    config.probe_count
                ),
            ));
        } else if config.probe_count > 1_000 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "High probe count of {} will increase execution time",
                    config.probe_count
                ),
            ));
        }

        // Check timeout
        if config.timeout_ms < 10 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Timeout of {}ms may be too short even for a direct loopback jumper",
                    config.timeout_ms
                ),
            ));
        } else if config.timeout_ms > 10_000 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Long timeout of {}ms will slow down failure detection",
                    config.timeout_ms
                ),
            ));
        }

        // Worst case every probe times out
        let worst_case_ms = config.probe_count as u64 * config.timeout_ms;
        if worst_case_ms > 60_000 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "A fully timed-out run would take up to {}s, consider a lower count or timeout",
                    worst_case_ms / 1_000
                ),
            ));
        }

        warnings
    }

    /// Validate diagnostic mode settings
    fn validate_diagnostic_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.blink_pin.is_some() && config.blink_period_ms < 50 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Blink period of {}ms is faster than the eye can follow, use a probe clip",
                    config.blink_period_ms
                ),
            ));
        }

        warnings
    }

    /// Look up a known FTDI bit-bang capable product by PID
    fn known_ftdi_product(pid: u16) -> Option<&'static str> {
        match pid {
            0x6001 => Some("FT232R"),
            0x6010 => Some("FT2232H"),
            0x6011 => Some("FT4232H"),
            0x6014 => Some("FT232H"),
            0x6015 => Some("FT-X series"),
            _ => None,
        }
    }
}

/// Validation warning levels
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
    Error,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Get color for terminal display
    pub fn color(&self) -> colored::Color {
        match self {
            Self::Info => colored::Color::Blue,
            Self::Warning => colored::Color::Yellow,
            Self::Error => colored::Color::Red,
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        if use_color {
            use colored::Colorize;
            format!(
                "[{}] {}",
                self.level.as_str().color(self.level.color()),
                self.message
            )
        } else {
            format!("[{}] {}", self.level.as_str(), self.message)
        }
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

//! Error handling for the loopback latency tester

use thiserror::Error;

/// Custom error types for the loopback latency tester
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Parsing errors (numbers, masks, env values)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Device could not be opened
    #[error("Device open error: {0}")]
    DeviceOpen(String),

    /// Writing pin state to the device failed
    #[error("Device write error: {0}")]
    DeviceWrite(String),

    /// Reading pin state from the device failed
    #[error("Device read error: {0}")]
    DeviceRead(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Probe execution errors
    #[error("Probe execution error: {0}")]
    ProbeExecution(String),

    /// Every probe in a run failed; no statistics can be produced
    #[error("All probes failed: {0}")]
    AllProbesFailed(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new device open error
    pub fn device_open<S: Into<String>>(message: S) -> Self {
        Self::DeviceOpen(message.into())
    }

    /// Create a new device write error
    pub fn device_write<S: Into<String>>(message: S) -> Self {
        Self::DeviceWrite(message.into())
    }

    /// Create a new device read error
    pub fn device_read<S: Into<String>>(message: S) -> Self {
        Self::DeviceRead(message.into())
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Create a new probe execution error
    pub fn probe_execution<S: Into<String>>(message: S) -> Self {
        Self::ProbeExecution(message.into())
    }

    /// Create a new all-probes-failed error
    pub fn all_probes_failed<S: Into<String>>(message: S) -> Self {
        Self::AllProbesFailed(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Parse(_) => "PARSE",
            Self::DeviceOpen(_) => "DEVICE_OPEN",
            Self::DeviceWrite(_) => "DEVICE_WRITE",
            Self::DeviceRead(_) => "DEVICE_READ",
            Self::Timeout(_) => "TIMEOUT",
            Self::ProbeExecution(_) => "PROBE",
            Self::AllProbesFailed(_) => "ALL_FAILED",
            Self::Io(_) => "IO",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Check if error is recoverable (can retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::DeviceWrite(_) | Self::DeviceRead(_) | Self::Timeout(_) | Self::AllProbesFailed(_) => true,
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) | Self::DeviceOpen(_) => false,
            Self::ProbeExecution(_) | Self::Io(_) | Self::Internal(_) => false,
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Config(msg) => {
                format!("Configuration problem: {}\n\nSuggestion: Check your .env file or command line arguments.", msg)
            }
            Self::Validation(msg) => {
                format!("Invalid input: {}\n\nSuggestion: Check the probe count, timeout, and blink bit values.", msg)
            }
            Self::Parse(msg) => {
                format!("Failed to parse data: {}\n\nSuggestion: Check the format of your input values or environment variables.", msg)
            }
            Self::DeviceOpen(msg) => {
                format!("Could not open the adapter: {}\n\nSuggestion: Check that the device is plugged in, the VID/PID match, and you have USB permissions (udev rules on Linux).", msg)
            }
            Self::DeviceWrite(msg) => {
                format!("Writing pin state failed: {}\n\nSuggestion: The adapter may have been unplugged mid-run. Reconnect it and try again.", msg)
            }
            Self::DeviceRead(msg) => {
                format!("Reading pin state failed: {}\n\nSuggestion: The adapter may have been unplugged mid-run. Reconnect it and try again.", msg)
            }
            Self::Timeout(msg) => {
                format!("Probe timed out: {}\n\nSuggestion: Increase the timeout with --timeout-ms, and verify the loopback wire between TX and RX.", msg)
            }
            Self::ProbeExecution(msg) => {
                format!("Probe execution failed: {}\n\nSuggestion: This may be a temporary issue. Try running the measurement again.", msg)
            }
            Self::AllProbesFailed(msg) => {
                format!("No probe succeeded: {}\n\nSuggestion: Check the loopback wiring between the TX and RX pins, then re-run with --verbose for per-probe detail.", msg)
            }
            Self::Io(msg) => {
                format!("File operation failed: {}\n\nSuggestion: Check file permissions and disk space.", msg)
            }
            Self::Internal(msg) => {
                format!("Internal error: {}\n\nThis is likely a bug. Please report this issue with the error details.", msg)
            }
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,  // Invalid configuration/usage
            Self::DeviceOpen(_) => 2,  // Device not available
            Self::Timeout(_) => 3,  // Timeout issues
            Self::DeviceWrite(_) | Self::DeviceRead(_) => 4,  // Device I/O issues
            Self::Io(_) => 5,  // Host I/O issues
            Self::ProbeExecution(_) | Self::AllProbesFailed(_) => 6,  // Measurement issues
            Self::Internal(_) => 99,  // Internal/unexpected errors
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::DeviceOpen(_) | Self::DeviceWrite(_) | Self::DeviceRead(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Timeout(_) => {
                    format!("[{}] {}", category.blue().bold(), message.blue())
                }
                Self::ProbeExecution(_) | Self::AllProbesFailed(_) | Self::Io(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
                Self::Internal(_) => {
                    format!("[{}] {}", category.bright_red().bold(), message.bright_red())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::parse(format!("Float parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::probe_execution(format!("Task join error: {}", error))
    }
}

// Anyhow integration
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Error context trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let original_error = e.into();
            let context = f();
            AppError::internal(format!("{}: {}", context, original_error))
        })
    }

    fn context(self, message: &'static str) -> Result<T> {
        self.with_context(|| message.to_string())
    }
}

/// Error reporter for structured error logging and user feedback
pub struct ErrorReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ErrorReporter {
    /// Create a new error reporter
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    /// Report an error to the user
    pub fn report_error(&self, error: &AppError) {
        eprintln!("{}", error.format_for_console(self.use_color));

        if self.verbose {
            eprintln!();
            eprintln!("{}", error.user_friendly_message());

            if error.is_recoverable() {
                eprintln!();
                if self.use_color {
                    use colored::Colorize;
                    eprintln!("{}", "This error might be temporary. You can try running the command again.".green());
                } else {
                    eprintln!("This error might be temporary. You can try running the command again.");
                }
            }
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

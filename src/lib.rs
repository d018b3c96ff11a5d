//! Loopback Latency Tester
//!
//! Measures the host-to-pin round-trip latency of an FTDI adapter in
//! asynchronous bit-bang mode. A trigger write raises the TX pin, a
//! loopback jumper feeds it back into RX, and a busy-poll listener
//! timestamps the transition. Diagnostic sweep and blink modes exercise
//! the pins without measuring.

pub mod app;
pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod pins;
pub mod probe;
pub mod session;
pub mod stats;
pub mod sweep;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, LatencyStatistics, ProbeSample, ProbeSeries, RunResult};
pub use output::{
    ColoredFormatter, OutputCoordinator, OutputFormatter, OutputFormatterFactory, PlainFormatter,
};
pub use stats::{AggregatorConfig, ProbeAggregator, ProbeRunner};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_PROBE_COUNT: u32 = 10;
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);
    pub const DEFAULT_VID: u16 = 0x0403;
    pub const DEFAULT_PID: u16 = 0x6001;
    pub const DEFAULT_BAUD_RATE: u32 = 9600;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const DEFAULT_BLINK_PERIOD: Duration = Duration::from_millis(500);
    pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(1000);
}

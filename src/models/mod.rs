//! Data models and structures for the loopback latency tester

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::Config;
pub use metrics::{LatencyStatistics, ProbeFailure, ProbeOutcome, ProbeSample, ProbeSeries, RunResult};

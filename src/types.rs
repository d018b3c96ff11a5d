//! Type definitions and aliases

use std::time::Duration;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Latency classification based on a measured round trip
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatencyLevel {
    /// Good latency (< 1 ms)
    Good,
    /// Moderate latency (1-10 ms)
    Moderate,
    /// Poor latency (> 10 ms)
    Poor,
}

impl LatencyLevel {
    /// Classify a round-trip duration
    pub fn from_duration(duration: Duration) -> Self {
        let micros = duration.as_micros();
        if micros < 1_000 {
            Self::Good
        } else if micros < 10_000 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}

/// Probe execution status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProbeStatus {
    /// Probe observed the loopback transition
    Success,
    /// Probe failed due to a device I/O error
    Failed,
    /// Probe did not observe the transition within the timeout budget
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_classification_boundaries() {
        assert_eq!(LatencyLevel::from_duration(Duration::from_micros(0)), LatencyLevel::Good);
        assert_eq!(LatencyLevel::from_duration(Duration::from_micros(999)), LatencyLevel::Good);
        assert_eq!(LatencyLevel::from_duration(Duration::from_micros(1_000)), LatencyLevel::Moderate);
        assert_eq!(LatencyLevel::from_duration(Duration::from_micros(9_999)), LatencyLevel::Moderate);
        assert_eq!(LatencyLevel::from_duration(Duration::from_millis(10)), LatencyLevel::Poor);
    }
}

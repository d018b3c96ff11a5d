//! Probe sample and latency statistics data models

use crate::types::{LatencyLevel, ProbeStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why a probe produced no latency measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeFailure {
    /// The loopback bit never asserted within the timeout budget
    Timeout,
    /// The trigger write to the device failed
    DeviceWrite,
    /// A pin read during the poll loop failed
    DeviceRead,
}

impl ProbeFailure {
    /// Short lowercase tag for log and report lines
    pub fn tag(&self) -> &'static str {
        match self {
            ProbeFailure::Timeout => "timeout",
            ProbeFailure::DeviceWrite => "device_write",
            ProbeFailure::DeviceRead => "device_read",
        }
    }
}

/// Outcome of one probe. A probe either measured a round trip or it
/// carries a tagged failure reason; there is no sentinel value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProbeOutcome {
    /// Round trip observed
    Success {
        /// Round-trip latency truncated to whole microseconds
        latency_us: u64,
    },
    /// No round trip observed
    Failure {
        reason: ProbeFailure,
        message: String,
    },
}

/// One probe's result: sequence number, outcome, poll effort, timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSample {
    /// 1-based position of this probe in the run
    pub sequence: u32,

    /// Tagged result of the probe
    pub outcome: ProbeOutcome,

    /// Number of pin reads the listener performed
    pub poll_count: u64,

    /// When the probe started
    pub timestamp: DateTime<Utc>,
}

impl ProbeSample {
    /// Successful probe. Sub-microsecond remainder of the latency is
    /// truncated; `latency_us` is the floor of the measured duration.
    pub fn success(sequence: u32, latency: Duration, poll_count: u64) -> Self {
        Self {
            sequence,
            outcome: ProbeOutcome::Success {
                latency_us: latency.as_micros() as u64,
            },
            poll_count,
            timestamp: Utc::now(),
        }
    }

    /// Probe that exhausted its timeout budget without seeing the bit
    pub fn timeout(sequence: u32, budget: Duration, poll_count: u64) -> Self {
        Self {
            sequence,
            outcome: ProbeOutcome::Failure {
                reason: ProbeFailure::Timeout,
                message: format!(
                    "no loopback transition within {} ms",
                    budget.as_millis()
                ),
            },
            poll_count,
            timestamp: Utc::now(),
        }
    }

    /// Probe cut short by cancellation before any transition was seen
    pub fn cancelled(sequence: u32, poll_count: u64) -> Self {
        Self {
            sequence,
            outcome: ProbeOutcome::Failure {
                reason: ProbeFailure::Timeout,
                message: "cancelled before the loopback transition".to_string(),
            },
            poll_count,
            timestamp: Utc::now(),
        }
    }

    /// Probe whose trigger write failed
    pub fn device_write(sequence: u32, message: String) -> Self {
        Self {
            sequence,
            outcome: ProbeOutcome::Failure {
                reason: ProbeFailure::DeviceWrite,
                message,
            },
            poll_count: 0,
            timestamp: Utc::now(),
        }
    }

    /// Probe whose poll loop hit a read error
    pub fn device_read(sequence: u32, message: String, poll_count: u64) -> Self {
        Self {
            sequence,
            outcome: ProbeOutcome::Failure {
                reason: ProbeFailure::DeviceRead,
                message,
            },
            poll_count,
            timestamp: Utc::now(),
        }
    }

    /// Check if this probe measured a round trip
    pub fn is_successful(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Success { .. })
    }

    /// Status classification for reporting
    pub fn status(&self) -> ProbeStatus {
        match &self.outcome {
            ProbeOutcome::Success { .. } => ProbeStatus::Success,
            ProbeOutcome::Failure { reason, .. } => match reason {
                ProbeFailure::Timeout => ProbeStatus::Timeout,
                ProbeFailure::DeviceWrite | ProbeFailure::DeviceRead => ProbeStatus::Failed,
            },
        }
    }

    /// Measured latency in whole microseconds, if any
    pub fn latency_us(&self) -> Option<u64> {
        match &self.outcome {
            ProbeOutcome::Success { latency_us } => Some(*latency_us),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    /// Measured latency in milliseconds, if any
    pub fn latency_ms(&self) -> Option<f64> {
        self.latency_us().map(|us| us as f64 / 1000.0)
    }

    /// Latency classification, if the probe succeeded
    pub fn latency_level(&self) -> Option<LatencyLevel> {
        self.latency_us()
            .map(|us| LatencyLevel::from_duration(Duration::from_micros(us)))
    }

    /// Failure reason, if the probe failed
    pub fn failure(&self) -> Option<(ProbeFailure, &str)> {
        match &self.outcome {
            ProbeOutcome::Success { .. } => None,
            ProbeOutcome::Failure { reason, message } => Some((*reason, message.as_str())),
        }
    }
}

/// Ordered, append-only collection of probe samples from one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeSeries {
    samples: Vec<ProbeSample>,
}

impl ProbeSeries {
    /// Create an empty series with room for `count` samples
    pub fn with_capacity(count: usize) -> Self {
        Self {
            samples: Vec::with_capacity(count),
        }
    }

    /// Append a sample
    pub fn push(&mut self, sample: ProbeSample) {
        self.samples.push(sample);
    }

    /// All samples in probe order
    pub fn samples(&self) -> &[ProbeSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Latencies of the successful samples, in probe order
    pub fn success_latencies_us(&self) -> Vec<u64> {
        self.samples.iter().filter_map(|s| s.latency_us()).collect()
    }

    /// Number of successful probes
    pub fn success_count(&self) -> u32 {
        self.samples.iter().filter(|s| s.is_successful()).count() as u32
    }

    /// Number of probes that timed out
    pub fn timeout_count(&self) -> u32 {
        self.samples
            .iter()
            .filter(|s| s.status() == ProbeStatus::Timeout)
            .count() as u32
    }

    /// Number of probes that failed on device I/O
    pub fn failed_count(&self) -> u32 {
        self.samples
            .iter()
            .filter(|s| s.status() == ProbeStatus::Failed)
            .count() as u32
    }
}

/// Statistical summary of the successful probes in a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyStatistics {
    /// Number of successful measurements included
    pub sample_count: usize,

    /// Fastest round trip (microseconds)
    pub min_us: u64,

    /// Slowest round trip (microseconds)
    pub max_us: u64,

    /// Mean round trip (microseconds)
    pub mean_us: f64,

    /// Min-to-max range (microseconds); not a deviation measure
    pub spread_us: u64,

    /// Sample standard deviation of the round trips (microseconds)
    pub std_dev_us: f64,

    /// Loopback throughput in bits per millisecond (2 bits per probe)
    pub throughput_bits_per_ms: f64,
}

impl LatencyStatistics {
    /// Compute statistics over the successful samples of a completed
    /// series. Returns `None` when no probe succeeded; no numbers are
    /// fabricated for an empty sample set.
    pub fn from_series(series: &ProbeSeries, elapsed: Duration) -> Option<Self> {
        let latencies = series.success_latencies_us();
        if latencies.is_empty() {
            return None;
        }

        let count = latencies.len();
        let min = *latencies.iter().min().unwrap();
        let max = *latencies.iter().max().unwrap();
        let mean = latencies.iter().sum::<u64>() as f64 / count as f64;

        let std_dev = if count > 1 {
            let sum_squared_diff: f64 = latencies
                .iter()
                .map(|&us| (us as f64 - mean).powi(2))
                .sum();
            (sum_squared_diff / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        let throughput = if elapsed_ms > 0.0 {
            (2 * count) as f64 / elapsed_ms
        } else {
            0.0
        };

        Some(Self {
            sample_count: count,
            min_us: min,
            max_us: max,
            mean_us: mean,
            spread_us: max - min,
            std_dev_us: std_dev,
            throughput_bits_per_ms: throughput,
        })
    }

    /// Latency classification based on the mean round trip
    pub fn latency_level(&self) -> LatencyLevel {
        LatencyLevel::from_duration(Duration::from_micros(self.mean_us as u64))
    }

    /// Format the mean for display
    pub fn format_mean(&self) -> String {
        format!("{:.1} µs", self.mean_us)
    }
}

/// Complete result of one measurement run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Number of probes requested
    pub requested_count: u32,

    /// Number of probes actually executed (lower when cancelled)
    pub executed_count: u32,

    /// Probes that measured a round trip
    pub success_count: u32,

    /// Probes that failed on device I/O
    pub failed_count: u32,

    /// Probes that exhausted the timeout budget
    pub timeout_count: u32,

    /// Bits carried through the loopback (2 per successful probe)
    pub bits_transferred: u64,

    /// Wall-clock duration of the whole run
    pub elapsed: Duration,

    /// Every sample, in probe order
    pub series: ProbeSeries,

    /// Statistics over the successful samples, when any exist
    pub statistics: Option<LatencyStatistics>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run completed
    pub completed_at: DateTime<Utc>,
}

impl RunResult {
    /// Assemble a result from a completed series
    pub fn from_series(
        requested_count: u32,
        series: ProbeSeries,
        elapsed: Duration,
        started_at: DateTime<Utc>,
    ) -> Self {
        let statistics = LatencyStatistics::from_series(&series, elapsed);
        let success_count = series.success_count();
        Self {
            requested_count,
            executed_count: series.len() as u32,
            success_count,
            failed_count: series.failed_count(),
            timeout_count: series.timeout_count(),
            bits_transferred: 2 * success_count as u64,
            elapsed,
            series,
            statistics,
            started_at,
            completed_at: Utc::now(),
        }
    }

    /// Success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.executed_count == 0 {
            0.0
        } else {
            (self.success_count as f64 / self.executed_count as f64) * 100.0
        }
    }

    /// Whether the run was cut short by cancellation
    pub fn was_cancelled(&self) -> bool {
        self.executed_count < self.requested_count
    }

    /// Overall latency classification, when statistics exist
    pub fn latency_level(&self) -> Option<LatencyLevel> {
        self.statistics.as_ref().map(|s| s.latency_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_of(latencies_us: &[u64]) -> ProbeSeries {
        let mut series = ProbeSeries::with_capacity(latencies_us.len());
        for (i, &us) in latencies_us.iter().enumerate() {
            series.push(ProbeSample::success(
                i as u32 + 1,
                Duration::from_micros(us),
                us / 10,
            ));
        }
        series
    }

    #[test]
    fn test_sample_success_truncates_to_whole_micros() {
        let sample = ProbeSample::success(1, Duration::from_nanos(1_500_999), 3);
        assert_eq!(sample.latency_us(), Some(1_500));
        assert!(sample.is_successful());
        assert_eq!(sample.status(), ProbeStatus::Success);
    }

    #[test]
    fn test_sample_timeout_carries_budget() {
        let sample = ProbeSample::timeout(2, Duration::from_millis(1000), 42_000);
        assert!(!sample.is_successful());
        assert_eq!(sample.status(), ProbeStatus::Timeout);
        assert_eq!(sample.latency_us(), None);
        let (reason, message) = sample.failure().unwrap();
        assert_eq!(reason, ProbeFailure::Timeout);
        assert!(message.contains("1000 ms"));
    }

    #[test]
    fn test_sample_device_failures_classify_as_failed() {
        let write = ProbeSample::device_write(1, "pipe broke".to_string());
        let read = ProbeSample::device_read(2, "bulk transfer failed".to_string(), 7);
        assert_eq!(write.status(), ProbeStatus::Failed);
        assert_eq!(read.status(), ProbeStatus::Failed);
        assert_eq!(write.failure().unwrap().0, ProbeFailure::DeviceWrite);
        assert_eq!(read.failure().unwrap().0, ProbeFailure::DeviceRead);
        assert_eq!(read.poll_count, 7);
    }

    #[test]
    fn test_series_partitions_by_status() {
        let mut series = series_of(&[100, 200]);
        series.push(ProbeSample::timeout(3, Duration::from_millis(10), 99));
        series.push(ProbeSample::device_read(4, "gone".to_string(), 5));

        assert_eq!(series.len(), 4);
        assert_eq!(series.success_count(), 2);
        assert_eq!(series.timeout_count(), 1);
        assert_eq!(series.failed_count(), 1);
        assert_eq!(series.success_latencies_us(), vec![100, 200]);
    }

    #[test]
    fn test_statistics_from_series() {
        let series = series_of(&[100, 200, 300]);
        let stats = LatencyStatistics::from_series(&series, Duration::from_millis(6)).unwrap();

        assert_eq!(stats.sample_count, 3);
        assert_eq!(stats.min_us, 100);
        assert_eq!(stats.max_us, 300);
        assert_eq!(stats.mean_us, 200.0);
        assert_eq!(stats.spread_us, 200);
        assert_eq!(stats.std_dev_us, 100.0);
        // 3 probes x 2 bits over 6 ms
        assert_eq!(stats.throughput_bits_per_ms, 1.0);
    }

    #[test]
    fn test_statistics_single_sample_has_zero_deviation() {
        let series = series_of(&[250]);
        let stats = LatencyStatistics::from_series(&series, Duration::from_millis(1)).unwrap();
        assert_eq!(stats.std_dev_us, 0.0);
        assert_eq!(stats.spread_us, 0);
        assert_eq!(stats.min_us, stats.max_us);
    }

    #[test]
    fn test_statistics_absent_when_no_success() {
        let mut series = ProbeSeries::default();
        series.push(ProbeSample::timeout(1, Duration::from_millis(10), 50));
        assert!(LatencyStatistics::from_series(&series, Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_run_result_counts_and_rate() {
        let mut series = series_of(&[100, 300]);
        series.push(ProbeSample::timeout(3, Duration::from_millis(10), 99));
        series.push(ProbeSample::device_write(4, "gone".to_string()));

        let result =
            RunResult::from_series(4, series, Duration::from_millis(25), Utc::now());

        assert_eq!(result.executed_count, 4);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.timeout_count, 1);
        assert_eq!(result.failed_count, 1);
        assert_eq!(result.bits_transferred, 4);
        assert_eq!(result.success_rate(), 50.0);
        assert!(!result.was_cancelled());
        assert!(result.statistics.is_some());
    }

    #[test]
    fn test_run_result_partial_series_is_cancelled() {
        let series = series_of(&[100]);
        let result =
            RunResult::from_series(10, series, Duration::from_millis(5), Utc::now());
        assert!(result.was_cancelled());
        assert_eq!(result.executed_count, 1);
    }

    #[test]
    fn test_latency_level_from_mean() {
        let series = series_of(&[500, 700]);
        let stats = LatencyStatistics::from_series(&series, Duration::from_millis(2)).unwrap();
        assert_eq!(stats.latency_level(), LatencyLevel::Good);

        let slow = series_of(&[15_000, 25_000]);
        let stats = LatencyStatistics::from_series(&slow, Duration::from_millis(80)).unwrap();
        assert_eq!(stats.latency_level(), LatencyLevel::Poor);
    }
}

//! Output validation tests for the loopback latency tester
//!
//! These tests validate that the rendered report matches the ping-style
//! expectations and stays consistent across formatter configurations.
//! They build runs from synthetic samples so no adapter is needed.

use loopback_latency_tester::{
    models::{ProbeSample, ProbeSeries, RunResult},
    output::{FormattingOptions, OutputCoordinator, OutputFormatterFactory, PlainFormatter},
    stats::format_probe_line,
};
use chrono::Utc;
use regex::Regex;
use serde_json::Value;
use std::time::Duration;

/// Validation patterns for the report format
struct OutputPatterns {
    /// Pattern for the ping-style summary line (e.g. "round-trip min/avg/max = 400/500/600 µs")
    pub round_trip_pattern: Regex,
    /// Pattern for percentage values (e.g. "95.5%")
    pub percentage_pattern: Regex,
    /// Pattern for the spread line
    pub spread_pattern: Regex,
    /// Pattern for the standard deviation line
    pub std_dev_pattern: Regex,
    /// Pattern for the throughput line
    pub throughput_pattern: Regex,
    /// Pattern for per-probe verbose lines
    pub probe_line_pattern: Regex,
    /// Pattern for ANSI escape sequences
    pub ansi_pattern: Regex,
}

impl Default for OutputPatterns {
    fn default() -> Self {
        Self {
            round_trip_pattern: Regex::new(r"round-trip min/avg/max = \d+/\d+/\d+ µs").unwrap(),
            percentage_pattern: Regex::new(r"\d+\.\d%").unwrap(),
            spread_pattern: Regex::new(r"spread \(max-min\):\s+\d+ µs").unwrap(),
            std_dev_pattern: Regex::new(r"std deviation:\s+\d+\.\d µs").unwrap(),
            throughput_pattern: Regex::new(r"throughput:\s+\d+\.\d{3} bits/ms").unwrap(),
            probe_line_pattern: Regex::new(r"seq=\d+ latency=\d+ µs polls=\d+").unwrap(),
            ansi_pattern: Regex::new(r"\x1b\[").unwrap(),
        }
    }
}

fn successful_run() -> RunResult {
    let mut series = ProbeSeries::with_capacity(4);
    series.push(ProbeSample::success(1, Duration::from_micros(400), 12));
    series.push(ProbeSample::success(2, Duration::from_micros(500), 15));
    series.push(ProbeSample::success(3, Duration::from_micros(600), 18));
    series.push(ProbeSample::success(4, Duration::from_micros(500), 14));
    RunResult::from_series(4, series, Duration::from_millis(80), Utc::now())
}

fn degraded_run() -> RunResult {
    let mut series = ProbeSeries::with_capacity(4);
    series.push(ProbeSample::success(1, Duration::from_micros(800), 20));
    series.push(ProbeSample::timeout(2, Duration::from_millis(100), 4000));
    series.push(ProbeSample::timeout(3, Duration::from_millis(100), 4100));
    series.push(ProbeSample::device_read(4, "bulk read failed".to_string(), 7));
    RunResult::from_series(4, series, Duration::from_millis(350), Utc::now())
}

fn plain_report(result: &RunResult) -> String {
    let coordinator =
        OutputCoordinator::new(OutputFormatterFactory::create_formatter(false, false));
    coordinator.display_results(result).unwrap()
}

/// Test that the report carries ping-style statistics lines
#[test]
fn test_report_contains_ping_style_statistics() {
    let report = plain_report(&successful_run());
    let patterns = OutputPatterns::default();

    assert!(
        patterns.round_trip_pattern.is_match(&report),
        "report should contain the round-trip summary line: {}",
        report
    );
    assert!(
        patterns.spread_pattern.is_match(&report),
        "report should contain the spread line"
    );
    assert!(
        patterns.std_dev_pattern.is_match(&report),
        "report should contain the standard deviation line"
    );
    assert!(
        patterns.throughput_pattern.is_match(&report),
        "report should contain the throughput line"
    );
}

/// Test exact statistics values flow into the summary line
#[test]
fn test_round_trip_line_values() {
    let report = plain_report(&successful_run());
    assert!(
        report.contains("round-trip min/avg/max = 400/500/600 µs"),
        "unexpected statistics line in: {}",
        report
    );
}

/// Test the report shows success rate as a percentage
#[test]
fn test_report_contains_percentage() {
    let patterns = OutputPatterns::default();

    let full = plain_report(&successful_run());
    assert!(patterns.percentage_pattern.is_match(&full));
    assert!(full.contains("100.0%"));

    let degraded = plain_report(&degraded_run());
    assert!(degraded.contains("25.0%"));
}

/// Test the report sections appear in a stable order
#[test]
fn test_report_section_order() {
    let report = plain_report(&successful_run());

    let header = report.find("Loopback Latency Results").unwrap();
    let summary = report.find("Run Summary:").unwrap();
    let stats = report.find("Latency Statistics:").unwrap();
    let recommendations = report.find("Recommendations:").unwrap();

    assert!(header < summary);
    assert!(summary < stats);
    assert!(stats < recommendations);
}

/// Test failure counts are broken out by kind in the summary
#[test]
fn test_failure_breakdown_in_summary() {
    let report = plain_report(&degraded_run());

    assert!(report.contains("Timeouts:"));
    assert!(report.contains("Device errors:"));
}

/// Test unhealthy runs produce actionable recommendations
#[test]
fn test_recommendations_on_degraded_run() {
    let report = plain_report(&degraded_run());
    assert!(
        report.contains("•"),
        "degraded run should produce at least one recommendation bullet"
    );
    assert!(!report.contains("looks healthy"));
}

/// Test healthy runs say so instead of listing suggestions
#[test]
fn test_recommendations_on_healthy_run() {
    let report = plain_report(&successful_run());
    assert!(report.contains("looks healthy"));
}

/// Test plain output never contains ANSI escapes
#[test]
fn test_plain_output_has_no_ansi() {
    let patterns = OutputPatterns::default();
    let report = plain_report(&degraded_run());
    assert!(
        !patterns.ansi_pattern.is_match(&report),
        "plain report must not contain ANSI escapes"
    );
}

/// Test per-probe lines keep the ping-like shape
#[test]
fn test_probe_line_format() {
    let patterns = OutputPatterns::default();

    let ok = ProbeSample::success(3, Duration::from_micros(720), 19);
    let line = format_probe_line(&ok);
    assert!(
        patterns.probe_line_pattern.is_match(&line),
        "unexpected probe line: {}",
        line
    );

    let failed = ProbeSample::timeout(4, Duration::from_millis(100), 5000);
    let line = format_probe_line(&failed);
    assert!(line.starts_with("seq=4 timeout:"), "unexpected line: {}", line);
}

/// Test the quick one-line summary carries counts, rate, and duration
#[test]
fn test_quick_summary_format() {
    use loopback_latency_tester::output::OutputFormatter;

    let formatter = PlainFormatter::new(FormattingOptions {
        enable_color: false,
        verbose_mode: false,
    });

    let summary = formatter.format_quick_summary(&successful_run()).unwrap();
    assert!(summary.contains("4/4 successful"));
    assert!(summary.contains("100.0%"));
    assert!(summary.contains("µs avg"));
    assert!(summary.contains("Duration:"));
}

/// Test run results serialize to JSON with the fields scripts consume
#[test]
fn test_run_result_json_shape() {
    let result = successful_run();
    let json: Value = serde_json::to_value(&result).unwrap();

    assert_eq!(json["requested_count"], 4);
    assert_eq!(json["success_count"], 4);
    assert_eq!(json["timeout_count"], 0);
    assert_eq!(json["statistics"]["sample_count"], 4);
    assert_eq!(json["statistics"]["min_us"], 400);
    assert_eq!(json["statistics"]["max_us"], 600);
}

/// Test run results survive a JSON round trip
#[test]
fn test_run_result_json_round_trip() {
    let result = degraded_run();
    let encoded = serde_json::to_string(&result).unwrap();
    let decoded: RunResult = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded.requested_count, result.requested_count);
    assert_eq!(decoded.success_count, result.success_count);
    assert_eq!(decoded.timeout_count, result.timeout_count);
    assert_eq!(decoded.failed_count, result.failed_count);
    assert_eq!(decoded.series.len(), result.series.len());
}

/// Test verbose reports include the start timestamp
#[test]
fn test_verbose_report_includes_start_time() {
    let coordinator =
        OutputCoordinator::new(OutputFormatterFactory::create_formatter(false, true));
    let report = coordinator.display_results(&successful_run()).unwrap();

    assert!(report.contains("Started at:"));
    assert!(report.contains("Total duration:"));
}

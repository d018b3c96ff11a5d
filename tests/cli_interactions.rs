//! CLI options interaction tests
//!
//! These tests validate that all CLI options work correctly in combination
//! with each other and handle edge cases properly. They run the real binary;
//! since test builds carry no FTDI backend, any path that reaches the device
//! fails deterministically with the device-open exit code (2) after the
//! configuration stage has already printed.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    Command::cargo_bin("llt").unwrap()
}

/// Helper function to create a temporary working directory with a .env file
fn create_temp_env(content: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), content).unwrap();
    temp_dir
}

/// Test that the main help lists every option
#[test]
fn test_help_lists_all_options() {
    create_test_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--count"))
        .stdout(predicate::str::contains("--timeout-ms"))
        .stdout(predicate::str::contains("--vid"))
        .stdout(predicate::str::contains("--pid"))
        .stdout(predicate::str::contains("--sweep"))
        .stdout(predicate::str::contains("--blink"))
        .stdout(predicate::str::contains("--help-topic"));
}

/// Test version output
#[test]
fn test_version_output() {
    create_test_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("llt"));
}

/// Test topic help short-circuits without touching the device
#[test]
fn test_topic_help_short_circuits() {
    create_test_cmd()
        .args(["--help-topic", "wiring", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TX"))
        .stdout(predicate::str::contains("RX"));

    create_test_cmd()
        .args(["--help-topic", "env", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PROBE_COUNT"));
}

/// Test unknown topic falls back to the main help
#[test]
fn test_unknown_topic_falls_back() {
    create_test_cmd()
        .args(["--help-topic", "nonsense", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown help topic: 'nonsense'"))
        .stdout(predicate::str::contains("wiring, timeout, output, examples"));
}

/// Test conflicting color flags are rejected
#[test]
fn test_conflicting_color_flags() {
    create_test_cmd()
        .args(["--color", "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Cannot specify both --color and --no-color",
        ));
}

/// Test conflicting mode flags are rejected
#[test]
fn test_conflicting_mode_flags() {
    create_test_cmd()
        .args(["--sweep", "--blink", "3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Cannot specify both --sweep and --blink",
        ));
}

/// Test blink pin range checking
#[test]
fn test_blink_pin_out_of_range() {
    create_test_cmd()
        .args(["--blink", "9"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("between 1 and 8"));

    create_test_cmd()
        .args(["--blink", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("between 1 and 8"));
}

/// Test timeout parsing edge cases at the clap layer
#[test]
fn test_timeout_parsing_rejections() {
    // Zero timeout
    create_test_cmd()
        .args(["--timeout-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Timeout must be greater than 0"));

    // Over the hard cap
    create_test_cmd()
        .args(["--timeout-ms", "60001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed 60000"));

    // Hex prefixes are rejected for timeouts
    create_test_cmd()
        .args(["--timeout-ms", "0x100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timeout"));
}

/// Test USB id parsing accepts hex and decimal forms
#[test]
fn test_usb_id_parsing() {
    // Bad id rejected by clap
    create_test_cmd()
        .args(["--vid", "zzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid USB ID"));

    // Hex form with prefix reaches the config stage
    create_test_cmd()
        .args(["--vid", "0x0403", "--pid", "0x6001", "--debug", "--no-color"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("Adapter: 0403:6001"));
}

/// Test probe count range checking happens at the config stage
#[test]
fn test_probe_count_range() {
    create_test_cmd()
        .args(["--count", "0", "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("between 1 and 10000"));

    create_test_cmd()
        .args(["--count", "10001", "--no-color"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("between 1 and 10000"));
}

/// Test the measurement path fails cleanly without a hardware backend
#[test]
fn test_measurement_requires_backend() {
    create_test_cmd()
        .args(["--count", "3", "--no-color"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("DEVICE_OPEN"))
        .stderr(predicate::str::contains("Device troubleshooting"));
}

/// Test sweep mode also needs the device and stops at open
#[test]
fn test_sweep_requires_backend() {
    create_test_cmd()
        .args(["--sweep", "--no-color"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("DEVICE_OPEN"));
}

/// Test debug output shows the resolved configuration before the device opens
#[test]
fn test_debug_shows_config_summary() {
    create_test_cmd()
        .args(["--count", "25", "--timeout-ms", "750", "--debug", "--no-color"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("Probe count: 25"))
        .stdout(predicate::str::contains("Timeout: 750ms"))
        .stdout(predicate::str::contains("Mode: latency measurement"));
}

/// Test .env files in the working directory are picked up
#[test]
fn test_env_file_loading() {
    let temp_dir = create_temp_env("PROBE_COUNT=7\nTIMEOUT_MS=250\n");

    create_test_cmd()
        .current_dir(temp_dir.path())
        .args(["--debug", "--no-color"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("Probe count: 7"))
        .stdout(predicate::str::contains("Timeout: 250ms"));
}

/// Test CLI flags override .env values
#[test]
fn test_cli_overrides_env_file() {
    let temp_dir = create_temp_env("PROBE_COUNT=7\n");

    create_test_cmd()
        .current_dir(temp_dir.path())
        .args(["--count", "3", "--debug", "--no-color"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("Probe count: 3"));
}

/// Test environment variables override .env values
#[test]
fn test_env_var_overrides_env_file() {
    let temp_dir = create_temp_env("TIMEOUT_MS=250\n");

    create_test_cmd()
        .current_dir(temp_dir.path())
        .env("TIMEOUT_MS", "900")
        .args(["--debug", "--no-color"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("Timeout: 900ms"));
}

/// Test malformed environment values surface a parse error
#[test]
fn test_malformed_env_var_rejected() {
    create_test_cmd()
        .env("PROBE_COUNT", "not-a-number")
        .arg("--no-color")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("PROBE_COUNT"));
}

/// Test blink mode validates the pin before opening the device
#[test]
fn test_blink_mode_config_summary() {
    create_test_cmd()
        .args([
            "--blink",
            "4",
            "--blink-period-ms",
            "200",
            "--debug",
            "--no-color",
        ])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("Mode: blink pin 4 every 200ms"));
}

//! Additional comprehensive tests for configuration parsing and validation

use super::EnvManager;
use crate::models::Config;

/// Test edge cases in configuration parsing
mod config_edge_cases {
    use super::*;

    #[test]
    fn test_config_with_extremely_large_values() {
        let mut config = Config::default();
        config.probe_count = 10_000; // Maximum valid
        config.timeout_ms = 60_000; // Maximum valid

        assert!(config.validate().is_ok());

        config.probe_count = 10_001; // Invalid - too large
        assert!(config.validate().is_err());

        config.probe_count = 10_000;
        config.timeout_ms = 60_001; // Invalid - too large
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_with_alternate_adapters() {
        let mut config = Config::default();

        config.pid = 0x6015; // FT-X series
        assert!(config.validate().is_ok());

        config.vid = 0x1a86; // non-FTDI vendor, still structurally valid
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_blink_period_extremes() {
        let mut config = Config::default();
        config.blink_pin = Some(4);

        config.blink_period_ms = 10; // Minimum valid
        assert!(config.validate().is_ok());

        config.blink_period_ms = 9;
        assert!(config.validate().is_err());

        config.blink_period_ms = 60_000; // Maximum valid
        assert!(config.validate().is_ok());

        config.blink_period_ms = 60_001;
        assert!(config.validate().is_err());
    }
}

/// Test environment variable parsing edge cases
mod env_parsing_tests {
    use super::*;

    #[test]
    fn test_env_var_boundary_values() {
        // Exact boundary values
        assert!(EnvManager::validate_env_var("PROBE_COUNT", "1").is_ok());
        assert!(EnvManager::validate_env_var("PROBE_COUNT", "10000").is_ok());
        assert!(EnvManager::validate_env_var("TIMEOUT_MS", "1").is_ok());
        assert!(EnvManager::validate_env_var("TIMEOUT_MS", "60000").is_ok());

        // Just over boundary
        assert!(EnvManager::validate_env_var("PROBE_COUNT", "10001").is_err());
        assert!(EnvManager::validate_env_var("TIMEOUT_MS", "60001").is_err());
    }

    #[test]
    fn test_env_var_usb_id_formats() {
        // Hex with prefix, bare hex, and decimal all parse
        assert!(EnvManager::validate_env_var("FTDI_VID", "0x0403").is_ok());
        assert!(EnvManager::validate_env_var("FTDI_PID", "6001").is_ok());
        assert!(EnvManager::validate_env_var("FTDI_PID", "0X6015").is_ok());
        assert!(EnvManager::validate_env_var("FTDI_PID", "6f01").is_ok());

        // Out of u16 range or malformed
        assert!(EnvManager::validate_env_var("FTDI_VID", "0x10403").is_err());
        assert!(EnvManager::validate_env_var("FTDI_VID", "adapter").is_err());
        assert!(EnvManager::validate_env_var("FTDI_PID", "-1").is_err());
    }

    #[test]
    fn test_env_var_boolean_validation() {
        /* Boolean values are case sensitive (only "true"/"false" allowed) */
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "true").is_ok());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "false").is_ok());

        // Case variations should fail
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "TRUE").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "True").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "FALSE").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "False").is_err());

        // Invalid values should fail
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "yes").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "no").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "1").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "0").is_err());
    }

    #[test]
    fn test_env_var_whitespace_and_empty() {
        assert!(EnvManager::validate_env_var("PROBE_COUNT", "").is_err());
        assert!(EnvManager::validate_env_var("TIMEOUT_MS", " ").is_err());
        // parse_usb_id trims before parsing
        assert!(EnvManager::validate_env_var("FTDI_VID", " 0x0403 ").is_ok());
    }
}

/// Test CLI argument parsing edge cases
mod cli_parsing_tests {
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_cli_with_complex_arguments() {
        let cli = Cli::parse_from([
            "llt",
            "--count",
            "50",
            "--timeout-ms",
            "120",
            "--vid",
            "0x0403",
            "--pid",
            "0x6014",
            "--verbose",
            "--debug",
        ]);

        assert!(cli.verbose);
        assert!(cli.debug);
        assert_eq!(cli.count, 50);
        assert_eq!(cli.timeout_ms, 120);
        assert_eq!(cli.vid, 0x0403);
        assert_eq!(cli.pid, 0x6014);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_conflicting_modes_rejected() {
        let cli = Cli::parse_from(["llt", "--sweep", "--blink", "3"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_cli_conflicting_color_flags_rejected() {
        let cli = Cli::parse_from(["llt", "--color", "--no-color"]);
        assert!(cli.validate().is_err());
    }
}

/// Test configuration merging priorities
mod config_priority_tests {
    use super::*;
    use crate::cli::Cli;
    use crate::config::ConfigParser;
    use clap::Parser;
    use std::env;
    use std::sync::Mutex;

    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_priority_order() {
        let _guard = TEST_MUTEX.lock().unwrap();

        env::remove_var("PROBE_COUNT");

        // Move .env file temporarily
        let env_backup = if std::path::Path::new(".env").exists() {
            let _ = std::fs::rename(".env", ".env.backup_priority");
            true
        } else {
            false
        };

        // .env value
        std::fs::write(".env", "PROBE_COUNT=15\n").unwrap();

        // Environment variable (should override .env)
        env::set_var("PROBE_COUNT", "25");

        // CLI override (should override both)
        let cli = Cli::parse_from(["llt", "--count", "35"]);
        let config = ConfigParser::new(cli).parse().unwrap();

        // CLI should win
        assert_eq!(config.probe_count, 35);

        // Clean up
        env::remove_var("PROBE_COUNT");
        let _ = std::fs::remove_file(".env");
        if env_backup {
            let _ = std::fs::rename(".env.backup_priority", ".env");
        }
    }
}

/// Test error message quality and helpfulness
mod error_message_tests {
    use super::*;

    #[test]
    fn test_error_messages_are_helpful() {
        let result = EnvManager::validate_env_var("FTDI_VID", "not-an-id");
        assert!(result.is_err());

        if let Err(err) = result {
            let error_msg = err.to_string();
            assert!(error_msg.contains("FTDI_VID"));
            assert!(error_msg.contains("not-an-id"));
        }

        let result = EnvManager::validate_env_var("PROBE_COUNT", "0");
        assert!(result.is_err());

        if let Err(err) = result {
            let error_msg = err.to_string();
            assert!(error_msg.contains("PROBE_COUNT"));
            assert!(error_msg.contains("between 1 and 10000"));
        }
    }
}

/// Test concurrent configuration operations
mod concurrency_tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_validation() {
        let handles: Vec<_> = (0..10)
            .map(|i| {
                thread::spawn(move || {
                    let mut config = Config::default();
                    config.probe_count = (i % 50 + 1) as u32;
                    config.timeout_ms = (i % 120 + 1) as u64;

                    // All validations should succeed
                    assert!(config.validate().is_ok());
                })
            })
            .collect();

        // All threads should complete successfully
        for handle in handles {
            handle.join().unwrap();
        }
    }
}

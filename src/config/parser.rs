//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::Config,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        // Start with default configuration
        let mut config = Config::default();

        // Load from environment file if it exists
        self.load_env_file()?;

        // Merge environment variables into config
        config.merge_from_env()?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config)?;

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        EnvManager::load_env_file(self.cli.debug)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) -> Result<()> {
        // Override probe count if specified
        if self.cli.count != crate::defaults::DEFAULT_PROBE_COUNT {
            config.probe_count = self.cli.count;
        }

        // Override timeout if specified
        if self.cli.timeout_ms != crate::defaults::DEFAULT_TIMEOUT.as_millis() as u64 {
            config.timeout_ms = self.cli.timeout_ms;
        }

        // Override adapter IDs if specified
        if self.cli.vid != crate::defaults::DEFAULT_VID {
            config.vid = self.cli.vid;
        }
        if self.cli.pid != crate::defaults::DEFAULT_PID {
            config.pid = self.cli.pid;
        }

        // Color flags win over environment and terminal detection
        if self.cli.no_color {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        } else {
            config.enable_color = config.enable_color && self.cli.use_colors();
        }

        // Set verbose and debug flags (these are CLI-only)
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        // Diagnostic modes are CLI-only
        config.sweep = self.cli.sweep;
        config.blink_pin = self.cli.blink;
        if self.cli.blink_period_ms != crate::defaults::DEFAULT_BLINK_PERIOD.as_millis() as u64 {
            config.blink_period_ms = self.cli.blink_period_ms;
        }

        if config.debug {
            println!("Applied CLI overrides to configuration");
            println!(
                "Final config: probe_count={}, timeout={}ms, adapter={:04x}:{:04x}, enable_color={}",
                config.probe_count, config.timeout_ms, config.vid, config.pid, config.enable_color
            );
        }

        Ok(())
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Adapter: {:04x}:{:04x}", config.vid, config.pid));
    summary.push(format!("Baud rate: {}", config.baud_rate));
    summary.push(format!("Probe count: {}", config.probe_count));
    summary.push(format!("Timeout: {}ms", config.timeout_ms));
    summary.push(format!("Color output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    if config.sweep {
        summary.push("Mode: diagnostic sweep".to_string());
    } else if let Some(pin) = config.blink_pin {
        summary.push(format!(
            "Mode: blink pin {} every {}ms",
            pin, config.blink_period_ms
        ));
    } else {
        summary.push("Mode: latency measurement".to_string());
    }

    summary.join("\n")
}

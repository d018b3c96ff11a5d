//! Main application orchestration and execution

use std::sync::Arc;

use crate::{
    cli::Cli,
    config::{display_config_summary, load_config, validate_config},
    device::PinDevice,
    error::Result,
    logging::{DeviceLogger, LoggerFactory},
    models::Config,
    output::OutputCoordinator,
    pins::PinRole,
    session::MeasurementSession,
    stats::{ProbeAggregator, ProbeRunner},
    sweep::{run_blink, run_sweep, SweepConfig},
};

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Result<Self> {
        Ok(Self { cli })
    }

    /// Run the application
    pub async fn run(self) -> Result<()> {
        let config = load_config(self.cli.clone())?;
        let warnings = validate_config(&config)?;

        if config.debug {
            println!("Configuration Summary:");
            println!("{}", display_config_summary(&config));
        }

        if !warnings.is_empty() {
            println!("Configuration Warnings:");
            for warning in &warnings {
                println!("  {}", warning.format(config.enable_color));
            }
            println!();
        }

        let factory = LoggerFactory::new(config.clone());
        let device_logger = factory.create_device_logger();

        let device = open_device(&config, &device_logger).await?;
        let session = MeasurementSession::new(device);
        session.install_interrupt_handler();
        session.prepare()?;

        // Pins are left at the baseline even when the mode fails.
        let outcome = run_mode(&config, &factory, &session).await;
        let shutdown = session.shutdown();

        if let Err(ref error) = outcome {
            let error_logger = factory.create_error_logger();
            error_logger.log_error(error, Some("run"), None).await;
        }

        outcome?;
        shutdown
    }
}

/// Dispatch to the selected mode: diagnostic sweep, pin blink, or the
/// default latency measurement.
async fn run_mode(
    config: &Config,
    factory: &LoggerFactory,
    session: &MeasurementSession,
) -> Result<()> {
    if config.sweep {
        let sweep_config = SweepConfig {
            verbose: config.verbose,
            enable_color: config.enable_color,
            ..SweepConfig::default()
        };
        println!("Sweeping one active bit across all eight pins (Ctrl-C to stop)...");
        let writes = run_sweep(session, &sweep_config).await?;
        println!("Sweep finished after {} writes.", writes);
        return Ok(());
    }

    if let Some(index) = config.blink_pin {
        let role = PinRole::from_index(index)?;
        println!(
            "Blinking {} (pin {}) every {} ms (Ctrl-C to stop)...",
            role.name(),
            index,
            config.blink_period_ms
        );
        let toggles = run_blink(session, role, config.blink_period(), config.verbose).await?;
        println!("Blink finished after {} toggles.", toggles);
        return Ok(());
    }

    let aggregator = ProbeAggregator::from_config(config);
    let result = aggregator.run(session).await?;

    let performance_logger = factory.create_performance_logger();
    performance_logger.log_run_result(&result).await;

    let coordinator = OutputCoordinator::from_config(config);
    println!("{}", coordinator.display_results(&result)?);

    Ok(())
}

#[cfg(feature = "ftdi")]
async fn open_device(
    config: &Config,
    device_logger: &DeviceLogger,
) -> Result<Arc<dyn PinDevice>> {
    use crate::device::FtdiPinDevice;

    match FtdiPinDevice::open(config.vid, config.pid, config.baud_rate) {
        Ok(device) => {
            device_logger
                .log_device_open(config.vid, config.pid, true, None)
                .await;
            Ok(Arc::new(device))
        }
        Err(err) => {
            device_logger
                .log_device_open(config.vid, config.pid, false, Some(&err.to_string()))
                .await;
            Err(err.into())
        }
    }
}

#[cfg(not(feature = "ftdi"))]
async fn open_device(
    config: &Config,
    device_logger: &DeviceLogger,
) -> Result<Arc<dyn PinDevice>> {
    use crate::error::AppError;

    device_logger
        .log_device_open(config.vid, config.pid, false, Some("no FTDI backend in this build"))
        .await;
    Err(AppError::device_open(
        "this build has no FTDI backend; rebuild with --features ftdi",
    ))
}

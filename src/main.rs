//! Loopback Latency Tester - Main CLI Application
//!
//! Measures host-to-pin round-trip latency through an FTDI adapter in
//! bit-bang mode, with diagnostic sweep and blink modes for checking
//! the loopback wiring.

use clap::Parser;
use loopback_latency_tester::{
    app::App,
    cli::Cli,
    error::{AppError, ErrorReporter, Result},
    PKG_NAME, VERSION,
};
use std::process;

#[tokio::main]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        eprintln!("Please report this issue at: https://github.com/loopback-latency-tester/loopback-latency-tester/issues");
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();

    // Cross-flag rules clap cannot express
    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    // Topic help short-circuits the measurement entirely
    if cli.should_show_topic_help() {
        println!("{}", cli.display_help());
        return;
    }

    if cli.debug {
        println!("{} v{}", PKG_NAME, VERSION);
        println!("Debug mode enabled");
        println!();
    }

    let use_colors = cli.use_colors();
    let verbose = cli.verbose;

    if let Err(e) = run_application(cli).await {
        let reporter = ErrorReporter::new(use_colors, verbose);
        reporter.report_error(&e);

        // Print suggestions for common errors
        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    App::new(cli)?.run().await
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config(_) | AppError::Validation(_) | AppError::Parse(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format (PROBE_COUNT, TIMEOUT_MS, FTDI_VID, FTDI_PID)");
            eprintln!("  - USB ids accept hex with or without an 0x prefix, e.g. 0x0403 or 0403");
            eprintln!("  - Probe count must be 1-10000, timeout 1-60000 ms");
        }
        AppError::DeviceOpen(_) => {
            eprintln!();
            eprintln!("Device troubleshooting:");
            eprintln!("  - Check the adapter is plugged in and shows up on the USB bus");
            eprintln!("  - Verify --vid/--pid match the adapter (default 0403:6001)");
            eprintln!("  - On Linux, check udev rules grant you access to the device");
        }
        AppError::Timeout(_) | AppError::AllProbesFailed(_) => {
            eprintln!();
            eprintln!("Measurement troubleshooting:");
            eprintln!("  - Verify the loopback jumper between the TX and RX pins");
            eprintln!("  - Run with --sweep and a probe clip to confirm the wiring");
            eprintln!("  - Increase the budget with --timeout-ms");
        }
        AppError::DeviceWrite(_) | AppError::DeviceRead(_) => {
            eprintln!();
            eprintln!("Device I/O troubleshooting:");
            eprintln!("  - The adapter may have been unplugged mid-run; reconnect it");
            eprintln!("  - Try a different USB port, preferably without a hub");
        }
        _ => {}
    }
}

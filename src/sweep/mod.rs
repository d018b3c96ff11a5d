//! Diagnostic pin exercises: bit sweep and single-pin blink
//!
//! Neither measures latency. The sweep walks one active bit across all
//! eight positions so a probe clip or LED can confirm the wiring; blink
//! toggles one chosen pin on a fixed period until interrupted.

use std::time::Duration;

use colored::Colorize;
use tokio::task;

use crate::error::Result;
use crate::pins::{PinMask, PinRole, ALL_ROLES};
use crate::session::MeasurementSession;

/// Settings for the diagnostic sweep
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Full passes over the eight bit positions
    pub repeats: u32,
    /// Pacing between consecutive writes
    pub interval: Duration,
    /// Render each written mask
    pub verbose: bool,
    /// Color the rendered masks
    pub enable_color: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            repeats: 4,
            interval: crate::defaults::DEFAULT_SWEEP_INTERVAL,
            verbose: false,
            enable_color: false,
        }
    }
}

async fn write_pins(session: &MeasurementSession, value: u8) -> Result<()> {
    let device = session.device();
    task::spawn_blocking(move || device.write_byte(value)).await??;
    Ok(())
}

/// Walk a single active bit through all eight positions, `repeats`
/// times, one write per pacing interval. Stops between writes when the
/// session is cancelled and always leaves the pins at the baseline.
/// Returns the number of writes performed.
pub async fn run_sweep(session: &MeasurementSession, config: &SweepConfig) -> Result<u32> {
    let mut pacing = tokio::time::interval(config.interval);
    let mut writes = 0u32;

    'passes: for _ in 0..config.repeats {
        for role in ALL_ROLES {
            if session.is_cancelled() {
                break 'passes;
            }
            pacing.tick().await;

            let mask = role.mask();
            write_pins(session, mask.bits()).await?;
            writes += 1;

            if config.verbose {
                let line = format!("sweep {} {}", role.name(), mask.render());
                if config.enable_color {
                    println!("{}", line.cyan());
                } else {
                    println!("{}", line);
                }
            }
        }
    }

    write_pins(session, PinMask::ZERO.bits()).await?;
    Ok(writes)
}

/// Toggle one pin high/low on a fixed half-period until the session is
/// cancelled. Returns the number of toggles performed; the pins are
/// back at the baseline when this returns.
pub async fn run_blink(
    session: &MeasurementSession,
    role: PinRole,
    half_period: Duration,
    verbose: bool,
) -> Result<u64> {
    let mask = role.mask();
    let mut pacing = tokio::time::interval(half_period);
    let mut high = false;
    let mut toggles = 0u64;

    while !session.is_cancelled() {
        pacing.tick().await;
        high = !high;

        let value = if high { mask.bits() } else { 0x00 };
        write_pins(session, value).await?;
        toggles += 1;

        if verbose {
            println!(
                "blink {} {}",
                role.name(),
                if high { "high" } else { "low" }
            );
        }
    }

    write_pins(session, PinMask::ZERO.bits()).await?;
    Ok(toggles)
}

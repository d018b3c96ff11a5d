//! Measurement session: shared device handle plus cooperative cancellation
//!
//! One session spans one invocation of the tool. It owns the device handle
//! every task borrows, carries the cancellation flag Ctrl-C raises, and
//! funnels cleanup through a single shutdown path that runs exactly once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::device::{PinDevice, PinMode};
use crate::error::Result;
use crate::pins::{PinMask, OUTPUT_MASK};

/// Shared state for one measurement run
pub struct MeasurementSession {
    device: Arc<dyn PinDevice>,
    cancelled: Arc<AtomicBool>,
    shutdown_done: AtomicBool,
}

impl MeasurementSession {
    /// Wrap an opened device in a fresh session
    pub fn new(device: Arc<dyn PinDevice>) -> Self {
        Self {
            device,
            cancelled: Arc::new(AtomicBool::new(false)),
            shutdown_done: AtomicBool::new(false),
        }
    }

    /// Handle to the shared device
    pub fn device(&self) -> Arc<dyn PinDevice> {
        Arc::clone(&self.device)
    }

    /// Handle to the cancellation flag, for poll loops on other threads
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Raise the cancellation flag
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check the cancellation flag
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Spawn a task that raises the cancellation flag on Ctrl-C. The
    /// interrupted work winds down cooperatively; cleanup stays out of
    /// the signal path.
    pub fn install_interrupt_handler(&self) {
        let flag = self.cancel_flag();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    /// Put the device into bit-bang mode with the output group driven
    /// and all pins at the quiescent baseline.
    pub fn prepare(&self) -> Result<()> {
        self.device.set_mode(OUTPUT_MASK.bits(), PinMode::Bitbang)?;
        self.device.write_byte(PinMask::ZERO.bits())?;
        Ok(())
    }

    /// Release the device: baseline write, mode reset, close. Runs at
    /// most once; later calls are no-ops.
    pub fn shutdown(&self) -> Result<()> {
        if self.shutdown_done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.device.write_byte(PinMask::ZERO.bits())?;
        self.device.set_mode(0x00, PinMode::Reset)?;
        self.device.close()?;
        Ok(())
    }
}

//! Pin device contract and backends
//!
//! Everything above this layer talks to a `PinDevice`; the real libftdi
//! backend lives behind the `ftdi` feature so the crate builds and tests
//! without native libraries.

use std::fmt;

use thiserror::Error;

use crate::error::AppError;

pub mod mock;

#[cfg(feature = "ftdi")]
pub mod ftdi;

pub use mock::SyntheticDevice;

#[cfg(feature = "ftdi")]
pub use ftdi::FtdiPinDevice;

/// Errors surfaced by a device backend. Split by operation so callers can
/// tag probe outcomes without string matching.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Device could not be opened or claimed
    #[error("device open failed: {0}")]
    Open(String),

    /// Mode change (bit-bang enable/reset) failed
    #[error("mode change failed: {0}")]
    Mode(String),

    /// Writing the pin state byte failed
    #[error("pin write failed: {0}")]
    Write(String),

    /// Reading the pin state byte failed
    #[error("pin read failed: {0}")]
    Read(String),

    /// Closing the device failed
    #[error("device close failed: {0}")]
    Close(String),
}

impl From<DeviceError> for AppError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::Open(msg) => AppError::device_open(msg),
            DeviceError::Mode(msg) => AppError::device_open(msg),
            DeviceError::Write(msg) => AppError::device_write(msg),
            DeviceError::Read(msg) => AppError::device_read(msg),
            DeviceError::Close(msg) => AppError::device_write(msg),
        }
    }
}

/// Bit-bang controller mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    /// Normal UART operation, bit-bang disabled
    Reset,
    /// Asynchronous bit-bang: writes drive output pins, reads sample all pins
    Bitbang,
}

impl fmt::Display for PinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinMode::Reset => write!(f, "reset"),
            PinMode::Bitbang => write!(f, "bitbang"),
        }
    }
}

/// Contract every pin backend implements.
///
/// Methods take `&self` because one probe shares the handle between a
/// blocking listener thread and a trigger task; backends serialize access
/// internally. All calls are synchronous and expected to be invoked from
/// the blocking pool, never from an async executor thread.
pub trait PinDevice: Send + Sync {
    /// Drive the output pins to `value`. Returns the number of bytes
    /// accepted by the device (always 1 on success).
    fn write_byte(&self, value: u8) -> Result<usize, DeviceError>;

    /// Sample the current state of all eight pins.
    fn read_pins(&self) -> Result<u8, DeviceError>;

    /// Drain any buffered writes to the wire.
    fn flush(&self) -> Result<(), DeviceError>;

    /// Configure which pins are outputs and enter/leave bit-bang mode.
    fn set_mode(&self, output_mask: u8, mode: PinMode) -> Result<(), DeviceError>;

    /// Release the device. Safe to call more than once; calls after the
    /// first are no-ops.
    fn close(&self) -> Result<(), DeviceError>;

    /// Short human-readable identity for log lines.
    fn describe(&self) -> String;
}

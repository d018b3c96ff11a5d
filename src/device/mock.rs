//! Synthetic loopback device for tests and benchmarks
//!
//! Emulates a wired TX->RX bridge in memory: after a write that raises the
//! loopback output bit, the loopback input bit reads high once a scripted
//! latency has elapsed. Supports a never-responding mode for timeout paths
//! and write/read error injection for failure paths.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::device::{DeviceError, PinDevice, PinMode};
use crate::pins::PinRole;

#[derive(Debug)]
struct SyntheticState {
    /// Last byte written to the output pins
    pins: u8,
    /// Instant at which the loopback input starts reading high
    rx_high_at: Option<Instant>,
    /// Every byte written, in order
    writes: Vec<u8>,
    /// Every mode change, in order
    modes: Vec<(u8, PinMode)>,
    reads: u64,
    closed: bool,
}

/// In-memory loopback standing in for real hardware
pub struct SyntheticDevice {
    state: Mutex<SyntheticState>,
    latency: Duration,
    respond: bool,
    fail_writes: bool,
    fail_reads: bool,
}

impl SyntheticDevice {
    /// Loopback that echoes after `latency`
    pub fn new(latency: Duration) -> Self {
        Self {
            state: Mutex::new(SyntheticState {
                pins: 0x00,
                rx_high_at: None,
                writes: Vec::new(),
                modes: Vec::new(),
                reads: 0,
                closed: false,
            }),
            latency,
            respond: true,
            fail_writes: false,
            fail_reads: false,
        }
    }

    /// Loopback that echoes on the very next read
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Loopback wire cut: the input bit never asserts
    pub fn unresponsive() -> Self {
        let mut device = Self::immediate();
        device.respond = false;
        device
    }

    /// Make every write fail
    pub fn with_write_failure(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Make every read fail
    pub fn with_read_failure(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Bytes written so far, in order
    pub fn writes(&self) -> Vec<u8> {
        self.state.lock().unwrap().writes.clone()
    }

    /// Mode changes so far, in order
    pub fn modes(&self) -> Vec<(u8, PinMode)> {
        self.state.lock().unwrap().modes.clone()
    }

    /// Number of reads served
    pub fn read_count(&self) -> u64 {
        self.state.lock().unwrap().reads
    }

    /// Whether `close` has been called
    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}

impl PinDevice for SyntheticDevice {
    fn write_byte(&self, value: u8) -> Result<usize, DeviceError> {
        if self.fail_writes {
            return Err(DeviceError::Write("injected write failure".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return Err(DeviceError::Write("device is closed".to_string()));
        }
        state.writes.push(value);
        state.pins = value;
        let tx_high = value & PinRole::LoopbackWrite.mask().bits() != 0;
        state.rx_high_at = if tx_high && self.respond {
            Some(Instant::now() + self.latency)
        } else {
            None
        };
        Ok(1)
    }

    fn read_pins(&self) -> Result<u8, DeviceError> {
        if self.fail_reads {
            return Err(DeviceError::Read("injected read failure".to_string()));
        }
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return Err(DeviceError::Read("device is closed".to_string()));
        }
        state.reads += 1;
        let rx_bit = PinRole::LoopbackRead.mask().bits();
        let rx_high = state
            .rx_high_at
            .map(|at| Instant::now() >= at)
            .unwrap_or(false);
        let mut value = state.pins & !rx_bit;
        if rx_high {
            value |= rx_bit;
        }
        Ok(value)
    }

    fn flush(&self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn set_mode(&self, output_mask: u8, mode: PinMode) -> Result<(), DeviceError> {
        let mut state = self.state.lock().unwrap();
        state.modes.push((output_mask, mode));
        Ok(())
    }

    fn close(&self) -> Result<(), DeviceError> {
        let mut state = self.state.lock().unwrap();
        state.closed = true;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("synthetic loopback (latency {:?})", self.latency)
    }
}

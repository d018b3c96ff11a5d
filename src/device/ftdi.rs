//! Real FTDI backend over libftdi (feature `ftdi`)
//!
//! Opens the adapter by VID/PID and drives it in asynchronous bit-bang
//! mode. The handle lives behind a `Mutex` because the probe shares the
//! device between a listener thread and a trigger task.

use std::io::Write;
use std::sync::Mutex;

use crate::device::{DeviceError, PinDevice, PinMode};

/// FTDI adapter in bit-bang mode
pub struct FtdiPinDevice {
    inner: Mutex<Option<ftdi::Device>>,
    vid: u16,
    pid: u16,
}

impl FtdiPinDevice {
    /// Open the first adapter matching `vid:pid` and set the bit-bang
    /// clock rate. The device starts in reset mode; call `set_mode` to
    /// enter bit-bang before writing.
    pub fn open(vid: u16, pid: u16, baud_rate: u32) -> Result<Self, DeviceError> {
        let mut device = ftdi::find_by_vid_pid(vid, pid)
            .interface(ftdi::Interface::A)
            .open()
            .map_err(|e| {
                DeviceError::Open(format!(
                    "no FTDI adapter at {:04x}:{:04x}: {}",
                    vid, pid, e
                ))
            })?;

        device
            .set_baud_rate(baud_rate)
            .map_err(|e| DeviceError::Open(format!("baud rate {} rejected: {}", baud_rate, e)))?;

        Ok(Self {
            inner: Mutex::new(Some(device)),
            vid,
            pid,
        })
    }
}

impl PinDevice for FtdiPinDevice {
    fn write_byte(&self, value: u8) -> Result<usize, DeviceError> {
        let mut guard = self.inner.lock().unwrap();
        let device = guard
            .as_mut()
            .ok_or_else(|| DeviceError::Write("device is closed".to_string()))?;
        device
            .write_all(&[value])
            .map_err(|e| DeviceError::Write(e.to_string()))?;
        Ok(1)
    }

    fn read_pins(&self) -> Result<u8, DeviceError> {
        let mut guard = self.inner.lock().unwrap();
        let device = guard
            .as_mut()
            .ok_or_else(|| DeviceError::Read("device is closed".to_string()))?;
        device.read_pins().map_err(|e| DeviceError::Read(e.to_string()))
    }

    fn flush(&self) -> Result<(), DeviceError> {
        let mut guard = self.inner.lock().unwrap();
        let device = guard
            .as_mut()
            .ok_or_else(|| DeviceError::Write("device is closed".to_string()))?;
        device.flush().map_err(|e| DeviceError::Write(e.to_string()))
    }

    fn set_mode(&self, output_mask: u8, mode: PinMode) -> Result<(), DeviceError> {
        let mut guard = self.inner.lock().unwrap();
        let device = guard
            .as_mut()
            .ok_or_else(|| DeviceError::Mode("device is closed".to_string()))?;
        let bitmode = match mode {
            PinMode::Reset => ftdi::BitMode::Reset,
            PinMode::Bitbang => ftdi::BitMode::Bitbang,
        };
        device
            .set_bitmode(output_mask, bitmode)
            .map_err(|e| DeviceError::Mode(format!("set_bitmode({:#04x}, {}): {}", output_mask, mode, e)))
    }

    fn close(&self) -> Result<(), DeviceError> {
        let mut guard = self.inner.lock().unwrap();
        if let Some(mut device) = guard.take() {
            device
                .set_bitmode(0x00, ftdi::BitMode::Reset)
                .map_err(|e| DeviceError::Close(e.to_string()))?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("FTDI adapter {:04x}:{:04x}", self.vid, self.pid)
    }
}

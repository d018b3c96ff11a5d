//! One loopback round-trip measurement
//!
//! A probe pairs a listener and a trigger. The listener busy-polls the
//! loopback input bit on a blocking worker; the trigger raises the
//! loopback output bit once the listener has signalled that it is armed.
//! The listener must be polling before the trigger fires, otherwise a
//! fast round trip could complete unobserved and read as a timeout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use tokio::task;

use crate::device::PinDevice;
use crate::models::ProbeSample;
use crate::pins::{PinMask, PinRole};
use crate::session::MeasurementSession;

/// What the listener saw before it stopped polling
enum ListenerVerdict {
    /// Loopback bit observed at this instant
    Observed { at: Instant, polls: u64 },
    /// Deadline passed without an observation
    TimedOut { polls: u64 },
    /// A pin read failed mid-poll
    ReadError { message: String, polls: u64 },
    /// The cancellation flag was raised mid-poll
    Cancelled { polls: u64 },
}

/// Run one probe: arm the listener, fire the trigger, join both, and
/// return a tagged sample. Never hangs; the deadline is checked on
/// every poll iteration. The device is left at the all-low baseline.
pub async fn probe_once(
    session: &MeasurementSession,
    sequence: u32,
    timeout: Duration,
) -> ProbeSample {
    let device = session.device();

    // Drain stale device state and establish the all-low baseline so
    // the listener starts from a known-quiet input.
    let baseline_device = Arc::clone(&device);
    let baseline = task::spawn_blocking(move || {
        baseline_device.flush()?;
        baseline_device.write_byte(PinMask::ZERO.bits())?;
        Ok::<(), crate::device::DeviceError>(())
    })
    .await;

    match baseline {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return ProbeSample::device_write(sequence, e.to_string()),
        Err(e) => {
            return ProbeSample::device_write(sequence, format!("baseline task failed: {}", e))
        }
    }

    let (ready_tx, ready_rx) = oneshot::channel::<()>();
    let listener = spawn_listener(
        Arc::clone(&device),
        session.cancel_flag(),
        ready_tx,
        timeout,
    );

    // Hard ordering requirement: the trigger must not fire until the
    // listener is armed and polling.
    if ready_rx.await.is_err() {
        listener.abort();
        return ProbeSample::device_read(sequence, "listener never armed".to_string(), 0);
    }

    let start = Instant::now();

    let trigger_device = Arc::clone(&device);
    let trigger = task::spawn_blocking(move || {
        trigger_device.write_byte(PinRole::LoopbackWrite.mask().bits())
    });

    let (listener_result, trigger_result) = futures::future::join(listener, trigger).await;

    // Return to the quiescent state before reporting; a failure here
    // does not change the probe's outcome.
    let quiesce_device = Arc::clone(&device);
    let _ = task::spawn_blocking(move || quiesce_device.write_byte(PinMask::ZERO.bits())).await;

    let write_error = match trigger_result {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(e) => Some(format!("trigger task failed: {}", e)),
    };

    if let Some(message) = write_error {
        return ProbeSample::device_write(sequence, message);
    }

    match listener_result {
        Ok(ListenerVerdict::Observed { at, polls }) => {
            ProbeSample::success(sequence, at.saturating_duration_since(start), polls)
        }
        Ok(ListenerVerdict::TimedOut { polls }) => ProbeSample::timeout(sequence, timeout, polls),
        Ok(ListenerVerdict::ReadError { message, polls }) => {
            ProbeSample::device_read(sequence, message, polls)
        }
        Ok(ListenerVerdict::Cancelled { polls }) => ProbeSample::cancelled(sequence, polls),
        Err(e) => ProbeSample::device_read(sequence, format!("listener task failed: {}", e), 0),
    }
}

/// Busy-poll the loopback input on a blocking worker. Fires the ready
/// signal exactly once, before the first read.
fn spawn_listener(
    device: Arc<dyn PinDevice>,
    cancelled: Arc<AtomicBool>,
    ready: oneshot::Sender<()>,
    timeout: Duration,
) -> task::JoinHandle<ListenerVerdict> {
    task::spawn_blocking(move || {
        let watched = PinRole::LoopbackRead.mask().bits();
        let deadline = Instant::now() + timeout;
        let mut polls: u64 = 0;

        // Armed: from here on every iteration either observes, errors,
        // cancels, or times out.
        let _ = ready.send(());

        loop {
            if cancelled.load(Ordering::SeqCst) {
                return ListenerVerdict::Cancelled { polls };
            }

            match device.read_pins() {
                Ok(pins) => {
                    polls += 1;
                    if pins & watched != 0 {
                        return ListenerVerdict::Observed {
                            at: Instant::now(),
                            polls,
                        };
                    }
                }
                Err(e) => {
                    return ListenerVerdict::ReadError {
                        message: e.to_string(),
                        polls,
                    }
                }
            }

            if Instant::now() >= deadline {
                return ListenerVerdict::TimedOut { polls };
            }

            std::hint::spin_loop();
        }
    })
}

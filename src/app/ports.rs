//! Port traits: the hexagonal boundary between the capture loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CaptureService (domain)
//! ```
//!
//! Driven adapters (camera, FIR sensor, RTC, power, storage, event sinks)
//! implement these traits.  The [`CaptureService`](super::service::CaptureService)
//! consumes them via generics, so the domain core never touches hardware
//! or the filesystem directly.

use embedded_hal::delay::DelayNs;

use crate::config::CameraSettings;
use crate::error::{CameraError, StorageError, ThermalError};
use crate::frame::{ThermalFrame, VisibleFrame};
use crate::timestamp::RtcDateTime;

// ───────────────────────────────────────────────────────────────
// Camera port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Visible-light camera.
pub trait CameraPort {
    /// Reset the sensor and apply format, frame size, warm-up and buffer
    /// allocation.  Called once per boot.
    fn configure(&mut self, settings: &CameraSettings) -> Result<(), CameraError>;

    /// Capture one frame.  The caller owns it until [`release`](Self::release).
    fn snapshot(&mut self) -> Result<VisibleFrame, CameraError>;

    /// Hand the frame's backing buffer back to the driver.
    fn release(&mut self, frame: VisibleFrame);
}

// ───────────────────────────────────────────────────────────────
// Thermal port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Far-infrared sensor array.
pub trait ThermalPort {
    /// Power up the sensor.  Safe to call again without a matching deinit.
    fn thermal_init(&mut self) -> Result<(), ThermalError>;

    /// Blocking read of one full frame.
    ///
    /// [`ThermalError::Io`] means the bus transfer failed and the caller may
    /// try again on a later cycle.
    fn read_thermal(&mut self) -> Result<ThermalFrame, ThermalError>;

    /// Put the sensor back to sleep.
    fn thermal_deinit(&mut self) -> Result<(), ThermalError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Real-time clock plus a monotonic uptime counter.
pub trait ClockPort {
    /// Current calendar reading.
    fn datetime(&self) -> RtcDateTime;

    /// Microseconds since boot (monotonic).
    fn uptime_us(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Power port
// ───────────────────────────────────────────────────────────────

/// Why the firmware is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeReason {
    /// Cold boot or reset.
    PowerOn,
    /// The armed wake timer expired during deep sleep.
    Timer,
    /// Any other wake source (GPIO, ULP, …).
    Other,
}

/// Wake timer and deep-sleep control.
pub trait PowerPort {
    /// Cause of the most recent wake.
    fn wake_reason(&self) -> WakeReason;

    /// Arm the wake timer for `ms` milliseconds from now.
    fn arm_wakeup(&mut self, ms: u32);

    /// Enter deep sleep.
    ///
    /// On hardware this does not return: the chip reboots when the timer
    /// fires.  Simulation and test adapters return after the armed interval.
    fn deep_sleep(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Board (all hardware ports at once)
// ───────────────────────────────────────────────────────────────

/// Every hardware port the capture cycle needs.
///
/// One object satisfies all of them, so the service holds a single mutable
/// borrow while each port boundary stays explicit.
pub trait Board: CameraPort + ThermalPort + ClockPort + PowerPort + DelayNs {}

impl<T> Board for T where T: CameraPort + ThermalPort + ClockPort + PowerPort + DelayNs {}

// ───────────────────────────────────────────────────────────────
// Frame store port (driven adapter: domain → storage)
// ───────────────────────────────────────────────────────────────

/// Flat file storage for capture output.
///
/// Names are bare file names (no directories).  Implementations write
/// atomically: a failed write never leaves a truncated file under `name`.
pub trait FrameStore {
    /// Create or replace `name` with `data`.
    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Check whether `name` exists.
    fn exists(&self, name: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`CaptureEvent`](super::events::CaptureEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::CaptureEvent);
}

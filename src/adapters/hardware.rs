//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the camera driver, the FIR array driver, the RTC, the power
//! controller and a blocking delay, exposing them as one
//! [`Board`](crate::app::ports::Board).  On non-espidf targets the
//! underlying drivers run their cfg-gated simulations.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::adapters::power::PowerAdapter;
use crate::adapters::time::RtcClock;
use crate::app::ports::{CameraPort, ClockPort, PowerPort, ThermalPort, WakeReason};
use crate::config::CameraSettings;
use crate::drivers::camera::Camera;
use crate::error::{CameraError, ThermalError};
use crate::frame::{ThermalFrame, VisibleFrame};
use crate::sensors::amg8833::Amg8833;
use crate::timestamp::RtcDateTime;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I2C, D> {
    camera: Camera,
    fir: Amg8833<I2C>,
    clock: RtcClock,
    power: PowerAdapter,
    delay: D,
}

impl<I2C: I2c, D: DelayNs> HardwareAdapter<I2C, D> {
    pub fn new(
        camera: Camera,
        fir: Amg8833<I2C>,
        clock: RtcClock,
        power: PowerAdapter,
        delay: D,
    ) -> Self {
        Self {
            camera,
            fir,
            clock,
            power,
            delay,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

// ── CameraPort implementation ─────────────────────────────────

impl<I2C: I2c, D: DelayNs> CameraPort for HardwareAdapter<I2C, D> {
    fn configure(&mut self, settings: &CameraSettings) -> Result<(), CameraError> {
        self.camera.configure(settings)
    }

    fn snapshot(&mut self) -> Result<VisibleFrame, CameraError> {
        self.camera.snapshot()
    }

    fn release(&mut self, frame: VisibleFrame) {
        self.camera.release(frame);
    }
}

// ── ThermalPort implementation ────────────────────────────────

impl<I2C: I2c, D: DelayNs> ThermalPort for HardwareAdapter<I2C, D> {
    fn thermal_init(&mut self) -> Result<(), ThermalError> {
        self.fir.init()
    }

    fn read_thermal(&mut self) -> Result<ThermalFrame, ThermalError> {
        self.fir.read_frame()
    }

    fn thermal_deinit(&mut self) -> Result<(), ThermalError> {
        self.fir.deinit()
    }
}

// ── ClockPort / PowerPort implementation ──────────────────────

impl<I2C: I2c, D: DelayNs> ClockPort for HardwareAdapter<I2C, D> {
    fn datetime(&self) -> RtcDateTime {
        self.clock.datetime()
    }

    fn uptime_us(&self) -> u64 {
        self.clock.uptime_us()
    }
}

impl<I2C: I2c, D: DelayNs> PowerPort for HardwareAdapter<I2C, D> {
    fn wake_reason(&self) -> WakeReason {
        self.power.wake_reason()
    }

    fn arm_wakeup(&mut self, ms: u32) {
        self.power.arm_wakeup(ms);
    }

    fn deep_sleep(&mut self) {
        self.power.deep_sleep();
    }
}

// ── Blocking delay ────────────────────────────────────────────

impl<I2C: I2c, D: DelayNs> DelayNs for HardwareAdapter<I2C, D> {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}

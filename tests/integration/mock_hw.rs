//! Mock hardware adapter for integration tests.
//!
//! Records every peripheral call so tests can assert on the full call
//! history of a capture cycle without touching a camera, an I²C bus or the
//! RTC.

use std::cell::Cell;
use std::collections::{HashMap, VecDeque};

use embedded_hal::delay::DelayNs;
use fircam::app::events::CaptureEvent;
use fircam::app::ports::{
    CameraPort, ClockPort, EventSink, FrameStore, PowerPort, ThermalPort, WakeReason,
};
use fircam::config::CameraSettings;
use fircam::error::{CameraError, StorageError, ThermalError};
use fircam::frame::{AMG8833_PIXELS, ThermalFrame, VisibleFrame};
use fircam::timestamp::RtcDateTime;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Configure(CameraSettings),
    ThermalInit,
    DelayMs(u32),
    Snapshot,
    ReadThermal,
    ThermalDeinit,
    Release { width: u32, height: u32 },
    ArmWakeup(u32),
    DeepSleep,
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub calls: Vec<HwCall>,
    /// Results for successive `read_thermal` calls; when empty,
    /// [`MockBoard::default_thermal`] is returned.
    pub thermal: VecDeque<Result<ThermalFrame, ThermalError>>,
    pub snapshot_error: Option<CameraError>,
    pub now: RtcDateTime,
    pub wake_reason: WakeReason,
    uptime_us: Cell<u64>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            thermal: VecDeque::new(),
            snapshot_error: None,
            now: RtcDateTime::new(2024, 1, 5, 9, 3, 7),
            wake_reason: WakeReason::PowerOn,
            uptime_us: Cell::new(1_000_000),
        }
    }

    /// 64 pixels: a 20 °C background with one 31.5 °C hot spot.
    pub fn default_thermal() -> ThermalFrame {
        let mut pixels = vec![20.0; AMG8833_PIXELS];
        pixels[27] = 31.5;
        ThermalFrame::from_pixels(23.0625, pixels)
    }

    pub fn count(&self, call: &HwCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn slept(&self) -> bool {
        self.calls.contains(&HwCall::DeepSleep)
    }

    pub fn released(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::Release { .. }))
            .count()
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraPort for MockBoard {
    fn configure(&mut self, settings: &CameraSettings) -> Result<(), CameraError> {
        self.calls.push(HwCall::Configure(*settings));
        Ok(())
    }

    fn snapshot(&mut self) -> Result<VisibleFrame, CameraError> {
        self.calls.push(HwCall::Snapshot);
        if let Some(e) = self.snapshot_error {
            return Err(e);
        }
        Ok(VisibleFrame::from_fn(32, 24, |x, y| ((x as u16) << 11) | (y as u16)))
    }

    fn release(&mut self, frame: VisibleFrame) {
        self.calls.push(HwCall::Release {
            width: frame.width(),
            height: frame.height(),
        });
    }
}

impl ThermalPort for MockBoard {
    fn thermal_init(&mut self) -> Result<(), ThermalError> {
        self.calls.push(HwCall::ThermalInit);
        Ok(())
    }

    fn read_thermal(&mut self) -> Result<ThermalFrame, ThermalError> {
        self.calls.push(HwCall::ReadThermal);
        self.thermal
            .pop_front()
            .unwrap_or_else(|| Ok(Self::default_thermal()))
    }

    fn thermal_deinit(&mut self) -> Result<(), ThermalError> {
        self.calls.push(HwCall::ThermalDeinit);
        Ok(())
    }
}

impl ClockPort for MockBoard {
    fn datetime(&self) -> RtcDateTime {
        self.now
    }

    fn uptime_us(&self) -> u64 {
        self.uptime_us.get()
    }
}

impl PowerPort for MockBoard {
    fn wake_reason(&self) -> WakeReason {
        self.wake_reason
    }

    fn arm_wakeup(&mut self, ms: u32) {
        self.calls.push(HwCall::ArmWakeup(ms));
    }

    fn deep_sleep(&mut self) {
        self.calls.push(HwCall::DeepSleep);
        let armed = self
            .calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::ArmWakeup(ms) => Some(*ms),
                _ => None,
            })
            .unwrap_or(0);
        self.uptime_us
            .set(self.uptime_us.get() + u64::from(armed) * 1000);
        self.wake_reason = WakeReason::Timer;
    }
}

impl DelayNs for MockBoard {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(HwCall::DelayMs(ms));
        self.uptime_us
            .set(self.uptime_us.get() + u64::from(ms) * 1000);
    }
}

// ── MemStore ──────────────────────────────────────────────────

pub struct MemStore {
    pub files: HashMap<String, Vec<u8>>,
    /// Ordered write log.
    pub writes: Vec<String>,
    /// When set, every write fails with this error.
    pub fail_with: Option<StorageError>,
}

#[allow(dead_code)]
impl MemStore {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            writes: Vec::new(),
            fail_with: None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStore for MemStore {
    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.writes.push(name.to_string());
        self.files.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<CaptureEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &CaptureEvent) {
        self.events.push(event.clone());
    }
}

//! Capture service, the hexagonal core.
//!
//! [`CaptureService`] runs the capture cycle.  It holds only configuration
//! and informational counters; every peripheral is reached through the port
//! traits passed in by the caller, making the whole loop testable with mock
//! adapters.
//!
//! ```text
//!  CameraPort ──▶ ┌────────────────────────┐ ──▶ FrameStore
//! ThermalPort ──▶ │     CaptureService     │ ──▶ EventSink
//!   ClockPort ──▶ │ settle · snap · encode │
//!   PowerPort ◀── └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::codec::{jpeg, thermal};
use crate::config::CaptureConfig;
use crate::error::{Result, ThermalError};
use crate::timestamp::{CaptureNames, Timestamp};

use super::events::{CaptureEvent, SavedCapture};
use super::frame_clock::FrameClock;
use super::ports::{Board, EventSink, FrameStore};

/// What one call to [`CaptureService::run_cycle`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Both files were written and the board went through deep sleep.
    Completed(SavedCapture),
    /// The thermal read failed; nothing was written and no sleep happened.
    Skipped,
}

// ───────────────────────────────────────────────────────────────
// CaptureService
// ───────────────────────────────────────────────────────────────

/// Sequences one capture per wake.
pub struct CaptureService {
    config: CaptureConfig,
    frame_clock: FrameClock,
    cycles: u64,
    skipped: u64,
}

impl CaptureService {
    /// Construct the service.  Does **not** touch hardware; call
    /// [`boot`](Self::boot) next.
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            frame_clock: FrameClock::new(),
            cycles: 0,
            skipped: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure the camera and announce why we are running.
    ///
    /// A configuration that fails [`CaptureConfig::validate`] is rejected
    /// before any peripheral is touched.
    pub fn boot(&mut self, hw: &mut impl Board, sink: &mut impl EventSink) -> Result<()> {
        self.config.validate()?;
        let reason = hw.wake_reason();
        hw.configure(&self.config.camera)?;
        sink.emit(&CaptureEvent::Booted(reason));
        info!(
            "CaptureService booted ({:?}), settle={}ms wake={}ms",
            reason, self.config.settle_ms, self.config.wake_interval_ms
        );
        Ok(())
    }

    /// Run capture cycles forever.  Returns only with a fatal error.
    pub fn run(
        &mut self,
        hw: &mut impl Board,
        store: &mut impl FrameStore,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        loop {
            if self.run_cycle(hw, store, sink)? == CycleOutcome::Skipped {
                debug!("cycle skipped, retrying immediately");
            }
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one capture cycle:
    /// thermal init → settle → snapshot → thermal read → save both → sleep.
    ///
    /// A thermal bus error ends the cycle early with
    /// [`CycleOutcome::Skipped`]: the snapshot is dropped unsaved, the
    /// sensor is left initialised, and no sleep happens.  Any other error
    /// is returned.
    pub fn run_cycle(
        &mut self,
        hw: &mut impl Board,
        store: &mut impl FrameStore,
        sink: &mut impl EventSink,
    ) -> Result<CycleOutcome> {
        self.cycles += 1;
        let cycle = self.cycles;

        // 1. Frame timing (informational only)
        let fps = self.frame_clock.tick(hw.uptime_us());
        sink.emit(&CaptureEvent::CycleStarted { cycle, fps });

        // 2–3. Thermal sensor up, let it settle
        hw.thermal_init()?;
        hw.delay_ms(self.config.settle_ms);

        // 4. Visible frame
        let frame = hw.snapshot()?;

        // 5. Thermal frame, or abandon the cycle
        let ir = match hw.read_thermal() {
            Ok(ir) => ir,
            Err(ThermalError::Io) => {
                self.skipped += 1;
                warn!("cycle {}: thermal read failed, skipping", cycle);
                sink.emit(&CaptureEvent::ThermalReadFailed { cycle });
                return Ok(CycleOutcome::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        // 6. Shared stamp
        let timestamp = Timestamp::from_datetime(&hw.datetime());
        let names = CaptureNames::for_timestamp(&timestamp);

        // 7. Visible → JPEG
        let jpeg = jpeg::encode(&frame, self.config.jpeg_quality)?;
        store.write(&names.rgb, &jpeg)?;

        // 8. Thermal → raw fixed point
        store.write(&names.thermal, &thermal::encode(&ir))?;

        // 9–10. Release hardware resources
        hw.thermal_deinit()?;
        hw.release(frame);

        let saved = SavedCapture {
            timestamp,
            names,
            jpeg_bytes: jpeg.len(),
            thermal_samples: ir.len(),
            ambient_c: ir.ambient_c,
            min_c: ir.min_c,
            max_c: ir.max_c,
        };
        sink.emit(&CaptureEvent::Saved(saved.clone()));

        // 11–12. Sleep until the next capture
        hw.arm_wakeup(self.config.wake_interval_ms);
        sink.emit(&CaptureEvent::Sleeping {
            wake_ms: self.config.wake_interval_ms,
        });
        hw.deep_sleep();

        Ok(CycleOutcome::Completed(saved))
    }

    // ── Queries ───────────────────────────────────────────────

    /// Cycles started since boot (completed + skipped + failed).
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Cycles abandoned because of a thermal bus error.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

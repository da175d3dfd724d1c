//! Outbound capture events.
//!
//! The [`CaptureService`](super::service::CaptureService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them (serial log, test recorder).

use super::ports::WakeReason;
use crate::timestamp::{CaptureNames, Timestamp};

/// Structured events emitted by the capture loop.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// The camera is configured and the loop is about to start.
    Booted(WakeReason),

    /// A capture cycle began.  `fps` is the rate measured between the
    /// previous two cycle starts, when there have been at least two.
    CycleStarted { cycle: u64, fps: Option<f32> },

    /// The thermal read hit a bus error; the cycle was skipped.
    ThermalReadFailed { cycle: u64 },

    /// Both files of a capture were written.
    Saved(SavedCapture),

    /// The wake timer is armed and deep sleep is next.
    Sleeping { wake_ms: u32 },
}

/// Summary of one persisted capture.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCapture {
    pub timestamp: Timestamp,
    pub names: CaptureNames,
    pub jpeg_bytes: usize,
    pub thermal_samples: usize,
    pub ambient_c: f32,
    pub min_c: f32,
    pub max_c: f32,
}

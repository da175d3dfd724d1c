//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured capture events to the
//! logger (ESP-IDF log on UART / USB-CDC in production, `env_logger` on
//! host).

use log::{debug, info, warn};

use crate::app::events::CaptureEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`CaptureEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &CaptureEvent) {
        match event {
            CaptureEvent::Booted(reason) => {
                info!("BOOT  | wake={:?}", reason);
            }
            CaptureEvent::CycleStarted { cycle, fps } => {
                info!("CYCLE | #{}", cycle);
                if let Some(fps) = fps {
                    debug!("CYCLE | #{} | {:.4} fps", cycle, fps);
                }
            }
            CaptureEvent::ThermalReadFailed { cycle } => {
                warn!("FIR   | #{} read failed, cycle skipped", cycle);
            }
            CaptureEvent::Saved(s) => {
                info!("SAVE  | rgb {} ({} B)", s.names.rgb, s.jpeg_bytes);
                info!(
                    "SAVE  | thermal {} ({} px) | ambient={:.2}\u{00b0}C \
                     min={:.2}\u{00b0}C max={:.2}\u{00b0}C",
                    s.names.thermal, s.thermal_samples, s.ambient_c, s.min_c, s.max_c,
                );
                info!("SAVE  | stamp {}", s.timestamp);
            }
            CaptureEvent::Sleeping { wake_ms } => {
                info!("SLEEP | wake in {} ms", wake_ms);
            }
        }
    }
}

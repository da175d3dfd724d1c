//! Informational cycle-rate measurement.
//!
//! Nothing in the capture loop branches on the measured rate; it only ends
//! up in the log.

/// Measures the interval between successive [`tick`](FrameClock::tick)s.
#[derive(Debug, Default, Clone)]
pub struct FrameClock {
    last_us: Option<u64>,
    fps: Option<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tick at `now_us` and return the rate since the previous one.
    pub fn tick(&mut self, now_us: u64) -> Option<f32> {
        if let Some(last) = self.last_us {
            let dt = now_us.saturating_sub(last);
            self.fps = (dt > 0).then(|| 1_000_000.0 / dt as f32);
        }
        self.last_us = Some(now_us);
        self.fps
    }

    /// Last measured rate in ticks per second.
    pub fn fps(&self) -> Option<f32> {
        self.fps
    }
}

//! Wake timer and deep-sleep adapter.
//!
//! Implements [`PowerPort`].
//!
//! On ESP-IDF: `esp_sleep_enable_timer_wakeup()` + `esp_deep_sleep_start()`.
//! Deep sleep powers down the CPU and RAM, so the next capture starts
//! from a fresh boot and [`wake_reason`](PowerPort::wake_reason) reports
//! [`WakeReason::Timer`].
//!
//! On host: `deep_sleep` blocks the thread for the armed interval and
//! returns, which keeps the simulated loop running in one process.

use log::info;

use crate::app::ports::{PowerPort, WakeReason};

pub struct PowerAdapter {
    armed_ms: Option<u32>,
    #[cfg(not(target_os = "espidf"))]
    sleeps: u32,
}

impl Default for PowerAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerAdapter {
    pub fn new() -> Self {
        Self {
            armed_ms: None,
            #[cfg(not(target_os = "espidf"))]
            sleeps: 0,
        }
    }

    /// Interval armed by the last [`arm_wakeup`](PowerPort::arm_wakeup).
    pub fn armed_ms(&self) -> Option<u32> {
        self.armed_ms
    }
}

#[cfg(target_os = "espidf")]
impl PowerPort for PowerAdapter {
    fn wake_reason(&self) -> WakeReason {
        use esp_idf_svc::sys::{
            esp_sleep_get_wakeup_cause, esp_sleep_source_t_ESP_SLEEP_WAKEUP_TIMER,
            esp_sleep_source_t_ESP_SLEEP_WAKEUP_UNDEFINED,
        };
        // SAFETY: read-only query of the RTC wake cause register.
        match unsafe { esp_sleep_get_wakeup_cause() } {
            esp_sleep_source_t_ESP_SLEEP_WAKEUP_UNDEFINED => WakeReason::PowerOn,
            esp_sleep_source_t_ESP_SLEEP_WAKEUP_TIMER => WakeReason::Timer,
            _ => WakeReason::Other,
        }
    }

    fn arm_wakeup(&mut self, ms: u32) {
        use esp_idf_svc::sys::{ESP_OK, esp_sleep_enable_timer_wakeup};
        // SAFETY: configures the RTC timer; no memory is shared.
        let rc = unsafe { esp_sleep_enable_timer_wakeup(u64::from(ms) * 1000) };
        if rc != ESP_OK as i32 {
            log::error!("power: timer wakeup rejected (rc={})", rc);
        }
        self.armed_ms = Some(ms);
    }

    fn deep_sleep(&mut self) {
        info!("power: deep sleep for {:?} ms", self.armed_ms);
        // SAFETY: does not return; the chip resets on wake.
        unsafe { esp_idf_svc::sys::esp_deep_sleep_start() }
    }
}

#[cfg(not(target_os = "espidf"))]
impl PowerPort for PowerAdapter {
    fn wake_reason(&self) -> WakeReason {
        if self.sleeps == 0 {
            WakeReason::PowerOn
        } else {
            WakeReason::Timer
        }
    }

    fn arm_wakeup(&mut self, ms: u32) {
        self.armed_ms = Some(ms);
    }

    fn deep_sleep(&mut self) {
        let ms = self.armed_ms.take().unwrap_or(0);
        info!("power(sim): sleeping {} ms", ms);
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
        self.sleeps += 1;
    }
}

//! Real-time clock adapter.
//!
//! Implements [`ClockPort`] for the capture loop.
//!
//! - **`target_os = "espidf"`**: calendar time from `gettimeofday()` +
//!   `localtime_r()` (the RTC keeps running through deep sleep), uptime from
//!   `esp_timer_get_time()`.
//! - **`not(target_os = "espidf")`**: `chrono::Local` and
//!   `std::time::Instant` for host-side simulation.

use crate::app::ports::ClockPort;
use crate::timestamp::RtcDateTime;

/// RTC + monotonic timer.
pub struct RtcClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for RtcClock {
    fn default() -> Self {
        Self::new()
    }
}

impl RtcClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(target_os = "espidf")]
impl ClockPort for RtcClock {
    fn datetime(&self) -> RtcDateTime {
        use core::ptr;
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: plain libc call writing into a local.
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, ptr::null_mut()) } != 0 {
            log::warn!("rtc: gettimeofday failed, using epoch");
            return RtcDateTime::new(1970, 1, 1, 0, 0, 0);
        }
        let secs = tv.tv_sec as esp_idf_svc::sys::time_t;
        let mut tm: esp_idf_svc::sys::tm = unsafe { core::mem::zeroed() };
        // SAFETY: both pointers reference live locals.
        if unsafe { esp_idf_svc::sys::localtime_r(&secs, &mut tm) }.is_null() {
            log::warn!("rtc: localtime_r failed, using epoch");
            return RtcDateTime::new(1970, 1, 1, 0, 0, 0);
        }
        RtcDateTime {
            year: (tm.tm_year + 1900).clamp(0, i32::from(u16::MAX)) as u16,
            month: (tm.tm_mon + 1) as u8,
            day: tm.tm_mday as u8,
            // tm_wday counts from Sunday = 0.
            weekday: if tm.tm_wday == 0 { 7 } else { tm.tm_wday as u8 },
            hour: tm.tm_hour as u8,
            minute: tm.tm_min as u8,
            second: tm.tm_sec.min(59) as u8,
            subsecond: tv.tv_usec as u32,
        }
    }

    fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }
}

#[cfg(not(target_os = "espidf"))]
impl ClockPort for RtcClock {
    fn datetime(&self) -> RtcDateTime {
        chrono::Local::now().into()
    }

    fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

//! RTC readings and the `YYYYMMDDThhmmss` capture stamp.
//!
//! The stamp is the only thing shared between the two files of a capture:
//! `rgb_<stamp>.jpg` and `thermal_<stamp>.bin`.

use core::fmt::{self, Write as _};

/// Length of a formatted [`Timestamp`].
pub const TIMESTAMP_LEN: usize = 15;

/// Longest file name produced by [`CaptureNames`] (`thermal_` + stamp + `.bin`).
pub const FILE_NAME_CAP: usize = 32;

pub const RGB_PREFIX: &str = "rgb_";
pub const RGB_SUFFIX: &str = ".jpg";
pub const THERMAL_PREFIX: &str = "thermal_";
pub const THERMAL_SUFFIX: &str = ".bin";

/// Calendar reading from the real-time clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtcDateTime {
    pub year: u16,
    /// 1–12
    pub month: u8,
    /// 1–31
    pub day: u8,
    /// 1 = Monday … 7 = Sunday
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub subsecond: u32,
}

impl RtcDateTime {
    /// Reading with weekday and subsecond left at zero.
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            weekday: 0,
            hour,
            minute,
            second,
            subsecond: 0,
        }
    }
}

impl<Tz: chrono::TimeZone> From<chrono::DateTime<Tz>> for RtcDateTime {
    fn from(dt: chrono::DateTime<Tz>) -> Self {
        dt.naive_local().into()
    }
}

impl From<chrono::NaiveDateTime> for RtcDateTime {
    fn from(dt: chrono::NaiveDateTime) -> Self {
        use chrono::{Datelike, Timelike};
        Self {
            year: dt.year().clamp(0, i32::from(u16::MAX)) as u16,
            month: dt.month() as u8,
            day: dt.day() as u8,
            weekday: dt.weekday().number_from_monday() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            second: dt.second() as u8,
            subsecond: dt.nanosecond() / 1000,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Timestamp
// ───────────────────────────────────────────────────────────────

/// Fixed-width `YYYYMMDDThhmmss` capture stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp(heapless::String<TIMESTAMP_LEN>);

impl Timestamp {
    /// Format an RTC reading.
    ///
    /// Fields are clamped to their digit width (year to 9999, the rest to
    /// 99) so the result is always exactly [`TIMESTAMP_LEN`] characters,
    /// even for a corrupt RTC reading.
    pub fn from_datetime(dt: &RtcDateTime) -> Self {
        let mut s = heapless::String::new();
        let _ = write!(
            s,
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            dt.year.min(9999),
            dt.month.min(99),
            dt.day.min(99),
            dt.hour.min(99),
            dt.minute.min(99),
            dt.second.min(99),
        );
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ───────────────────────────────────────────────────────────────
// File names
// ───────────────────────────────────────────────────────────────

/// The pair of file names written for one capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureNames {
    pub rgb: heapless::String<FILE_NAME_CAP>,
    pub thermal: heapless::String<FILE_NAME_CAP>,
}

impl CaptureNames {
    pub fn for_timestamp(ts: &Timestamp) -> Self {
        Self {
            rgb: file_name(RGB_PREFIX, ts, RGB_SUFFIX),
            thermal: file_name(THERMAL_PREFIX, ts, THERMAL_SUFFIX),
        }
    }
}

fn file_name(prefix: &str, ts: &Timestamp, suffix: &str) -> heapless::String<FILE_NAME_CAP> {
    let mut s = heapless::String::new();
    let _ = write!(s, "{prefix}{ts}{suffix}");
    s
}

/// Extract the stamp from a capture file name, if it is one of ours.
pub fn stamp_of(file_name: &str) -> Option<&str> {
    let stamp = file_name
        .strip_prefix(RGB_PREFIX)
        .and_then(|rest| rest.strip_suffix(RGB_SUFFIX))
        .or_else(|| {
            file_name
                .strip_prefix(THERMAL_PREFIX)
                .and_then(|rest| rest.strip_suffix(THERMAL_SUFFIX))
        })?;
    (stamp.len() == TIMESTAMP_LEN).then_some(stamp)
}

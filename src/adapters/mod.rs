//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements        | Connects to                      |
//! |------------|-------------------|----------------------------------|
//! | `hardware` | CameraPort        | esp32-camera / simulated camera  |
//! |            | ThermalPort       | AMG8833 over I²C                 |
//! |            | ClockPort         | `time::RtcClock`                 |
//! |            | PowerPort         | `power::PowerAdapter`            |
//! | `fs_store` | FrameStore        | FAT partition / host directory   |
//! | `log_sink` | EventSink         | Serial log output                |
//! | `time`     | ClockPort         | RTC + ESP32 system timer         |
//! | `power`    | PowerPort         | RTC wake timer, deep sleep       |
//! | `delay`    | DelayNs (host)    | `std::thread::sleep`             |

#[cfg(not(target_os = "espidf"))]
pub mod delay;
pub mod fs_store;
pub mod hardware;
pub mod log_sink;
pub mod power;
pub mod time;

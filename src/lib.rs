//! fircam firmware library.
//!
//! Periodic visible + far-infrared snapshot firmware.  Exposes the
//! capture service, codecs and adapters for the binary and for integration
//! testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module; everything else runs
//! on the host.

#![deny(unused_must_use)]

#[cfg(all(target_os = "espidf", not(feature = "espidf")))]
compile_error!("building for ESP-IDF requires `--features espidf` (esp-idf-svc, esp_idf_logger)");

pub mod app;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod timestamp;

pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;

//! Application core: capture sequencing, zero I/O.
//!
//! This module contains the capture loop: thermal init, settle, snapshot,
//! thermal read, persist, sleep.  All interaction with hardware and storage
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod events;
pub mod frame_clock;
pub mod ports;
pub mod service;

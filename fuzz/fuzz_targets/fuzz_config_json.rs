//! Fuzz target: `CaptureConfig::from_json`
//!
//! The override file on the storage root is user-editable, so the parser
//! must cope with anything.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Every accepted config passes `validate()`
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use fircam::config::CaptureConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = CaptureConfig::from_json(data) {
        assert!(config.validate().is_ok());
        assert!(config.wake_interval_ms > 0);
        assert!((1..=100).contains(&config.jpeg_quality));
    }
});

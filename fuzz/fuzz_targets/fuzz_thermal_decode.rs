//! Fuzz target: `codec::thermal::decode`
//!
//! Feeds arbitrary bytes to the thermal file reader and checks that every
//! accepted file survives a trip through °C and back.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Odd lengths are rejected, even lengths accepted
//! - `to_word(from_word(w))` is `w`, or one step toward zero where the
//!   f32 product lands just under the whole hundredth and is truncated
//!
//! cargo fuzz run fuzz_thermal_decode

#![no_main]

use fircam::codec::thermal::{self, from_word, to_word};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    match thermal::decode(data) {
        Ok(words) => {
            assert_eq!(words.len() * 2, data.len());
            for (i, &w) in words.iter().enumerate() {
                let word = w as u16;
                let back = i32::from(to_word(from_word(word)) as i16);
                let w = i32::from(w);
                assert!(back == w || back == w - w.signum(), "sample {i}: {w} -> {back}");
                assert_eq!(word.to_le_bytes(), [data[2 * i], data[2 * i + 1]]);
            }
        }
        Err(_) => assert_eq!(data.len() % 2, 1, "even-length input rejected"),
    }
});

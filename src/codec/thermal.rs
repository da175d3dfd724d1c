//! Raw thermal file format.
//!
//! One 2-byte little-endian word per object-temperature sample, in sensor
//! order, no header.  Each word holds the temperature in hundredths of a
//! degree Celsius (fixed point, two decimal digits), stored as the low 16
//! bits of the two's complement value so negative temperatures read back
//! as `i16`.

use crate::error::EncodeError;
use crate::frame::ThermalFrame;

/// Fixed-point scale: 1 LSB = 0.01 °C.
pub const SCALE: f32 = 100.0;

/// Bytes per encoded sample.
pub const SAMPLE_BYTES: usize = 2;

/// Convert one temperature to its on-disk word.
///
/// Truncates toward zero, so 36.789 °C is stored as 3678.  Values outside
/// the 16-bit range wrap, and NaN encodes as 0.
pub fn to_word(celsius: f32) -> u16 {
    let scaled = (celsius * SCALE).trunc() as i32;
    scaled as u16
}

/// Interpret an on-disk word as °C.
pub fn from_word(word: u16) -> f32 {
    f32::from(word as i16) / SCALE
}

/// Serialise the object-temperature array of a frame.
pub fn encode(frame: &ThermalFrame) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.len() * SAMPLE_BYTES);
    for &t in &frame.pixels_c {
        out.extend_from_slice(&to_word(t).to_le_bytes());
    }
    out
}

/// Read a thermal file back into signed hundredths of a degree.
pub fn decode(bytes: &[u8]) -> Result<Vec<i16>, EncodeError> {
    if bytes.len() % SAMPLE_BYTES != 0 {
        return Err(EncodeError::OddLength);
    }
    Ok(bytes
        .chunks_exact(SAMPLE_BYTES)
        .map(|c| i16::from_le_bytes([c[0], c[1]]))
        .collect())
}

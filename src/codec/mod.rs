//! On-disk encodings for the two halves of a capture.
//!
//! | Codec     | Input           | Output                              |
//! |-----------|-----------------|-------------------------------------|
//! | `jpeg`    | `VisibleFrame`  | baseline JPEG (`rgb_*.jpg`)         |
//! | `thermal` | `ThermalFrame`  | raw LE 16-bit samples (`thermal_*.bin`) |

pub mod jpeg;
pub mod thermal;

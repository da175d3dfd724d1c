//! Per-cycle frame types.
//!
//! Neither frame outlives a capture cycle: the service acquires both,
//! persists them, and lets them go before the next wake.

use crate::error::CameraError;

/// Resolution of the AMG8833 Grid-EYE array (8 × 8).
pub const AMG8833_PIXELS: usize = 64;

// ───────────────────────────────────────────────────────────────
// Visible frame
// ───────────────────────────────────────────────────────────────

/// A 2D RGB565 pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleFrame {
    width: u32,
    height: u32,
    pixels: Vec<u16>,
}

impl VisibleFrame {
    /// Wrap an existing pixel buffer.  Fails if the buffer length does not
    /// match the geometry.
    pub fn new(width: u32, height: u32, pixels: Vec<u16>) -> Result<Self, CameraError> {
        if pixels.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(CameraError::GeometryMismatch);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a frame by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u16) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u16] {
        &self.pixels
    }

    /// Expand to packed RGB888 (3 bytes per pixel) for the JPEG encoder.
    pub fn to_rgb888(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &px in &self.pixels {
            out.extend_from_slice(&rgb565_to_rgb888(px));
        }
        out
    }
}

/// Expand one RGB565 pixel, replicating high bits into the low bits so
/// full-scale channels map to 255.
pub const fn rgb565_to_rgb888(px: u16) -> [u8; 3] {
    let r5 = ((px >> 11) & 0x1F) as u8;
    let g6 = ((px >> 5) & 0x3F) as u8;
    let b5 = (px & 0x1F) as u8;
    [
        (r5 << 3) | (r5 >> 2),
        (g6 << 2) | (g6 >> 4),
        (b5 << 3) | (b5 >> 2),
    ]
}

/// Pack an RGB888 colour into RGB565.
pub const fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

// ───────────────────────────────────────────────────────────────
// Thermal frame
// ───────────────────────────────────────────────────────────────

/// One far-infrared reading: ambient temperature plus the per-pixel object
/// temperatures in sensor order, all in °C.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalFrame {
    /// Ambient (sensor die) temperature.
    pub ambient_c: f32,
    /// Object temperature per pixel, row-major.
    pub pixels_c: Vec<f32>,
    pub min_c: f32,
    pub max_c: f32,
}

impl ThermalFrame {
    /// Build a frame, deriving `min_c`/`max_c` from the pixel data.
    /// An empty pixel array yields `min_c == max_c == ambient_c`.
    pub fn from_pixels(ambient_c: f32, pixels_c: Vec<f32>) -> Self {
        let (min_c, max_c) = if pixels_c.is_empty() {
            (ambient_c, ambient_c)
        } else {
            pixels_c
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &t| {
                    (lo.min(t), hi.max(t))
                })
        };
        Self {
            ambient_c,
            pixels_c,
            min_c,
            max_c,
        }
    }

    /// Number of object-temperature samples.
    pub fn len(&self) -> usize {
        self.pixels_c.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels_c.is_empty()
    }
}

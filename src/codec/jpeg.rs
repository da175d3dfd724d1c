//! RGB565 → baseline JPEG.
//!
//! The camera delivers RGB565; the `image` encoder wants packed RGB888, so
//! the frame is expanded once and handed over in a single call.

use image::ColorType;
use image::codecs::jpeg::JpegEncoder;
use log::warn;

use crate::error::EncodeError;
use crate::frame::VisibleFrame;

/// JPEG cannot describe images larger than this on either axis.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Encode a visible frame.  `quality` is clamped to 1–100.
pub fn encode(frame: &VisibleFrame, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (w, h) = (frame.width(), frame.height());
    if w == 0 || h == 0 || w > MAX_DIMENSION || h > MAX_DIMENSION {
        return Err(EncodeError::InvalidDimensions);
    }

    let rgb = frame.to_rgb888();
    // Baseline JPEG of a natural image rarely exceeds one byte per pixel.
    let mut out = Vec::with_capacity(w as usize * h as usize);
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100));
        encoder.encode(&rgb, w, h, ColorType::Rgb8).map_err(|e| {
            warn!("jpeg: encode {}x{} failed: {}", w, h, e);
            EncodeError::JpegFailed
        })?;
    }
    Ok(out)
}

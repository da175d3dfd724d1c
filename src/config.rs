//! Capture configuration parameters
//!
//! Everything the capture loop is allowed to vary.  The defaults are the
//! firmware's built-in constants; an optional `fircam.json` on the storage
//! root may override them.

use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Name of the optional override file in the storage root.
pub const CONFIG_FILE_NAME: &str = "fircam.json";

/// Camera pixel formats the loop can store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 16 bits per pixel, 5-6-5.
    Rgb565,
}

/// Visible sensor frame sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameSize {
    /// 160 × 120
    Qqvga,
    /// 320 × 240
    Qvga,
    /// 640 × 480
    Vga,
    /// 1600 × 1200
    Uxga,
    /// 2592 × 1944 (full 5 MP sensor)
    Wqxga2,
}

impl FrameSize {
    /// `(width, height)` in pixels.
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Qqvga => (160, 120),
            Self::Qvga => (320, 240),
            Self::Vga => (640, 480),
            Self::Uxga => (1600, 1200),
            Self::Wqxga2 => (2592, 1944),
        }
    }
}

/// One-time camera setup applied at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraSettings {
    pub pixel_format: PixelFormat,
    pub frame_size: FrameSize,
    /// Frames are discarded for this long after reset so exposure settles.
    pub warmup_ms: u32,
    /// Allocate a second frame buffer of the same geometry.
    pub extra_framebuffer: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pixel_format: PixelFormat::Rgb565,
            frame_size: FrameSize::Wqxga2,
            warmup_ms: 2000,
            extra_framebuffer: true,
        }
    }
}

/// Resampling filter for the thermal overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleFilter {
    Nearest,
    Bilinear,
    Bicubic,
}

/// How a thermal overlay would be drawn onto the visible frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingHint {
    pub filter: ScaleFilter,
    pub center: bool,
    pub scale_aspect_keep: bool,
}

impl Default for DrawingHint {
    fn default() -> Self {
        Self {
            filter: ScaleFilter::Bicubic,
            center: true,
            scale_aspect_keep: true,
        }
    }
}

/// Core capture configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    // --- Timing ---
    /// Delay between thermal sensor init and the snapshot (milliseconds)
    pub settle_ms: u32,
    /// Deep-sleep duration between captures (milliseconds)
    pub wake_interval_ms: u32,

    // --- Encoding ---
    /// JPEG quality for the visible frame (1-100)
    pub jpeg_quality: u8,

    // --- Camera ---
    pub camera: CameraSettings,

    // --- Overlay (stored, not used by the capture loop) ---
    pub drawing_hint: DrawingHint,
    /// Allocate a second IR image for overlay rendering.
    pub alt_overlay: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            settle_ms: 3000,
            wake_interval_ms: 10_000,

            jpeg_quality: 90,

            camera: CameraSettings::default(),

            drawing_hint: DrawingHint::default(),
            alt_overlay: false,
        }
    }
}

/// Errors from loading or validating a [`CaptureConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The override file could not be read.
    IoError,
    /// The override file is not valid JSON for this schema.
    Corrupted,
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IoError => write!(f, "I/O error"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::IoError => Self::Config("I/O error"),
            ConfigError::Corrupted => Self::Config("config corrupted"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

impl CaptureConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wake_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("wake_interval_ms must be > 0"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::ValidationFailed("jpeg_quality must be 1-100"));
        }
        let (w, h) = self.camera.frame_size.dimensions();
        if w > crate::codec::jpeg::MAX_DIMENSION || h > crate::codec::jpeg::MAX_DIMENSION {
            return Err(ConfigError::ValidationFailed("frame_size exceeds JPEG limits"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}

/// Read the override file at `path`.
///
/// `Ok(None)` when no file exists.  A file that exists but cannot be read
/// is [`ConfigError::IoError`]; an unparsable or out-of-range one is
/// [`ConfigError::Corrupted`] or [`ConfigError::ValidationFailed`].
pub fn load(path: &Path) -> Result<Option<CaptureConfig>, ConfigError> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            debug!("config: read {} failed: {}", path.display(), e);
            return Err(ConfigError::IoError);
        }
    };
    CaptureConfig::from_json(&bytes).map(Some)
}

/// Load `path` if it exists, otherwise the defaults.
///
/// A missing file is the normal case and is silent.  An unreadable, corrupt,
/// or invalid file is logged and also falls back to the defaults, so a bad
/// override can never stop the camera from capturing.
pub fn load_or_default(path: &Path) -> CaptureConfig {
    match load(path) {
        Ok(Some(cfg)) => {
            info!("config: loaded overrides from {}", path.display());
            cfg
        }
        Ok(None) => CaptureConfig::default(),
        Err(e) => {
            warn!("config: {} rejected ({}), using defaults", path.display(), e);
            CaptureConfig::default()
        }
    }
}

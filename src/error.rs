//! Unified error types for the fircam firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! capture loop's error handling uniform.  All variants are `Copy` so they
//! can be passed through events and logs without allocation.
//!
//! Only [`ThermalError::Io`] is recoverable: the capture loop skips the
//! current cycle on it.  Everything else surfaces from
//! [`CaptureService::run_cycle`](crate::app::service::CaptureService::run_cycle)
//! and is fatal to the firmware image.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The visible-light camera failed.
    Camera(CameraError),
    /// The far-infrared sensor failed or was misused.
    Thermal(ThermalError),
    /// A capture file could not be persisted.
    Storage(StorageError),
    /// A frame could not be encoded for storage.
    Encode(EncodeError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera(e) => write!(f, "camera: {e}"),
            Self::Thermal(e) => write!(f, "thermal: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Encode(e) => write!(f, "encode: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Camera errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    /// `snapshot` was called before `configure`.
    NotConfigured,
    /// The sensor driver refused the requested format or frame size.
    UnsupportedSetting,
    /// Driver initialisation returned an error code.
    InitFailed(i32),
    /// No frame buffer could be obtained from the driver.
    CaptureFailed,
    /// A frame buffer could not be allocated.
    BufferAllocFailed,
    /// Pixel data length does not match `width × height`.
    GeometryMismatch,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "camera not configured"),
            Self::UnsupportedSetting => write!(f, "unsupported camera setting"),
            Self::InitFailed(rc) => write!(f, "camera init failed (rc={rc})"),
            Self::CaptureFailed => write!(f, "frame capture failed"),
            Self::BufferAllocFailed => write!(f, "frame buffer allocation failed"),
            Self::GeometryMismatch => write!(f, "pixel count does not match geometry"),
        }
    }
}

impl From<CameraError> for Error {
    fn from(e: CameraError) -> Self {
        Self::Camera(e)
    }
}

// ---------------------------------------------------------------------------
// Thermal (FIR) errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermalError {
    /// Bus transfer with the sensor failed.  The capture loop treats this as
    /// "skip this cycle".
    Io,
    /// The sensor was read before `init` (driver misuse).
    NotInitialised,
}

impl fmt::Display for ThermalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "sensor I/O error"),
            Self::NotInitialised => write!(f, "sensor not initialised"),
        }
    }
}

impl From<ThermalError> for Error {
    fn from(e: ThermalError) -> Self {
        Self::Thermal(e)
    }
}

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The storage medium could not be mounted or the root created.
    MountFailed,
    /// The medium is full.
    Full,
    /// File name is empty or escapes the storage root.
    InvalidName,
    /// Generic I/O error.
    IoError,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MountFailed => write!(f, "mount failed"),
            Self::Full => write!(f, "storage full"),
            Self::InvalidName => write!(f, "invalid file name"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

// ---------------------------------------------------------------------------
// Encode errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// Frame has a zero or out-of-range dimension.
    InvalidDimensions,
    /// The JPEG encoder reported a failure.
    JpegFailed,
    /// Thermal payload length is not a whole number of samples.
    OddLength,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions => write!(f, "invalid frame dimensions"),
            Self::JpegFailed => write!(f, "JPEG encoding failed"),
            Self::OddLength => write!(f, "payload length is not a multiple of 2"),
        }
    }
}

impl From<EncodeError> for Error {
    fn from(e: EncodeError) -> Self {
        Self::Encode(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

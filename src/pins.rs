//! GPIO / peripheral pin assignments for the ESP32-S3-EYE camera board.
//!
//! Single source of truth: the camera driver and `main()` reference this
//! module rather than hard-coding pin numbers.
//!
//! `-1` means "not connected" (the esp32-camera convention).

// ---------------------------------------------------------------------------
// Camera (DVP parallel interface, OV2640 / OV5640 module)
// ---------------------------------------------------------------------------

/// Power-down line.  Not routed on this board.
pub const CAM_PWDN_GPIO: i32 = -1;
/// Hardware reset line.  Not routed; the driver uses a soft reset.
pub const CAM_RESET_GPIO: i32 = -1;
/// Master clock output to the sensor.
pub const CAM_XCLK_GPIO: i32 = 15;
/// SCCB (camera control bus) data.
pub const CAM_SIOD_GPIO: i32 = 4;
/// SCCB clock.
pub const CAM_SIOC_GPIO: i32 = 5;

/// Parallel data lines D0 (LSB) .. D7 (MSB).
pub const CAM_DATA_GPIO: [i32; 8] = [11, 9, 8, 10, 12, 18, 17, 16];

pub const CAM_VSYNC_GPIO: i32 = 6;
pub const CAM_HREF_GPIO: i32 = 7;
pub const CAM_PCLK_GPIO: i32 = 13;

/// XCLK frequency.  20 MHz is the highest the OV sensors run reliably at
/// on the S3 with PSRAM frame buffers.
pub const CAM_XCLK_FREQ_HZ: i32 = 20_000_000;

// ---------------------------------------------------------------------------
// Far-infrared array (AMG8833 on I²C0)
// ---------------------------------------------------------------------------

pub const FIR_I2C_SDA_GPIO: i32 = 1;
pub const FIR_I2C_SCL_GPIO: i32 = 2;
/// AMG8833 supports 100 kHz and 400 kHz.
pub const FIR_I2C_FREQ_HZ: u32 = 400_000;

//! Panasonic AMG8833 (Grid-EYE) 8×8 far-infrared array driver.
//!
//! Generic over any [`embedded_hal::i2c::I2c`] bus: the ESP-IDF I2C driver
//! on hardware, [`SimAmg8833Bus`](super::sim_bus::SimAmg8833Bus) on host.
//!
//! ## Register map (subset)
//!
//! | Reg  | Name | Use                                             |
//! |------|------|-------------------------------------------------|
//! | 0x00 | PCTL | power control: 0x00 normal, 0x10 sleep          |
//! | 0x01 | RST  | 0x3F initial reset                              |
//! | 0x02 | FPSC | 0x00 = 10 FPS                                   |
//! | 0x0E | TTHL | thermistor, 12-bit sign-magnitude, 0.0625 °C    |
//! | 0x80 | T01L | 64 pixels × 2 bytes, 12-bit two's complement, 0.25 °C |

use embedded_hal::i2c::{Error as _, I2c};
use log::debug;

use crate::error::ThermalError;
use crate::frame::{AMG8833_PIXELS, ThermalFrame};

/// Default 7-bit address (AD_SELECT tied high).
pub const DEFAULT_ADDRESS: u8 = 0x69;
/// Alternate 7-bit address (AD_SELECT tied low).
pub const ALT_ADDRESS: u8 = 0x68;

pub(crate) const REG_PCTL: u8 = 0x00;
pub(crate) const REG_RST: u8 = 0x01;
pub(crate) const REG_FPSC: u8 = 0x02;
pub(crate) const REG_TTHL: u8 = 0x0E;
pub(crate) const REG_PIXEL_BASE: u8 = 0x80;

pub(crate) const PCTL_NORMAL: u8 = 0x00;
pub(crate) const PCTL_SLEEP: u8 = 0x10;
pub(crate) const RST_INITIAL: u8 = 0x3F;
pub(crate) const FPSC_10FPS: u8 = 0x00;

const THERMISTOR_LSB_C: f32 = 0.0625;
const PIXEL_LSB_C: f32 = 0.25;

pub struct Amg8833<I2C> {
    i2c: I2C,
    address: u8,
    initialised: bool,
}

impl<I2C: I2c> Amg8833<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            initialised: false,
        }
    }

    /// Normal mode, initial reset, 10 FPS.
    pub fn init(&mut self) -> Result<(), ThermalError> {
        self.write_reg(REG_PCTL, PCTL_NORMAL)?;
        self.write_reg(REG_RST, RST_INITIAL)?;
        self.write_reg(REG_FPSC, FPSC_10FPS)?;
        self.initialised = true;
        Ok(())
    }

    /// Sleep mode.  A later [`read_frame`](Self::read_frame) needs a new init.
    pub fn deinit(&mut self) -> Result<(), ThermalError> {
        self.initialised = false;
        self.write_reg(REG_PCTL, PCTL_SLEEP)
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// Read thermistor and all 64 pixels.
    pub fn read_frame(&mut self) -> Result<ThermalFrame, ThermalError> {
        if !self.initialised {
            return Err(ThermalError::NotInitialised);
        }

        let mut tth = [0u8; 2];
        self.read_regs(REG_TTHL, &mut tth)?;
        let ambient_c = thermistor_to_celsius(u16::from_le_bytes(tth));

        let mut raw = [0u8; AMG8833_PIXELS * 2];
        self.read_regs(REG_PIXEL_BASE, &mut raw)?;
        let pixels_c = raw
            .chunks_exact(2)
            .map(|c| pixel_to_celsius(u16::from_le_bytes([c[0], c[1]])))
            .collect();

        Ok(ThermalFrame::from_pixels(ambient_c, pixels_c))
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), ThermalError> {
        self.i2c.write(self.address, &[reg, value]).map_err(|e| {
            debug!("amg8833: write 0x{:02x} failed: {:?}", reg, e.kind());
            ThermalError::Io
        })
    }

    fn read_regs(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), ThermalError> {
        self.i2c.write_read(self.address, &[reg], buf).map_err(|e| {
            debug!("amg8833: read 0x{:02x} failed: {:?}", reg, e.kind());
            ThermalError::Io
        })
    }
}

/// 12-bit sign-magnitude thermistor word → °C.
pub fn thermistor_to_celsius(raw: u16) -> f32 {
    let magnitude = f32::from(raw & 0x07FF) * THERMISTOR_LSB_C;
    if raw & 0x0800 != 0 { -magnitude } else { magnitude }
}

/// 12-bit two's complement pixel word → °C.
pub fn pixel_to_celsius(raw: u16) -> f32 {
    let signed = ((raw << 4) as i16) >> 4;
    f32::from(signed) * PIXEL_LSB_C
}

/// Inverse of [`pixel_to_celsius`], used by the simulated bus and tests.
pub fn celsius_to_pixel(celsius: f32) -> u16 {
    let counts = (celsius / PIXEL_LSB_C).round().clamp(-2048.0, 2047.0) as i16;
    (counts as u16) & 0x0FFF
}

/// Inverse of [`thermistor_to_celsius`].
pub fn celsius_to_thermistor(celsius: f32) -> u16 {
    let magnitude = (celsius.abs() / THERMISTOR_LSB_C).round().min(2047.0) as u16;
    if celsius < 0.0 { magnitude | 0x0800 } else { magnitude }
}

//! Simulated AMG8833 on a host I2C bus.
//!
//! Emulates the register file closely enough for the real driver: a
//! register pointer set by the first written byte, auto-increment on
//! reads and writes, sleep mode that zeroes the pixel registers.  The scene
//! is a warm blob on a room-temperature background that drifts by a quarter
//! degree per frame.
//!
//! Bus faults are injected through a [`SimFaults`] handle so tests can
//! exercise the skip path after the bus has moved into the driver.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use super::amg8833::{
    DEFAULT_ADDRESS, PCTL_NORMAL, PCTL_SLEEP, REG_PCTL, REG_PIXEL_BASE, REG_TTHL,
    celsius_to_pixel, celsius_to_thermistor,
};

const AMBIENT_C: f32 = 24.5;
const BACKGROUND_C: f32 = 22.0;
const BLOB_PEAK_C: f32 = 34.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimBusError;

impl embedded_hal::i2c::Error for SimBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

/// Shared handle for injecting bus faults into a [`SimAmg8833Bus`].
#[derive(Debug, Clone, Default)]
pub struct SimFaults(Arc<AtomicU32>);

impl SimFaults {
    /// Make the next `n` read transactions NAK.
    pub fn fail_next_reads(&self, n: u32) {
        self.0.store(n, Ordering::Relaxed);
    }

    /// Consume one pending fault, if any.
    fn take(&self) -> bool {
        self.0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }
}

pub struct SimAmg8833Bus {
    regs: [u8; 256],
    ptr: u8,
    frame: u32,
    faults: SimFaults,
}

impl Default for SimAmg8833Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimAmg8833Bus {
    pub fn new() -> Self {
        Self {
            regs: [0; 256],
            ptr: 0,
            frame: 0,
            faults: SimFaults::default(),
        }
    }

    pub fn faults(&self) -> SimFaults {
        self.faults.clone()
    }

    /// Synthesise the next frame into the pixel and thermistor registers.
    fn render(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        let drift = (self.frame % 8) as f32 * 0.25;

        let tth = celsius_to_thermistor(AMBIENT_C).to_le_bytes();
        self.regs[REG_TTHL as usize] = tth[0];
        self.regs[REG_TTHL as usize + 1] = tth[1];

        for i in 0..64usize {
            let (x, y) = ((i % 8) as f32, (i / 8) as f32);
            let d2 = (x - 3.5) * (x - 3.5) + (y - 3.5) * (y - 3.5);
            let t = BACKGROUND_C + (BLOB_PEAK_C - BACKGROUND_C) * (-d2 / 6.0).exp() + drift;
            let word = celsius_to_pixel(t).to_le_bytes();
            let reg = REG_PIXEL_BASE as usize + i * 2;
            self.regs[reg] = word[0];
            self.regs[reg + 1] = word[1];
        }
    }

    fn sleep(&mut self) {
        self.regs[REG_PIXEL_BASE as usize..].fill(0);
    }
}

impl ErrorType for SimAmg8833Bus {
    type Error = SimBusError;
}

impl I2c for SimAmg8833Bus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != DEFAULT_ADDRESS {
            return Err(SimBusError);
        }
        let reads = operations
            .iter()
            .any(|op| matches!(op, Operation::Read(_)));
        if reads && self.faults.take() {
            return Err(SimBusError);
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let Some((&reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.ptr = reg;
                    for &b in data {
                        self.regs[self.ptr as usize] = b;
                        if self.ptr == REG_PCTL && b == PCTL_SLEEP {
                            self.sleep();
                        }
                        self.ptr = self.ptr.wrapping_add(1);
                    }
                }
                Operation::Read(buf) => {
                    if self.ptr == REG_TTHL && self.regs[REG_PCTL as usize] == PCTL_NORMAL {
                        self.render();
                    }
                    for b in buf.iter_mut() {
                        *b = self.regs[self.ptr as usize];
                        self.ptr = self.ptr.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

//! Sensor drivers.
//!
//! The far-infrared array is the only sensor on the board.  Its driver is
//! bus-generic; the host build pairs it with a simulated device so the
//! full capture path runs without hardware.

pub mod amg8833;
#[cfg(not(target_os = "espidf"))]
pub mod sim_bus;

//! Peripheral drivers that are not behind a generic bus trait.

pub mod camera;

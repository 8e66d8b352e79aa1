//! Synthetic demo measurements.

pub mod synthetic;

pub use synthetic::*;

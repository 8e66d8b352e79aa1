//! Formatted terminal output for fit runs and batch tasks.

pub mod format;

pub use format::*;

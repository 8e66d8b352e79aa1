//! Rendering instructions: figures, series, and curve sampling.

pub mod figure;

pub use figure::*;

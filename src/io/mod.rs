//! Input/output helpers.
//!
//! - request JSON loading (`input`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod input;

pub use export::*;
pub use input::*;

//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the experiment request union (`ExperimentRequest` and its payloads)
//! - raw measurement containers (`MeasurementSeries`)
//! - fit outputs (`FitResult`, `DerivedQuantity`, `ExperimentOutput`)

pub mod request;
pub mod types;

pub use request::*;
pub use types::*;

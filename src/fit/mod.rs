//! Per-experiment fitting.
//!
//! Responsibilities:
//!
//! - validate each payload's shape invariants before any arithmetic
//! - run the family's fits (OLS, origin-forced, spline, trend)
//! - attach derived physical quantities and renderer figures
//!
//! Each experiment family is a pure function from a validated payload to
//! an [`ExperimentOutput`]; families share only the math primitives and
//! the helpers in [`validate`] and [`derive`]. Dispatch over the request
//! union is a plain match, not dynamic dispatch.

pub mod derive;
pub mod franck_hertz;
pub mod mechanics;
pub mod millikan;
pub mod optics;
pub mod photo_devices;
pub mod solar;
pub mod thermal;
pub mod ultrasound;
pub mod validate;

use crate::domain::{ExperimentOutput, ExperimentRequest};
use crate::error::FitError;

/// A fit request that can produce a complete output.
pub trait Fittable {
    /// Validate, fit, and derive in one pass. Pure: no I/O, no shared
    /// state, same output for the same payload.
    fn fit(&self) -> Result<ExperimentOutput, FitError>;
}

/// Run the fit for any request variant.
pub fn fit_request(request: &ExperimentRequest) -> Result<ExperimentOutput, FitError> {
    match request {
        ExperimentRequest::Fiber(payload) => payload.fit(),
        ExperimentRequest::FranckHertz(payload) => payload.fit(),
        ExperimentRequest::Millikan(payload) => payload.fit(),
        ExperimentRequest::Mechanics(payload) => payload.fit(),
        ExperimentRequest::Thermal(payload) => payload.fit(),
        ExperimentRequest::PhotoDevices(payload) => payload.fit(),
        ExperimentRequest::SolarCell(payload) => payload.fit(),
        ExperimentRequest::Ultrasound(payload) => payload.fit(),
    }
}

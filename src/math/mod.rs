//! Mathematical primitives: statistics, least squares, splines, trends.

pub mod nonlinear;
pub mod polyfit;
pub mod spline;
pub mod stats;

pub use nonlinear::*;
pub use polyfit::*;
pub use spline::*;
pub use stats::*;

//! Derived physical quantities.
//!
//! Each helper encodes one lab-sheet formula together with its
//! division-by-zero policy. The zero sentinels are contractual: a
//! non-physical fit (zero or wrong-signed slope) must still yield a
//! drawable result with zeroed derived values, not an error.

use std::f64::consts::PI;

/// Reference elementary charge in units of 1e-19 C, quoted next to the
/// Millikan estimate.
pub const ELEMENTARY_CHARGE_E19: f64 = 1.6022;

/// Standard gravitational acceleration (m/s²) quoted in the kinematics
/// annotations.
pub const STANDARD_GRAVITY: f64 = 9.8;

/// Spring stiffness from the T²-M slope: `k = 4π²/slope`, `0.0` when the
/// slope is exactly zero.
pub fn stiffness_from_slope(slope: f64) -> f64 {
    if slope != 0.0 { 4.0 * PI * PI / slope } else { 0.0 }
}

/// Angular frequency from the v²-x² slope: `ω = √(−slope)` for negative
/// slopes, `0.0` otherwise. A non-oscillatory fit is not an error.
pub fn omega_from_slope(slope: f64) -> f64 {
    if slope < 0.0 { (-slope).sqrt() } else { 0.0 }
}

/// Oscillation period from angular frequency: `T = 2π/ω`, `0.0` when ω
/// is zero.
pub fn period_from_omega(omega: f64) -> f64 {
    if omega > 0.0 { 2.0 * PI / omega } else { 0.0 }
}

/// X-intercept `−b/a` of a fitted line, `0.0` when the slope is zero.
///
/// Used for the laser-diode threshold current, where the lasing line
/// crosses the current axis.
pub fn x_intercept(slope: f64, intercept: f64) -> f64 {
    if slope != 0.0 { -intercept / slope } else { 0.0 }
}

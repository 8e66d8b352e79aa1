//! Ordinary least-squares polynomial fitting.
//!
//! Every linear analysis in the project reduces to OLS on a Vandermonde
//! design:
//!
//! ```text
//! minimize Σ (y_i - Σ_j c_j x_i^(d-j))^2
//! ```
//!
//! Implementation choices:
//! - Coefficients come back highest degree first, the classical
//!   polynomial-fit convention, so a degree-1 fit is `[slope, intercept]`.
//! - We use SVD to solve the least-squares problem robustly even when the
//!   design matrix is tall (more rows than columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic
//!   for non-square matrices.)
//! - Degrees stay tiny here (1 or 2), so SVD performance is a non-issue.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Least-squares polynomial fit of the requested degree.
///
/// Needs at least `degree + 1` points; a numerically singular design (for
/// example, every x identical) is reported as `DegenerateInput`.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Result<Vec<f64>, FitError> {
    if x.len() != y.len() {
        return Err(FitError::shape_mismatch("x", x.len(), "y", y.len()));
    }
    let n = x.len();
    let p = degree + 1;
    if n < p {
        return Err(FitError::insufficient("polynomial fit input", n, p));
    }

    let mut design = DMatrix::<f64>::zeros(n, p);
    for (i, &xi) in x.iter().enumerate() {
        // Fill descending powers right-to-left so the solution lands in the
        // conventional coefficient order directly.
        let mut power = 1.0;
        for j in (0..p).rev() {
            design[(i, j)] = power;
            power *= xi;
        }
    }
    let rhs = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &rhs).ok_or_else(|| {
        FitError::degenerate(
            "polynomial fit",
            format!("design matrix is numerically singular (n={n}, degree={degree})"),
        )
    })?;
    Ok(beta.iter().copied().collect())
}

/// Slope/intercept pair from a degree-1 fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Predicted values at each of the given points.
    pub fn predict(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.at(x)).collect()
    }
}

/// Degree-1 least-squares fit.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Result<LineFit, FitError> {
    let coefficients = polyfit(x, y, 1)?;
    Ok(LineFit {
        slope: coefficients[0],
        intercept: coefficients[1],
    })
}

/// Evaluate a polynomial given highest-degree-first coefficients (Horner).
pub fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Linear fit constrained through the origin: minimize `Σ (y_i − k·x_i)²`.
///
/// The closed form is `k = Σ(x·y) / Σ(x²)`. When the denominator is not
/// positive (an all-zero x axis) the slope is reported as `0.0` instead of
/// dividing by zero; callers rely on that sentinel to keep degenerate
/// datasets drawable.
pub fn fit_through_origin(x: &[f64], y: &[f64]) -> Result<f64, FitError> {
    if x.len() != y.len() {
        return Err(FitError::shape_mismatch("x", x.len(), "y", y.len()));
    }
    if x.is_empty() {
        return Err(FitError::insufficient("origin-forced fit input", 0, 1));
    }
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_xx: f64 = x.iter().map(|a| a * a).sum();
    if sum_xx > 0.0 {
        Ok(sum_xy / sum_xx)
    } else {
        Ok(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_fit_recovers_known_line() {
        // y = 2x + 1 on x = [0,1,2,3]
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let line = linear_fit(&x, &y).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-10);
        assert!((line.intercept - 1.0).abs() < 1e-10);
    }

    #[test]
    fn polyfit_recovers_quadratic() {
        // y = x^2 - 2x + 3
        let x = [-2.0, -1.0, 0.0, 1.0, 2.0];
        let y: Vec<f64> = x.iter().map(|&v| v * v - 2.0 * v + 3.0).collect();
        let c = polyfit(&x, &y, 2).unwrap();
        assert!((c[0] - 1.0).abs() < 1e-9);
        assert!((c[1] + 2.0).abs() < 1e-9);
        assert!((c[2] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn polyfit_rejects_too_few_points() {
        let err = polyfit(&[1.0], &[2.0], 1).unwrap_err();
        assert!(matches!(err, FitError::InsufficientData { got: 1, min: 2, .. }));
    }

    #[test]
    fn polyfit_rejects_mismatched_lengths() {
        let err = polyfit(&[1.0, 2.0], &[1.0], 1).unwrap_err();
        assert!(matches!(err, FitError::ShapeMismatch { .. }));
    }

    #[test]
    fn polyval_matches_horner_expansion() {
        // 2x^2 - x + 4 at x = 3 is 19.
        assert!((polyval(&[2.0, -1.0, 4.0], 3.0) - 19.0).abs() < 1e-12);
    }

    #[test]
    fn origin_fit_recovers_proportional_slope() {
        let k = fit_through_origin(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert!((k - 2.0).abs() < 1e-12);
    }

    #[test]
    fn origin_fit_zero_axis_yields_zero_slope() {
        let k = fit_through_origin(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(k, 0.0);
    }

    #[test]
    fn origin_fit_rejects_empty_input() {
        let err = fit_through_origin(&[], &[]).unwrap_err();
        assert!(matches!(err, FitError::InsufficientData { .. }));
    }

    #[test]
    fn line_fit_prediction_matches_r2_one() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let line = linear_fit(&x, &y).unwrap();
        let pred = line.predict(&x);
        let r2 = crate::math::r2_score(&y, &pred);
        assert!((r2 - 1.0).abs() < 1e-12);
    }
}

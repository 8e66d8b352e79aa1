//! Natural cubic spline interpolation.
//!
//! Franck-Hertz plate-current curves are oscillatory, so a global
//! polynomial is a poor fit; instead each group gets an interpolating
//! cubic spline with natural boundary conditions (zero curvature at both
//! ends). The tridiagonal curvature system is solved directly with the
//! Thomas algorithm in O(n).
//!
//! Input points are sorted by x during construction. Duplicate x values
//! make the interpolation problem singular and are rejected as hard
//! errors; the soft zero-denominator recoveries used by the linear fits
//! deliberately do not apply here.

use crate::error::FitError;

/// A natural cubic spline through a set of measurement points.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Second derivative at each knot; zero at both ends by the natural
    /// boundary condition.
    curvature: Vec<f64>,
}

impl CubicSpline {
    /// Build the spline from unordered measurement points.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self, FitError> {
        if x.len() != y.len() {
            return Err(FitError::shape_mismatch("x", x.len(), "y", y.len()));
        }
        let n = x.len();
        if n < 2 {
            return Err(FitError::insufficient("spline input", n, 2));
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| x[a].partial_cmp(&x[b]).unwrap_or(std::cmp::Ordering::Equal));
        let xs: Vec<f64> = order.iter().map(|&i| x[i]).collect();
        let ys: Vec<f64> = order.iter().map(|&i| y[i]).collect();

        for pair in xs.windows(2) {
            if !(pair[1] > pair[0]) {
                return Err(FitError::degenerate(
                    "spline fit",
                    format!("duplicate or non-comparable x value near {}", pair[0]),
                ));
            }
        }

        let curvature = solve_natural_curvatures(&xs, &ys);
        Ok(Self {
            x: xs,
            y: ys,
            curvature,
        })
    }

    /// Evaluate the spline at one point.
    ///
    /// Points outside the knot range extrapolate the boundary cubics.
    pub fn eval(&self, t: f64) -> f64 {
        let n = self.x.len();
        let segment = match self.x.partition_point(|&knot| knot <= t) {
            0 => 0,
            p if p >= n => n - 2,
            p => p - 1,
        };
        let h = self.x[segment + 1] - self.x[segment];
        let a = self.x[segment + 1] - t;
        let b = t - self.x[segment];
        let (m0, m1) = (self.curvature[segment], self.curvature[segment + 1]);
        (m0 * a * a * a + m1 * b * b * b) / (6.0 * h)
            + (self.y[segment] / h - m0 * h / 6.0) * a
            + (self.y[segment + 1] / h - m1 * h / 6.0) * b
    }

    /// Evaluate the spline at each of the given points.
    pub fn eval_many(&self, ts: &[f64]) -> Vec<f64> {
        ts.iter().map(|&t| self.eval(t)).collect()
    }

    /// First and last knot x values.
    pub fn x_range(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }

    /// Second derivative at each knot, in ascending-x order.
    pub fn knot_curvatures(&self) -> &[f64] {
        &self.curvature
    }
}

/// Solve the natural-boundary tridiagonal system for knot curvatures.
///
/// The interior equations are
///
/// ```text
/// h_{i-1} m_{i-1} + 2(h_{i-1}+h_i) m_i + h_i m_{i+1}
///     = 6 ((y_{i+1}-y_i)/h_i - (y_i-y_{i-1})/h_{i-1})
/// ```
///
/// with `m_0 = m_{n-1} = 0`. The matrix is strictly diagonally dominant,
/// so the Thomas sweep needs no pivoting.
fn solve_natural_curvatures(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        // Two knots make a single linear segment.
        return m;
    }

    let k = n - 2;
    let mut diag = vec![0.0; k];
    let mut upper = vec![0.0; k];
    let mut rhs = vec![0.0; k];
    for j in 0..k {
        let i = j + 1;
        let h0 = x[i] - x[i - 1];
        let h1 = x[i + 1] - x[i];
        diag[j] = 2.0 * (h0 + h1);
        upper[j] = h1;
        rhs[j] = 6.0 * ((y[i + 1] - y[i]) / h1 - (y[i] - y[i - 1]) / h0);
    }

    // Forward elimination.
    for j in 1..k {
        let i = j + 1;
        let lower = x[i] - x[i - 1];
        let factor = lower / diag[j - 1];
        diag[j] -= factor * upper[j - 1];
        rhs[j] -= factor * rhs[j - 1];
    }

    // Back substitution; m[k + 1] is the zero boundary value.
    for j in (0..k).rev() {
        m[j + 1] = (rhs[j] - upper[j] * m[j + 2]) / diag[j];
    }
    m
}

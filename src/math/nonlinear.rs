//! Iterative least-squares trend fitting.
//!
//! Two small two-parameter models cover the photometric analyses: linear
//! `y = a·x + b` and logarithmic `y = a·ln(x) + b`. Both are fitted by
//! Gauss-Newton iteration on the residual sum of squares with a fixed
//! iteration budget.
//!
//! Both models are linear in their parameters, so the first step normally
//! lands on the optimum and the second confirms convergence. The budget
//! exists so that pathological inputs (non-finite measurements, overflow)
//! surface as a typed convergence failure instead of looping forever.

use crate::error::FitError;

/// Trend model shapes accepted by [`fit_trend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendModel {
    /// `y = a·x + b`
    Linear,
    /// `y = a·ln(x) + b`; requires strictly positive x.
    Logarithmic,
}

impl TrendModel {
    fn basis(self, x: f64) -> f64 {
        match self {
            TrendModel::Linear => x,
            TrendModel::Logarithmic => x.ln(),
        }
    }

    /// Legend text for a fitted parameter pair.
    pub fn describe(self, a: f64, b: f64) -> String {
        match self {
            TrendModel::Linear => format!("y = {a:.4}·x + {b:.4}"),
            TrendModel::Logarithmic => format!("y = {a:.4}·ln(x) + {b:.4}"),
        }
    }
}

/// Result of a trend fit.
#[derive(Debug, Clone, Copy)]
pub struct TrendFit {
    pub model: TrendModel,
    pub a: f64,
    pub b: f64,
    /// Gauss-Newton iterations actually used.
    pub iterations: usize,
}

impl TrendFit {
    pub fn at(&self, x: f64) -> f64 {
        self.a * self.model.basis(x) + self.b
    }

    /// Predicted values at each of the given points.
    pub fn predict(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.at(x)).collect()
    }
}

/// Iteration budget for [`fit_trend`].
pub const TREND_MAX_ITERS: usize = 50;

/// Relative step size below which the iteration is considered settled.
const STEP_TOL: f64 = 1e-12;

/// Relative Gram-determinant threshold for a solvable step.
const GRAM_TOL: f64 = 1e-12;

/// Fit `y = a·g(x) + b` by Gauss-Newton iteration.
///
/// Returns `Domain` for logarithmic fits over non-positive x,
/// `DegenerateInput` when the two basis columns are indistinguishable
/// (constant x), and `Convergence` when the iteration budget runs out or a
/// step goes non-finite.
pub fn fit_trend(x: &[f64], y: &[f64], model: TrendModel) -> Result<TrendFit, FitError> {
    if x.len() != y.len() {
        return Err(FitError::shape_mismatch("x", x.len(), "y", y.len()));
    }
    if x.len() < 2 {
        return Err(FitError::insufficient("trend fit input", x.len(), 2));
    }
    if model == TrendModel::Logarithmic {
        if let Some(bad) = x.iter().find(|v| **v <= 0.0) {
            return Err(FitError::domain(
                "logarithmic trend fit",
                format!("x must be strictly positive, got {bad}"),
            ));
        }
    }

    let n = x.len() as f64;
    let g: Vec<f64> = x.iter().map(|&v| model.basis(v)).collect();

    // The Jacobian is constant (∂f/∂a = g(x), ∂f/∂b = 1), so the 2×2
    // normal-equation matrix is shared by every step.
    let sum_gg: f64 = g.iter().map(|v| v * v).sum();
    let sum_g: f64 = g.iter().sum();
    let det = sum_gg * n - sum_g * sum_g;
    if !det.is_finite() {
        return Err(FitError::degenerate(
            "trend fit",
            "normal equations are not finite".to_string(),
        ));
    }
    if det.abs() <= GRAM_TOL * sum_gg.max(1.0) * n {
        return Err(FitError::degenerate(
            "trend fit",
            "basis columns are collinear (constant x axis)".to_string(),
        ));
    }

    let mut a = 0.0;
    let mut b = 0.0;
    for iteration in 1..=TREND_MAX_ITERS {
        let mut residual_g = 0.0;
        let mut residual_sum = 0.0;
        for (gi, yi) in g.iter().zip(y) {
            let r = yi - (a * gi + b);
            residual_g += r * gi;
            residual_sum += r;
        }
        // Cramer's rule on the normal equations.
        let da = (residual_g * n - residual_sum * sum_g) / det;
        let db = (sum_gg * residual_sum - sum_g * residual_g) / det;
        a += da;
        b += db;

        let step = (da * da + db * db).sqrt();
        if !step.is_finite() {
            return Err(FitError::convergence("trend fit", iteration));
        }
        if step <= STEP_TOL * (1.0 + (a * a + b * b).sqrt()) {
            return Ok(TrendFit {
                model,
                a,
                b,
                iterations: iteration,
            });
        }
    }

    Err(FitError::convergence("trend fit", TREND_MAX_ITERS))
}

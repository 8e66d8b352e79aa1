//! Goodness-of-fit statistics.
//!
//! Every fitted curve in the project reports the coefficient of
//! determination R². One convention matters enough to call out here: a
//! constant observation series has zero total variance, and `r2_score`
//! returns `0.0` for it instead of dividing by zero. Annotation text and
//! exports rely on always getting a finite number back.

/// Coefficient of determination `1 − SS_res / SS_tot`.
///
/// Returns `0.0` when the total sum of squares is not positive (constant
/// or empty `y_true`), never NaN. Values below zero are possible when the
/// model is worse than the mean and are reported as-is, not clamped.
///
/// Both slices must be equally long; the fit layer validates every pair
/// before predictions exist.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    debug_assert_eq!(y_true.len(), y_pred.len());
    if y_true.is_empty() {
        return 0.0;
    }
    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (yt, yp) in y_true.iter().zip(y_pred) {
        ss_res += (yt - yp) * (yt - yp);
        ss_tot += (yt - mean) * (yt - mean);
    }
    if ss_tot > 0.0 {
        1.0 - ss_res / ss_tot
    } else {
        0.0
    }
}

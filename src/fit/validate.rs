//! Shape validation shared by every experiment fit.
//!
//! Each fit function is the trust boundary for its own payload: before any
//! arithmetic runs it checks emptiness, pairwise lengths, and value
//! domains, and fails fast with a typed error naming the offending series.
//! Nothing downstream truncates or pads silently.

use crate::error::FitError;

/// Reject a series whose length differs from its index axis.
pub fn ensure_paired(
    axis_name: &str,
    axis: &[f64],
    series_name: &str,
    series: &[f64],
) -> Result<(), FitError> {
    if axis.len() != series.len() {
        return Err(FitError::shape_mismatch(
            axis_name,
            axis.len(),
            series_name,
            series.len(),
        ));
    }
    Ok(())
}

/// Reject an empty series.
pub fn ensure_non_empty(name: &str, values: &[f64]) -> Result<(), FitError> {
    if values.is_empty() {
        return Err(FitError::insufficient(name, 0, 1));
    }
    Ok(())
}

/// Reject a series with fewer than `min` points.
pub fn ensure_min_len(name: &str, values: &[f64], min: usize) -> Result<(), FitError> {
    if values.len() < min {
        return Err(FitError::insufficient(name, values.len(), min));
    }
    Ok(())
}

/// Reject non-positive values where a logarithmic model applies.
pub fn ensure_positive(name: &str, values: &[f64]) -> Result<(), FitError> {
    if let Some(bad) = values.iter().find(|v| **v <= 0.0) {
        return Err(FitError::domain(
            name.to_string(),
            format!("all values must be strictly positive, found {bad}"),
        ));
    }
    Ok(())
}

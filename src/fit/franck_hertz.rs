//! Franck-Hertz plate-current curves.
//!
//! Each retarding-voltage group gets its own natural-spline fit over the
//! shared accelerating-voltage axis, a densely sampled curve for the
//! renderer, and an R² computed by re-evaluating the spline at the raw
//! measurement points. Groups are independent, so they are fitted in
//! parallel.

use rayon::prelude::*;

use crate::domain::{ExperimentKind, ExperimentOutput, FitResult, FranckHertzRequest, MeasurementSeries};
use crate::error::FitError;
use crate::fit::Fittable;
use crate::fit::validate::{ensure_non_empty, ensure_paired};
use crate::math::{CubicSpline, r2_score};
use crate::render::{Figure, SeriesSpec, linspace};

/// Accelerating-voltage axis used when the request does not supply one:
/// integer volts `1..=82`, the bench's standard sweep programme.
pub fn default_axis() -> Vec<f64> {
    (1..=82).map(f64::from).collect()
}

impl Fittable for FranckHertzRequest {
    fn fit(&self) -> Result<ExperimentOutput, FitError> {
        if self.groups.is_empty() {
            return Err(FitError::insufficient("plate-current groups", 0, 1));
        }
        let axis = match &self.accelerating_voltage {
            Some(values) => {
                ensure_non_empty("accelerating voltage", values)?;
                values.clone()
            }
            None => default_axis(),
        };
        let resolution = self.resolution.max(2);

        let per_group = self
            .groups
            .par_iter()
            .enumerate()
            .map(|(index, group)| fit_group(index, group, &axis, resolution))
            .collect::<Result<Vec<_>, FitError>>()?;

        let (fits, figures) = per_group.into_iter().unzip();
        Ok(ExperimentOutput {
            kind: ExperimentKind::FranckHertz,
            fits,
            figures,
        })
    }
}

fn fit_group(
    index: usize,
    group: &MeasurementSeries,
    axis: &[f64],
    resolution: usize,
) -> Result<(FitResult, Figure), FitError> {
    ensure_paired("accelerating voltage", axis, &group.label, &group.values)?;

    let spline = CubicSpline::fit(axis, &group.values)?;
    let at_knots = spline.eval_many(axis);
    let r2 = r2_score(&group.values, &at_knots);

    let (lo, hi) = spline.x_range();
    let x_dense = linspace(lo, hi, resolution);
    let y_dense = spline.eval_many(&x_dense);

    let fit = FitResult {
        label: format!("group {} spline", index + 1),
        coefficients: spline.knot_curvatures().to_vec(),
        r_squared: r2,
        derived: Vec::new(),
    };
    let figure = Figure {
        title: format!("Franck-Hertz I-VG2K curve, group {} ({})", index + 1, group.label),
        x_label: "Accelerating voltage VG2K (V)".to_string(),
        y_label: "Plate current I (μA)".to_string(),
        series: vec![
            SeriesSpec::scatter("measured points", axis.to_vec(), group.values.clone()),
            SeriesSpec::line(format!("cubic spline fit, R² = {r2:.4}"), x_dense, y_dense),
        ],
        annotation: None,
    };
    Ok((fit, figure))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seesaw(axis: &[f64]) -> Vec<f64> {
        axis.iter()
            .map(|&v| 0.2 * v + 1.5 * (v / 4.9 * std::f64::consts::TAU).sin())
            .collect()
    }

    #[test]
    fn default_axis_is_one_to_eighty_two() {
        let axis = default_axis();
        assert_eq!(axis.len(), 82);
        assert_eq!(axis[0], 1.0);
        assert_eq!(axis[81], 82.0);
    }

    #[test]
    fn each_group_yields_a_fit_and_a_figure() {
        let request = FranckHertzRequest {
            accelerating_voltage: None,
            groups: vec![
                MeasurementSeries::new("VR=7.0 V", seesaw(&default_axis())),
                MeasurementSeries::new("VR=8.5 V", seesaw(&default_axis())),
            ],
            resolution: 200,
        };
        let output = request.fit().unwrap();
        assert_eq!(output.fits.len(), 2);
        assert_eq!(output.figures.len(), 2);
        // An interpolating spline reproduces the raw points exactly.
        for fit in &output.fits {
            assert!((fit.r_squared - 1.0).abs() < 1e-9);
            assert_eq!(fit.coefficients.len(), 82);
        }
        // The dense curve honors the requested resolution.
        assert_eq!(output.figures[0].series[1].x.len(), 200);
    }

    #[test]
    fn group_length_must_match_the_axis() {
        let request = FranckHertzRequest {
            accelerating_voltage: Some(vec![1.0, 2.0, 3.0, 4.0]),
            groups: vec![MeasurementSeries::new("short", vec![1.0, 2.0])],
            resolution: 50,
        };
        let err = request.fit().unwrap_err();
        assert!(matches!(err, FitError::ShapeMismatch { .. }));
    }

    #[test]
    fn duplicate_axis_values_are_degenerate() {
        let request = FranckHertzRequest {
            accelerating_voltage: Some(vec![1.0, 2.0, 2.0, 3.0]),
            groups: vec![MeasurementSeries::new("g", vec![0.1, 0.4, 0.5, 0.2])],
            resolution: 50,
        };
        let err = request.fit().unwrap_err();
        assert!(matches!(err, FitError::DegenerateInput { .. }));
    }

    #[test]
    fn no_groups_is_insufficient() {
        let request = FranckHertzRequest {
            accelerating_voltage: None,
            groups: vec![],
            resolution: 200,
        };
        let err = request.fit().unwrap_err();
        assert!(matches!(err, FitError::InsufficientData { .. }));
    }
}

//! Millikan oil-drop charge analysis.
//!
//! The droplet charges q are regressed against their integer-multiple
//! estimates n with the line forced through the origin; the fitted slope
//! *is* the elementary-charge estimate (in 1e-19 C). The annotation quotes
//! the reference value next to the measured one.

use crate::domain::{DerivedQuantity, ExperimentKind, ExperimentOutput, FitResult, MillikanRequest};
use crate::error::FitError;
use crate::fit::Fittable;
use crate::fit::derive::ELEMENTARY_CHARGE_E19;
use crate::fit::validate::{ensure_non_empty, ensure_paired};
use crate::math::{fit_through_origin, r2_score};
use crate::render::{Figure, SeriesSpec, linspace, span};

/// Sample count for the fitted line.
const LINE_SAMPLES: usize = 100;

/// Horizontal padding around the measured n range for the fitted line.
const AXIS_PAD: f64 = 0.2;

impl Fittable for MillikanRequest {
    fn fit(&self) -> Result<ExperimentOutput, FitError> {
        ensure_non_empty("multiple estimates", &self.multiples)?;
        ensure_paired(
            "multiple estimates",
            &self.multiples,
            "droplet charges",
            &self.charges,
        )?;

        let slope = fit_through_origin(&self.multiples, &self.charges)?;
        let predicted: Vec<f64> = self.multiples.iter().map(|&n| slope * n).collect();
        let r2 = r2_score(&self.charges, &predicted);

        let (lo, hi) = span(&self.multiples).unwrap_or((0.0, 1.0));
        let x_line = linspace(lo - AXIS_PAD, hi + AXIS_PAD, LINE_SAMPLES);
        let y_line: Vec<f64> = x_line.iter().map(|&n| slope * n).collect();

        let fit = FitResult {
            label: "origin-forced linear fit".to_string(),
            coefficients: vec![slope],
            r_squared: r2,
            derived: vec![DerivedQuantity::new(
                "elementary charge estimate",
                "e",
                slope,
                "×10⁻¹⁹ C",
            )],
        };
        let figure = Figure {
            title: "Millikan oil-drop q-n relation".to_string(),
            x_label: "Charge multiple estimate n".to_string(),
            y_label: "Droplet charge q (×10⁻¹⁹ C)".to_string(),
            series: vec![
                SeriesSpec::scatter(
                    "measured droplets",
                    self.multiples.clone(),
                    self.charges.clone(),
                ),
                SeriesSpec::line(format!("fit: q = {slope:.4}·n"), x_line, y_line),
            ],
            annotation: Some(format!(
                "measured e = {slope:.4} ×10⁻¹⁹ C\nreference e = {ELEMENTARY_CHARGE_E19:.4} ×10⁻¹⁹ C\nR² = {r2:.4}"
            )),
        };

        Ok(ExperimentOutput {
            kind: ExperimentKind::Millikan,
            fits: vec![fit],
            figures: vec![figure],
        })
    }
}

//! Solar-cell characteristics.
//!
//! The dark and illuminated I-V sweeps are descriptive; the fitted content
//! is the illumination response. Short-circuit current is linear in the
//! incident power, open-circuit voltage grows with its logarithm, so the
//! two series get a degree-1 OLS and a logarithmic trend fit respectively.
//! The logarithmic model needs strictly positive power values and, being
//! iterative, is the one fit in the project that can fail to converge.

use crate::domain::{ExperimentKind, ExperimentOutput, FitResult, SolarCellRequest};
use crate::error::FitError;
use crate::fit::Fittable;
use crate::fit::validate::{ensure_min_len, ensure_non_empty, ensure_paired, ensure_positive};
use crate::math::{TrendModel, fit_trend, linear_fit, r2_score};
use crate::render::{Figure, SeriesSpec, linspace, span};

/// Sample count for the dense logarithmic curve.
const CURVE_SAMPLES: usize = 100;

impl Fittable for SolarCellRequest {
    fn fit(&self) -> Result<ExperimentOutput, FitError> {
        ensure_non_empty("dark voltage", &self.dark_voltage)?;
        ensure_paired(
            "dark voltage",
            &self.dark_voltage,
            "dark current",
            &self.dark_current,
        )?;
        ensure_non_empty("light voltage", &self.light_voltage)?;
        ensure_paired(
            "light voltage",
            &self.light_voltage,
            "light current",
            &self.light_current,
        )?;
        ensure_min_len("light power", &self.light_power, 2)?;
        ensure_paired(
            "light power",
            &self.light_power,
            "short-circuit current",
            &self.short_circuit_current,
        )?;
        ensure_paired(
            "light power",
            &self.light_power,
            "open-circuit voltage",
            &self.open_circuit_voltage,
        )?;
        if let Some(intensity) = &self.relative_intensity {
            ensure_paired(
                "light power",
                &self.light_power,
                "relative intensity",
                intensity,
            )?;
        }
        ensure_positive("light power", &self.light_power)?;

        let isc_line = linear_fit(&self.light_power, &self.short_circuit_current)?;
        let isc_fitted = isc_line.predict(&self.light_power);
        let isc_r2 = r2_score(&self.short_circuit_current, &isc_fitted);

        let voc_trend = fit_trend(
            &self.light_power,
            &self.open_circuit_voltage,
            TrendModel::Logarithmic,
        )?;
        let voc_at_points = voc_trend.predict(&self.light_power);
        let voc_r2 = r2_score(&self.open_circuit_voltage, &voc_at_points);

        let (lo, hi) = span(&self.light_power).unwrap_or((1.0, 2.0));
        let power_dense = linspace(lo, hi, CURVE_SAMPLES);
        let voc_dense = voc_trend.predict(&power_dense);

        let mut isc_note = format!(
            "fit: Isc = {:.4}·P + {:.4}\nR² = {isc_r2:.4}",
            isc_line.slope, isc_line.intercept
        );
        if let Some(intensity) = &self.relative_intensity {
            let levels = intensity
                .iter()
                .map(|v| format!("{v}"))
                .collect::<Vec<_>>()
                .join(", ");
            isc_note.push_str(&format!("\nrelative intensity: {levels}"));
        }

        let fits = vec![
            FitResult {
                label: "Isc-P linear fit".to_string(),
                coefficients: vec![isc_line.slope, isc_line.intercept],
                r_squared: isc_r2,
                derived: Vec::new(),
            },
            FitResult {
                label: "Voc-P logarithmic fit".to_string(),
                coefficients: vec![voc_trend.a, voc_trend.b],
                r_squared: voc_r2,
                derived: Vec::new(),
            },
        ];
        let figures = vec![
            Figure::sweep(
                "Solar cell dark I-V characteristic",
                "Voltage U (V)",
                "Current I (mA)",
                &self.dark_voltage,
                &self.dark_current,
            ),
            Figure::sweep(
                "Solar cell illuminated I-V characteristic",
                "Voltage U (V)",
                "Current I (mA)",
                &self.light_voltage,
                &self.light_current,
            ),
            Figure {
                title: "Short-circuit current vs incident power".to_string(),
                x_label: "Incident power P (mW)".to_string(),
                y_label: "Short-circuit current Isc (mA)".to_string(),
                series: vec![
                    SeriesSpec::scatter(
                        "measured points",
                        self.light_power.clone(),
                        self.short_circuit_current.clone(),
                    ),
                    SeriesSpec::line(
                        TrendModel::Linear.describe(isc_line.slope, isc_line.intercept),
                        self.light_power.clone(),
                        isc_fitted,
                    ),
                ],
                annotation: Some(isc_note),
            },
            Figure {
                title: "Open-circuit voltage vs incident power".to_string(),
                x_label: "Incident power P (mW)".to_string(),
                y_label: "Open-circuit voltage Voc (V)".to_string(),
                series: vec![
                    SeriesSpec::scatter(
                        "measured points",
                        self.light_power.clone(),
                        self.open_circuit_voltage.clone(),
                    ),
                    SeriesSpec::line(
                        TrendModel::Logarithmic.describe(voc_trend.a, voc_trend.b),
                        power_dense,
                        voc_dense,
                    ),
                ],
                annotation: Some(format!("R² = {voc_r2:.4}")),
            },
        ];

        Ok(ExperimentOutput {
            kind: ExperimentKind::SolarCell,
            fits,
            figures,
        })
    }
}

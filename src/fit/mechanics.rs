//! Spring-oscillator mechanics: the T²-M and v²-x² analyses.
//!
//! Unit handling mirrors the bench sheets. Masses arrive in grams and are
//! converted to kilograms; the stopwatch records ten oscillations, so the
//! single period is `T10/10`. Both analyses are degree-1 fits on squared
//! quantities, with the physics living in the derived values:
//!
//! - T²-M: `T² = (4π²/k)·M`, so the stiffness is `k = 4π²/slope`
//! - v²-x²: `v² = ω²A² − ω²x²`, so `ω = √(−slope)` and `T = 2π/ω`

use crate::domain::{
    DerivedQuantity, ExperimentKind, ExperimentOutput, FitResult, MechanicsRequest,
    OscillationData, SpringMassData,
};
use crate::error::FitError;
use crate::fit::Fittable;
use crate::fit::derive::{omega_from_slope, period_from_omega, stiffness_from_slope};
use crate::fit::validate::{ensure_min_len, ensure_paired};
use crate::math::{linear_fit, r2_score};
use crate::render::{Figure, SeriesSpec};

impl Fittable for MechanicsRequest {
    fn fit(&self) -> Result<ExperimentOutput, FitError> {
        let (spring_fit, spring_figure) = fit_spring_mass(&self.t2m)?;
        let (osc_fit, osc_figure) = fit_oscillation(&self.v2x2)?;
        Ok(ExperimentOutput {
            kind: ExperimentKind::Mechanics,
            fits: vec![spring_fit, osc_fit],
            figures: vec![spring_figure, osc_figure],
        })
    }
}

fn fit_spring_mass(data: &SpringMassData) -> Result<(FitResult, Figure), FitError> {
    ensure_min_len("added masses", &data.added_mass_g, 2)?;
    ensure_paired(
        "added masses",
        &data.added_mass_g,
        "ten-oscillation times",
        &data.ten_period_s,
    )?;

    let mass_kg: Vec<f64> = data
        .added_mass_g
        .iter()
        .map(|w| (data.base_mass_g + w) / 1000.0)
        .collect();
    let period_sq: Vec<f64> = data
        .ten_period_s
        .iter()
        .map(|t10| {
            let t = t10 / 10.0;
            t * t
        })
        .collect();

    let line = linear_fit(&mass_kg, &period_sq)?;
    let fitted = line.predict(&mass_kg);
    let r2 = r2_score(&period_sq, &fitted);
    let stiffness = stiffness_from_slope(line.slope);

    let fit = FitResult {
        label: "T²-M linear fit".to_string(),
        coefficients: vec![line.slope, line.intercept],
        r_squared: r2,
        derived: vec![DerivedQuantity::new(
            "stiffness constant",
            "k",
            stiffness,
            "N/m",
        )],
    };
    let figure = Figure {
        title: "Spring oscillator T²-M curve".to_string(),
        x_label: "Oscillator mass M (kg)".to_string(),
        y_label: "Period squared T² (s²)".to_string(),
        series: vec![
            SeriesSpec::scatter("measured points", mass_kg.clone(), period_sq),
            SeriesSpec::line(
                format!("fit: T² = {:.2}·M + {:.4}", line.slope, line.intercept),
                mass_kg,
                fitted,
            ),
        ],
        annotation: Some(format!(
            "stiffness k = {stiffness:.2} N/m\nintercept b = {:.4} s²\nR² = {r2:.4}",
            line.intercept
        )),
    };
    Ok((fit, figure))
}

fn fit_oscillation(data: &OscillationData) -> Result<(FitResult, Figure), FitError> {
    ensure_min_len("displacements", &data.displacement_cm, 2)?;
    ensure_paired(
        "displacements",
        &data.displacement_cm,
        "average speeds",
        &data.speed_cms,
    )?;

    let x_sq: Vec<f64> = data.displacement_cm.iter().map(|v| v * v).collect();
    let v_sq: Vec<f64> = data.speed_cms.iter().map(|v| v * v).collect();

    let line = linear_fit(&x_sq, &v_sq)?;
    let fitted = line.predict(&x_sq);
    let r2 = r2_score(&v_sq, &fitted);
    let omega = omega_from_slope(line.slope);
    let period = period_from_omega(omega);

    let fit = FitResult {
        label: "v²-x² linear fit".to_string(),
        coefficients: vec![line.slope, line.intercept],
        r_squared: r2,
        derived: vec![
            DerivedQuantity::new("angular frequency", "ω", omega, "rad/s"),
            DerivedQuantity::new("calculated period", "T", period, "s"),
        ],
    };
    let figure = Figure {
        title: "Spring oscillator v²-x² curve".to_string(),
        x_label: "Displacement squared x² (cm²)".to_string(),
        y_label: "Speed squared v² (cm²/s²)".to_string(),
        series: vec![
            SeriesSpec::scatter("measured points", x_sq.clone(), v_sq),
            SeriesSpec::line(
                format!("fit: v² = {:.4}·x² + {:.2}", line.slope, line.intercept),
                x_sq,
                fitted,
            ),
        ],
        annotation: Some(format!(
            "angular frequency ω = {omega:.3} rad/s\ncalculated period T = {period:.4} s\nR² = {r2:.4}"
        )),
    };
    Ok((fit, figure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn oscillation(displacement_cm: Vec<f64>, speed_cms: Vec<f64>) -> OscillationData {
        OscillationData {
            displacement_cm,
            speed_cms,
        }
    }

    #[test]
    fn stiffness_comes_from_the_t2m_slope() {
        // k = 25 N/m: T = 2π√(M/k), measured as ten periods.
        let k_true = 25.0;
        let added = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let base = 50.0;
        let t10: Vec<f64> = added
            .iter()
            .map(|w| {
                let m: f64 = (base + w) / 1000.0;
                10.0 * 2.0 * PI * (m / k_true).sqrt()
            })
            .collect();
        let request = MechanicsRequest {
            t2m: SpringMassData {
                base_mass_g: base,
                added_mass_g: added,
                ten_period_s: t10,
            },
            v2x2: oscillation(vec![2.0, 4.0, 6.0], vec![28.0, 26.0, 21.0]),
        };
        let output = request.fit().unwrap();
        let spring = &output.fits[0];
        assert!((spring.derived[0].value - k_true).abs() < 1e-6);
        assert!((spring.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn omega_and_period_come_from_a_negative_slope() {
        // v² = ω²(A² − x²) with ω = 3 rad/s, A = 10 cm.
        let omega_true: f64 = 3.0;
        let displacement = vec![2.0, 4.0, 6.0, 8.0];
        let speed: Vec<f64> = displacement
            .iter()
            .map(|x| (omega_true * omega_true * (100.0 - x * x)).sqrt())
            .collect();
        let request = MechanicsRequest {
            t2m: SpringMassData {
                base_mass_g: 50.0,
                added_mass_g: vec![10.0, 20.0, 30.0],
                ten_period_s: vec![5.0, 5.5, 6.0],
            },
            v2x2: oscillation(displacement, speed),
        };
        let output = request.fit().unwrap();
        let osc = &output.fits[1];
        assert!((osc.derived[0].value - omega_true).abs() < 1e-9);
        assert!((osc.derived[1].value - 2.0 * PI / omega_true).abs() < 1e-9);
    }

    #[test]
    fn non_negative_slope_zeroes_omega_and_period() {
        // Speeds grow with displacement, so the v²-x² slope is positive.
        let request = MechanicsRequest {
            t2m: SpringMassData {
                base_mass_g: 50.0,
                added_mass_g: vec![10.0, 20.0, 30.0],
                ten_period_s: vec![5.0, 5.5, 6.0],
            },
            v2x2: oscillation(vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]),
        };
        let output = request.fit().unwrap();
        let osc = &output.fits[1];
        assert_eq!(osc.derived[0].value, 0.0);
        assert_eq!(osc.derived[1].value, 0.0);
    }

    #[test]
    fn mismatched_t2m_series_are_rejected() {
        let request = MechanicsRequest {
            t2m: SpringMassData {
                base_mass_g: 50.0,
                added_mass_g: vec![10.0, 20.0],
                ten_period_s: vec![5.0],
            },
            v2x2: oscillation(vec![1.0, 2.0], vec![3.0, 2.0]),
        };
        assert!(matches!(
            request.fit().unwrap_err(),
            FitError::ShapeMismatch { .. }
        ));
    }

    #[test]
    fn single_point_sweeps_are_insufficient() {
        let request = MechanicsRequest {
            t2m: SpringMassData {
                base_mass_g: 50.0,
                added_mass_g: vec![10.0],
                ten_period_s: vec![5.0],
            },
            v2x2: oscillation(vec![1.0, 2.0], vec![3.0, 2.0]),
        };
        assert!(matches!(
            request.fit().unwrap_err(),
            FitError::InsufficientData { .. }
        ));
    }
}

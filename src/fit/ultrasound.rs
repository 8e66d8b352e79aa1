//! Ultrasonic-ranger kinematics: free fall, cart runs, and the Newton's
//! second-law check.
//!
//! Velocity is sampled by an ultrasonic ranger; each run repeats the
//! measurement up to four times over one time axis and the fit runs on
//! the pointwise mean of the repeats. Every section of the request is
//! optional, but a present group whose length disagrees with its time
//! axis is rejected before any fit runs. Cart runs are independent and
//! fitted in parallel.

use rayon::prelude::*;

use crate::domain::{
    DerivedQuantity, ExperimentKind, ExperimentOutput, FitResult, MeasurementSeries, NewtonData,
    UltrasoundRequest, VelocityRun,
};
use crate::error::FitError;
use crate::fit::Fittable;
use crate::fit::derive::STANDARD_GRAVITY;
use crate::fit::validate::{ensure_min_len, ensure_paired};
use crate::math::{linear_fit, r2_score};
use crate::render::{Figure, SeriesSpec};

/// Largest number of repeated velocity series a run may carry.
pub const MAX_GROUPS_PER_RUN: usize = 4;

impl Fittable for UltrasoundRequest {
    fn fit(&self) -> Result<ExperimentOutput, FitError> {
        let mut fits = Vec::new();
        let mut figures = Vec::new();

        if let Some(run) = &self.free_fall {
            let (fit, figure) = fit_velocity_run(run, RunRole::FreeFall)?;
            fits.push(fit);
            figures.push(figure);
        }

        let cart_outputs = self
            .runs
            .par_iter()
            .map(|run| fit_velocity_run(run, RunRole::Cart))
            .collect::<Result<Vec<_>, FitError>>()?;
        for (fit, figure) in cart_outputs {
            fits.push(fit);
            figures.push(figure);
        }

        if let Some(newton) = &self.newton {
            let (fit, figure) = fit_newton(newton)?;
            fits.push(fit);
            figures.push(figure);
        }

        Ok(ExperimentOutput {
            kind: ExperimentKind::Ultrasound,
            fits,
            figures,
        })
    }
}

#[derive(Clone, Copy)]
enum RunRole {
    FreeFall,
    Cart,
}

fn fit_velocity_run(run: &VelocityRun, role: RunRole) -> Result<(FitResult, Figure), FitError> {
    let axis_name = format!("{} time axis", run.label);
    ensure_min_len(&axis_name, &run.time_s, 2)?;
    if run.velocities.is_empty() {
        return Err(FitError::insufficient(
            format!("{} velocity groups", run.label),
            0,
            1,
        ));
    }
    if run.velocities.len() > MAX_GROUPS_PER_RUN {
        return Err(FitError::degenerate(
            format!("{} velocity groups", run.label),
            format!(
                "{} repeated series supplied, at most {MAX_GROUPS_PER_RUN} are accepted",
                run.velocities.len()
            ),
        ));
    }
    for group in &run.velocities {
        ensure_paired(&axis_name, &run.time_s, &group.label, &group.values)?;
    }

    let mean = pointwise_mean(&run.velocities, run.time_s.len());
    let line = linear_fit(&run.time_s, &mean)?;
    let fitted = line.predict(&run.time_s);
    let r2 = r2_score(&mean, &fitted);

    let (label, title, derived, annotation) = match role {
        RunRole::FreeFall => (
            "free-fall v-t fit".to_string(),
            format!("Free-fall velocity-time curve ({})", run.label),
            vec![DerivedQuantity::new(
                "gravitational acceleration estimate",
                "g",
                line.slope,
                "m/s²",
            )],
            format!(
                "g estimate = {:.3} m/s²\nreference g = {STANDARD_GRAVITY} m/s²\nR² = {r2:.4}",
                line.slope
            ),
        ),
        RunRole::Cart => (
            format!("{} v-t fit", run.label),
            format!("Cart velocity-time curve ({})", run.label),
            vec![DerivedQuantity::new("acceleration", "a", line.slope, "m/s²")],
            format!("acceleration a = {:.3} m/s²\nR² = {r2:.4}", line.slope),
        ),
    };

    let mut series: Vec<SeriesSpec> = run
        .velocities
        .iter()
        .map(|group| SeriesSpec::scatter(group.label.clone(), run.time_s.clone(), group.values.clone()))
        .collect();
    series.push(SeriesSpec::line(
        format!("fit: v = {:.3}·t + {:.3}", line.slope, line.intercept),
        run.time_s.clone(),
        fitted,
    ));

    let fit = FitResult {
        label,
        coefficients: vec![line.slope, line.intercept],
        r_squared: r2,
        derived,
    };
    let figure = Figure {
        title,
        x_label: "Time t (s)".to_string(),
        y_label: "Velocity v (m/s)".to_string(),
        series,
        annotation: Some(annotation),
    };
    Ok((fit, figure))
}

fn fit_newton(data: &NewtonData) -> Result<(FitResult, Figure), FitError> {
    ensure_min_len("driving masses", &data.mass_kg, 2)?;
    ensure_paired(
        "driving masses",
        &data.mass_kg,
        "measured accelerations",
        &data.acceleration,
    )?;

    let line = linear_fit(&data.mass_kg, &data.acceleration)?;
    let fitted = line.predict(&data.mass_kg);
    let r2 = r2_score(&data.acceleration, &fitted);

    let fit = FitResult {
        label: "a-m linear fit".to_string(),
        coefficients: vec![line.slope, line.intercept],
        r_squared: r2,
        derived: vec![DerivedQuantity::new(
            "acceleration per driving mass",
            "a/m",
            line.slope,
            "m/(s²·kg)",
        )],
    };
    let figure = Figure {
        title: "Newton's second law: acceleration vs driving mass".to_string(),
        x_label: "Driving mass m (kg)".to_string(),
        y_label: "Acceleration a (m/s²)".to_string(),
        series: vec![
            SeriesSpec::scatter(
                "measured points",
                data.mass_kg.clone(),
                data.acceleration.clone(),
            ),
            SeriesSpec::line(
                format!("fit: a = {:.3}·m + {:.3}", line.slope, line.intercept),
                data.mass_kg.clone(),
                fitted,
            ),
        ],
        annotation: Some(format!(
            "fitted slope = {:.3} m/(s²·kg)\nreference g = {STANDARD_GRAVITY} m/s²\nR² = {r2:.4}",
            line.slope
        )),
    };
    Ok((fit, figure))
}

/// Pointwise mean across repeated series; lengths are validated against
/// the axis before this runs.
fn pointwise_mean(groups: &[MeasurementSeries], len: usize) -> Vec<f64> {
    let count = groups.len() as f64;
    (0..len)
        .map(|i| groups.iter().map(|g| g.values[i]).sum::<f64>() / count)
        .collect()
}

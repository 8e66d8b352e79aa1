//! Photoelectric device characteristics: LED, laser diode, photodiode,
//! and phototransistor.
//!
//! The one fitted quantity on this sheet is the laser-diode threshold
//! current: a degree-1 OLS over the linear lasing region of the P-I
//! sweep, whose x-intercept estimates where lasing begins. The caller
//! picks the first index of the linear region (clamped into the valid
//! range); every other panel is descriptive.

use crate::domain::{
    DerivedQuantity, DetectorCharacteristic, DiodeCharacteristic, ExperimentKind,
    ExperimentOutput, FitResult, PhotoDevicesRequest,
};
use crate::error::FitError;
use crate::fit::Fittable;
use crate::fit::derive::x_intercept;
use crate::fit::validate::{ensure_min_len, ensure_non_empty, ensure_paired};
use crate::math::{linear_fit, r2_score};
use crate::render::{Figure, SeriesSpec};

impl Fittable for PhotoDevicesRequest {
    fn fit(&self) -> Result<ExperimentOutput, FitError> {
        validate_diode("LED", &self.led)?;
        validate_diode("laser diode", &self.laser_diode)?;
        validate_detector("photodiode", &self.photodiode)?;
        validate_detector("phototransistor", &self.phototransistor)?;

        let start = clamp_start(self.ld_linear_start, self.laser_diode.current.len());
        let lasing_current = &self.laser_diode.current[start..];
        let lasing_power = &self.laser_diode.power[start..];
        ensure_min_len("laser-diode lasing region", lasing_current, 2)?;

        let line = linear_fit(lasing_current, lasing_power)?;
        let fitted = line.predict(lasing_current);
        let r2 = r2_score(lasing_power, &fitted);
        let threshold = x_intercept(line.slope, line.intercept);

        let fit = FitResult {
            label: "laser-diode P-I linear fit".to_string(),
            coefficients: vec![line.slope, line.intercept],
            r_squared: r2,
            derived: vec![DerivedQuantity::new(
                "threshold current",
                "I_th",
                threshold,
                "mA",
            )],
        };

        let mut figures = vec![
            Figure::sweep(
                "LED I-U characteristic",
                "Forward voltage U (V)",
                "Drive current I (mA)",
                &self.led.voltage,
                &self.led.current,
            ),
            Figure::sweep(
                "LED P-I characteristic",
                "Drive current I (mA)",
                "Optical power P (mW)",
                &self.led.current,
                &self.led.power,
            ),
            Figure::sweep(
                "Laser diode I-U characteristic",
                "Forward voltage U (V)",
                "Drive current I (mA)",
                &self.laser_diode.voltage,
                &self.laser_diode.current,
            ),
            Figure {
                title: "Laser diode P-I characteristic".to_string(),
                x_label: "Drive current I (mA)".to_string(),
                y_label: "Optical power P (mW)".to_string(),
                series: vec![
                    SeriesSpec::scatter(
                        "measured points",
                        self.laser_diode.current.clone(),
                        self.laser_diode.power.clone(),
                    ),
                    SeriesSpec::line(
                        format!("lasing-region fit: P = {:.4}·I + {:.4}", line.slope, line.intercept),
                        lasing_current.to_vec(),
                        fitted,
                    ),
                ],
                annotation: Some(format!(
                    "threshold current I_th = {threshold:.3} mA\nR² = {r2:.4}"
                )),
            },
        ];
        figures.extend(detector_figures("Photodiode", &self.photodiode));
        figures.extend(detector_figures("Phototransistor", &self.phototransistor));

        Ok(ExperimentOutput {
            kind: ExperimentKind::PhotoDevices,
            fits: vec![fit],
            figures,
        })
    }
}

/// Clamp the caller-chosen lasing-region start into `[0, len - 1]`.
fn clamp_start(start: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    start.clamp(0, (len - 1) as i64) as usize
}

fn validate_diode(name: &str, diode: &DiodeCharacteristic) -> Result<(), FitError> {
    ensure_non_empty(&format!("{name} drive current"), &diode.current)?;
    ensure_paired(
        &format!("{name} drive current"),
        &diode.current,
        &format!("{name} forward voltage"),
        &diode.voltage,
    )?;
    ensure_paired(
        &format!("{name} drive current"),
        &diode.current,
        &format!("{name} optical power"),
        &diode.power,
    )
}

fn validate_detector(name: &str, detector: &DetectorCharacteristic) -> Result<(), FitError> {
    ensure_non_empty(&format!("{name} illuminance"), &detector.illuminance)?;
    ensure_paired(
        &format!("{name} illuminance"),
        &detector.illuminance,
        &format!("{name} photocurrent (illuminance sweep)"),
        &detector.current_vs_illuminance,
    )?;
    ensure_non_empty(&format!("{name} bias voltage"), &detector.voltage)?;
    ensure_paired(
        &format!("{name} bias voltage"),
        &detector.voltage,
        &format!("{name} photocurrent (voltage sweep)"),
        &detector.current_vs_voltage,
    )?;
    ensure_non_empty(&format!("{name} wavelength"), &detector.wavelength)?;
    ensure_paired(
        &format!("{name} wavelength"),
        &detector.wavelength,
        &format!("{name} photocurrent (wavelength sweep)"),
        &detector.current_vs_wavelength,
    )
}

fn detector_figures(name: &str, detector: &DetectorCharacteristic) -> Vec<Figure> {
    vec![
        Figure::sweep(
            format!("{name} illuminance response"),
            "Illuminance E (lx)",
            "Photocurrent I (μA)",
            &detector.illuminance,
            &detector.current_vs_illuminance,
        ),
        Figure::sweep(
            format!("{name} I-V characteristic"),
            "Bias voltage V (V)",
            "Photocurrent I (μA)",
            &detector.voltage,
            &detector.current_vs_voltage,
        ),
        Figure::sweep(
            format!("{name} spectral response"),
            "Wavelength λ (nm)",
            "Photocurrent I (μA)",
            &detector.wavelength,
            &detector.current_vs_wavelength,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diode(n: usize) -> DiodeCharacteristic {
        let current: Vec<f64> = (0..n).map(|i| 5.0 * i as f64).collect();
        DiodeCharacteristic {
            voltage: current.iter().map(|i| 1.5 + 0.02 * i).collect(),
            power: current.iter().map(|i| (0.08 * (i - 12.0)).max(0.0)).collect(),
            current,
        }
    }

    fn detector() -> DetectorCharacteristic {
        DetectorCharacteristic {
            illuminance: vec![100.0, 200.0, 300.0],
            current_vs_illuminance: vec![2.0, 4.1, 6.0],
            voltage: vec![1.0, 3.0, 5.0],
            current_vs_voltage: vec![3.9, 4.0, 4.1],
            wavelength: vec![600.0, 750.0, 900.0],
            current_vs_wavelength: vec![1.0, 3.5, 1.2],
        }
    }

    fn request(start: i64) -> PhotoDevicesRequest {
        PhotoDevicesRequest {
            led: diode(8),
            laser_diode: diode(8),
            ld_linear_start: start,
            photodiode: detector(),
            phototransistor: detector(),
        }
    }

    #[test]
    fn clamp_keeps_start_inside_the_index_range() {
        assert_eq!(clamp_start(-3, 8), 0);
        assert_eq!(clamp_start(4, 8), 4);
        assert_eq!(clamp_start(12, 8), 7);
        assert_eq!(clamp_start(0, 0), 0);
    }

    #[test]
    fn threshold_current_is_the_x_intercept_of_the_lasing_line() {
        // Above index 3 the synthetic P-I data is exactly P = 0.08(I - 12).
        let output = request(4).fit().unwrap();
        let fit = &output.fits[0];
        assert!((fit.coefficients[0] - 0.08).abs() < 1e-9);
        assert!((fit.derived[0].value - 12.0).abs() < 1e-6);
        assert!((fit.r_squared - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ten_panels_cover_every_device() {
        let output = request(4).fit().unwrap();
        assert_eq!(output.figures.len(), 10);
        assert_eq!(output.fits.len(), 1);
    }

    #[test]
    fn out_of_range_start_clamps_to_the_last_point() {
        // Clamped to index 7, the region has a single point left.
        let err = request(100).fit().unwrap_err();
        assert!(matches!(err, FitError::InsufficientData { .. }));
    }

    #[test]
    fn negative_start_clamps_to_zero() {
        let output = request(-5).fit().unwrap();
        // The fit then covers the whole sweep, flat region included.
        let line = &output.figures[3].series[1];
        assert_eq!(line.x.len(), 8);
    }

    #[test]
    fn detector_sweeps_must_pair_with_their_axes() {
        let mut bad = request(4);
        bad.photodiode.current_vs_wavelength.pop();
        assert!(matches!(
            bad.fit().unwrap_err(),
            FitError::ShapeMismatch { .. }
        ));
    }
}

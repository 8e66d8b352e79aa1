//! Thermistor calibration curves (Pt100 and NTC).
//!
//! Purely descriptive: one resistance-vs-temperature panel per sensor,
//! both over the same bath-temperature axis. The axis defaults to the
//! six-point programme of the thermostat bath when the request omits it.

use crate::domain::{ExperimentKind, ExperimentOutput, ThermalRequest};
use crate::error::FitError;
use crate::fit::Fittable;
use crate::fit::validate::{ensure_non_empty, ensure_paired};
use crate::render::Figure;

/// Bath temperatures used when the request does not supply any, °C.
pub fn default_temperatures() -> Vec<f64> {
    vec![55.0, 60.0, 65.0, 70.0, 75.0, 80.0]
}

impl Fittable for ThermalRequest {
    fn fit(&self) -> Result<ExperimentOutput, FitError> {
        let temperatures = match &self.temperatures {
            Some(values) => {
                ensure_non_empty("temperatures", values)?;
                values.clone()
            }
            None => default_temperatures(),
        };
        ensure_paired(
            "temperatures",
            &temperatures,
            "Pt100 resistance",
            &self.pt100_resistance,
        )?;
        ensure_paired(
            "temperatures",
            &temperatures,
            "NTC resistance",
            &self.ntc_resistance,
        )?;

        let figures = vec![
            Figure::sweep(
                "Pt100 resistance vs temperature",
                "Temperature T (°C)",
                "Resistance R (Ω)",
                &temperatures,
                &self.pt100_resistance,
            ),
            Figure::sweep(
                "NTC thermistor resistance vs temperature",
                "Temperature T (°C)",
                "Resistance R (kΩ)",
                &temperatures,
                &self.ntc_resistance,
            ),
        ];
        Ok(ExperimentOutput {
            kind: ExperimentKind::Thermal,
            fits: Vec::new(),
            figures,
        })
    }
}

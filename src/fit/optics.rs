//! Fiber-bench characteristics: laser-diode I-U / P-I and photodiode I-V.
//!
//! These are the descriptive plots of the family. No model is fitted; each
//! figure presents the raw sweep as a scatter with a trend line through
//! the same points, and the photodiode panel overlays one curve per
//! optical power level. Validation still applies in full: a sweep whose
//! paired series disagree in length is an input error, never something to
//! truncate quietly.

use crate::domain::{ExperimentKind, ExperimentOutput, FiberRequest};
use crate::error::FitError;
use crate::fit::Fittable;
use crate::fit::validate::{ensure_non_empty, ensure_paired};
use crate::render::{Figure, SeriesSpec};

impl Fittable for FiberRequest {
    fn fit(&self) -> Result<ExperimentOutput, FitError> {
        let figure = match self {
            FiberRequest::VoltageCurrent { voltage, current } => {
                ensure_non_empty("forward voltage", voltage)?;
                ensure_paired("forward voltage", voltage, "emitter current", current)?;
                Figure::sweep(
                    "Laser diode I-U characteristic",
                    "Forward voltage U (V)",
                    "Emitter current I (mA)",
                    voltage,
                    current,
                )
            }
            FiberRequest::CurrentPower { current, power } => {
                ensure_non_empty("emitter current", current)?;
                ensure_paired("emitter current", current, "optical power", power)?;
                Figure::sweep(
                    "Laser diode P-I characteristic",
                    "Emitter current I (mA)",
                    "Optical power P (mW)",
                    current,
                    power,
                )
            }
            FiberRequest::PhotodiodeIv {
                voltage,
                dark,
                low_power,
                high_power,
            } => {
                ensure_non_empty("reverse bias voltage", voltage)?;
                ensure_paired("reverse bias voltage", voltage, "photocurrent (P = 0)", dark)?;
                ensure_paired(
                    "reverse bias voltage",
                    voltage,
                    "photocurrent (P = 0.100 mW)",
                    low_power,
                )?;
                ensure_paired(
                    "reverse bias voltage",
                    voltage,
                    "photocurrent (P = 0.200 mW)",
                    high_power,
                )?;
                Figure {
                    title: "Photodiode I-V characteristic".to_string(),
                    x_label: "Reverse bias V (V)".to_string(),
                    y_label: "Photocurrent I (μA)".to_string(),
                    series: vec![
                        SeriesSpec::scatter_line("P = 0", voltage.clone(), dark.clone()),
                        SeriesSpec::scatter_line("P = 0.100 mW", voltage.clone(), low_power.clone()),
                        SeriesSpec::scatter_line(
                            "P = 0.200 mW",
                            voltage.clone(),
                            high_power.clone(),
                        ),
                    ],
                    annotation: None,
                }
            }
        };

        Ok(ExperimentOutput {
            kind: ExperimentKind::Fiber,
            fits: Vec::new(),
            figures: vec![figure],
        })
    }
}

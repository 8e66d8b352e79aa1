//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - handed to an external renderer as part of a figure bundle

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::render::Figure;

/// The experiment families the fitting engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExperimentKind {
    /// Fiber-optics bench: laser-diode I-U / P-I and photodiode I-V sweeps.
    Fiber,
    /// Franck-Hertz plate-current curves, one spline per retarding voltage.
    FranckHertz,
    /// Millikan oil-drop elementary-charge estimate.
    Millikan,
    /// Spring oscillator: T²-M stiffness and v²-x² frequency analyses.
    Mechanics,
    /// Pt100 / NTC thermistor calibration sweeps.
    Thermal,
    /// LED, laser-diode, photodiode, and phototransistor characteristics.
    PhotoDevices,
    /// Solar-cell I-V sweeps plus the Isc / Voc illumination response.
    SolarCell,
    /// Ultrasonic ranger kinematics: free fall, carts, Newton's second law.
    Ultrasound,
}

impl ExperimentKind {
    pub const ALL: [ExperimentKind; 8] = [
        ExperimentKind::Fiber,
        ExperimentKind::FranckHertz,
        ExperimentKind::Millikan,
        ExperimentKind::Mechanics,
        ExperimentKind::Thermal,
        ExperimentKind::PhotoDevices,
        ExperimentKind::SolarCell,
        ExperimentKind::Ultrasound,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ExperimentKind::Fiber => "Fiber optics",
            ExperimentKind::FranckHertz => "Franck-Hertz",
            ExperimentKind::Millikan => "Millikan oil drop",
            ExperimentKind::Mechanics => "Spring oscillator",
            ExperimentKind::Thermal => "Thermistor calibration",
            ExperimentKind::PhotoDevices => "Photoelectric devices",
            ExperimentKind::SolarCell => "Solar cell",
            ExperimentKind::Ultrasound => "Ultrasonic kinematics",
        }
    }
}

/// One labeled series of raw measurements.
///
/// The label travels into figure legends untouched, so clients can name
/// repeats however their bench sheet does ("VG1=1.5V", "repeat 3", ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl MeasurementSeries {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A physical quantity computed from fitted coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedQuantity {
    /// Long name for reports ("stiffness constant").
    pub name: String,
    /// Short symbol for tables and annotations ("k").
    pub symbol: String,
    pub value: f64,
    /// Unit text; empty for dimensionless quantities.
    pub unit: String,
}

impl DerivedQuantity {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// One fitted curve: coefficients, fit quality, derived quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    /// What was fitted, for reports ("T²-M linear fit", "group 2 spline").
    pub label: String,
    /// Model coefficients. Polynomial fits store the highest degree first,
    /// so a degree-1 fit is `[slope, intercept]`; spline fits store the
    /// per-knot curvatures instead.
    pub coefficients: Vec<f64>,
    /// Coefficient of determination against the raw observations.
    pub r_squared: f64,
    /// Zero or more physical quantities derived from the coefficients.
    pub derived: Vec<DerivedQuantity>,
}

/// Everything one fit run produces: numeric results plus figures for the
/// renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentOutput {
    pub kind: ExperimentKind,
    /// Fitted curves in panel order; empty for descriptive experiments.
    pub fits: Vec<FitResult>,
    pub figures: Vec<Figure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experiment_kind_serializes_as_kebab_case() {
        let json = serde_json::to_string(&ExperimentKind::FranckHertz).unwrap();
        assert_eq!(json, "\"franck-hertz\"");
        let back: ExperimentKind = serde_json::from_str("\"photo-devices\"").unwrap();
        assert_eq!(back, ExperimentKind::PhotoDevices);
    }

    #[test]
    fn all_covers_every_kind_once() {
        let mut seen = std::collections::HashSet::new();
        for kind in ExperimentKind::ALL {
            assert!(seen.insert(kind));
        }
        assert_eq!(seen.len(), 8);
    }
}

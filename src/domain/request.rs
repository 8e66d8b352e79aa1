//! Experiment request payloads.
//!
//! A request is a tagged union: the `experiment` field selects the family,
//! the remaining fields are that family's measurement arrays. Optional
//! axes fall back to the bench defaults recorded on the lab sheets, so a
//! client only sends what it actually measured.

use serde::{Deserialize, Serialize};

use crate::domain::{ExperimentKind, MeasurementSeries};

/// A single fit request, tagged by experiment kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "experiment", rename_all = "kebab-case")]
pub enum ExperimentRequest {
    Fiber(FiberRequest),
    FranckHertz(FranckHertzRequest),
    Millikan(MillikanRequest),
    Mechanics(MechanicsRequest),
    Thermal(ThermalRequest),
    PhotoDevices(PhotoDevicesRequest),
    SolarCell(SolarCellRequest),
    Ultrasound(UltrasoundRequest),
}

impl ExperimentRequest {
    pub fn kind(&self) -> ExperimentKind {
        match self {
            ExperimentRequest::Fiber(_) => ExperimentKind::Fiber,
            ExperimentRequest::FranckHertz(_) => ExperimentKind::FranckHertz,
            ExperimentRequest::Millikan(_) => ExperimentKind::Millikan,
            ExperimentRequest::Mechanics(_) => ExperimentKind::Mechanics,
            ExperimentRequest::Thermal(_) => ExperimentKind::Thermal,
            ExperimentRequest::PhotoDevices(_) => ExperimentKind::PhotoDevices,
            ExperimentRequest::SolarCell(_) => ExperimentKind::SolarCell,
            ExperimentRequest::Ultrasound(_) => ExperimentKind::Ultrasound,
        }
    }
}

/// Which sweep of the fiber bench to describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plot", rename_all = "kebab-case")]
pub enum FiberRequest {
    /// Laser-diode forward voltage vs emitter current (I-U).
    VoltageCurrent { voltage: Vec<f64>, current: Vec<f64> },
    /// Laser-diode emitter current vs optical power (P-I).
    CurrentPower { current: Vec<f64>, power: Vec<f64> },
    /// Photodiode reverse-bias I-V at three optical power levels.
    PhotodiodeIv {
        voltage: Vec<f64>,
        /// Photocurrent with the source off (P = 0).
        dark: Vec<f64>,
        /// Photocurrent at P = 0.100 mW.
        low_power: Vec<f64>,
        /// Photocurrent at P = 0.200 mW.
        high_power: Vec<f64>,
    },
}

/// Franck-Hertz plate-current groups over one accelerating-voltage axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranckHertzRequest {
    /// Accelerating voltage VG2K axis; integer volts `1..=82` when absent.
    #[serde(default)]
    pub accelerating_voltage: Option<Vec<f64>>,
    /// One plate-current series per retarding-voltage setting.
    pub groups: Vec<MeasurementSeries>,
    /// Dense sample count for each fitted spline curve.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
}

pub(crate) fn default_resolution() -> usize {
    200
}

/// Millikan oil-drop observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MillikanRequest {
    /// Integer-multiple estimate n for each droplet.
    pub multiples: Vec<f64>,
    /// Droplet charge q for each droplet, in units of 1e-19 C.
    pub charges: Vec<f64>,
}

/// Spring-oscillator measurements: both mechanics analyses in one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicsRequest {
    pub t2m: SpringMassData,
    pub v2x2: OscillationData,
}

/// Period-vs-mass sweep for the T²-M stiffness analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpringMassData {
    /// Bare oscillator mass in grams.
    pub base_mass_g: f64,
    /// Added weight per measurement, grams.
    pub added_mass_g: Vec<f64>,
    /// Stopwatch time for ten oscillations per measurement, seconds.
    pub ten_period_s: Vec<f64>,
}

/// Speed-vs-displacement sweep for the v²-x² analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillationData {
    /// Displacement amplitudes, cm.
    pub displacement_cm: Vec<f64>,
    /// Average speed through each displacement, cm/s.
    pub speed_cms: Vec<f64>,
}

/// Thermistor calibration sweeps over one bath-temperature axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalRequest {
    /// Bath temperatures in °C; `[55, 60, 65, 70, 75, 80]` when absent.
    #[serde(default)]
    pub temperatures: Option<Vec<f64>>,
    pub pt100_resistance: Vec<f64>,
    pub ntc_resistance: Vec<f64>,
}

/// Photoelectric-device characteristics: two emitters, two detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoDevicesRequest {
    pub led: DiodeCharacteristic,
    pub laser_diode: DiodeCharacteristic,
    /// First index of the linear lasing region in the laser-diode P-I
    /// sweep. Clamped into the valid index range before use.
    #[serde(default = "default_ld_linear_start")]
    pub ld_linear_start: i64,
    pub photodiode: DetectorCharacteristic,
    pub phototransistor: DetectorCharacteristic,
}

pub(crate) fn default_ld_linear_start() -> i64 {
    4
}

/// Forward sweep of a light-emitting device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiodeCharacteristic {
    /// Drive current, mA.
    pub current: Vec<f64>,
    /// Forward voltage at each drive current, V.
    pub voltage: Vec<f64>,
    /// Optical output power at each drive current, mW.
    pub power: Vec<f64>,
}

/// Three independent response sweeps of a light-detecting device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorCharacteristic {
    /// Illuminance axis, lx.
    pub illuminance: Vec<f64>,
    /// Photocurrent over the illuminance axis, μA.
    pub current_vs_illuminance: Vec<f64>,
    /// Bias-voltage axis, V.
    pub voltage: Vec<f64>,
    /// Photocurrent over the bias-voltage axis, μA.
    pub current_vs_voltage: Vec<f64>,
    /// Wavelength axis, nm.
    pub wavelength: Vec<f64>,
    /// Photocurrent over the wavelength axis, μA.
    pub current_vs_wavelength: Vec<f64>,
}

/// Solar-cell sweeps plus the illumination-response arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarCellRequest {
    pub dark_voltage: Vec<f64>,
    pub dark_current: Vec<f64>,
    pub light_voltage: Vec<f64>,
    pub light_current: Vec<f64>,
    /// Incident optical power axis for the Isc / Voc fits, mW.
    pub light_power: Vec<f64>,
    pub short_circuit_current: Vec<f64>,
    pub open_circuit_voltage: Vec<f64>,
    /// Relative intensity per illumination level, annotation only.
    #[serde(default)]
    pub relative_intensity: Option<Vec<f64>>,
}

/// Ultrasonic-ranger kinematics. Every section is optional; absent
/// sections are skipped, present ones are validated and fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UltrasoundRequest {
    /// Free-fall run used for the g estimate.
    #[serde(default)]
    pub free_fall: Option<VelocityRun>,
    /// Uniform-acceleration cart runs, typically one per driving mass.
    #[serde(default)]
    pub runs: Vec<VelocityRun>,
    /// Newton's-second-law check: driving mass vs measured acceleration.
    #[serde(default)]
    pub newton: Option<NewtonData>,
}

/// One velocity-vs-time run with up to four repeated measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityRun {
    pub label: String,
    /// Shared time axis, seconds.
    pub time_s: Vec<f64>,
    /// Repeated velocity series over `time_s`, m/s. At most four.
    pub velocities: Vec<MeasurementSeries>,
}

/// Driving mass vs measured acceleration for the Newton check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewtonData {
    pub mass_kg: Vec<f64>,
    pub acceleration: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn franck_hertz_defaults_apply_when_fields_absent() {
        let json = r#"{
            "experiment": "franck-hertz",
            "groups": [{"label": "VR=7.0 V", "values": [1.0, 2.0, 3.0]}]
        }"#;
        let request: ExperimentRequest = serde_json::from_str(json).unwrap();
        let ExperimentRequest::FranckHertz(fh) = request else {
            panic!("wrong variant");
        };
        assert!(fh.accelerating_voltage.is_none());
        assert_eq!(fh.resolution, 200);
        assert_eq!(fh.groups[0].label, "VR=7.0 V");
    }

    #[test]
    fn fiber_nested_tags_round_trip() {
        let request = ExperimentRequest::Fiber(FiberRequest::CurrentPower {
            current: vec![1.0, 2.0],
            power: vec![0.1, 0.3],
        });
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"experiment\":\"fiber\""));
        assert!(json.contains("\"plot\":\"current-power\""));
        let back: ExperimentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn thermal_temperatures_are_optional() {
        let json = r#"{
            "experiment": "thermal",
            "pt100_resistance": [121.0, 123.0],
            "ntc_resistance": [4.1, 3.2]
        }"#;
        let request: ExperimentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind(), ExperimentKind::Thermal);
        let ExperimentRequest::Thermal(t) = request else {
            panic!("wrong variant");
        };
        assert!(t.temperatures.is_none());
    }

    #[test]
    fn ultrasound_sections_default_to_absent() {
        let json = r#"{"experiment": "ultrasound"}"#;
        let request: ExperimentRequest = serde_json::from_str(json).unwrap();
        let ExperimentRequest::Ultrasound(u) = request else {
            panic!("wrong variant");
        };
        assert!(u.free_fall.is_none());
        assert!(u.runs.is_empty());
        assert!(u.newton.is_none());
    }

    #[test]
    fn kind_matches_variant() {
        let request = ExperimentRequest::Millikan(MillikanRequest {
            multiples: vec![1.0],
            charges: vec![1.6],
        });
        assert_eq!(request.kind(), ExperimentKind::Millikan);
    }
}

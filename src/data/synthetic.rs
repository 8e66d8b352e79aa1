//! Seeded synthetic measurement sets for every experiment kind.
//!
//! The `demo` subcommand uses these to exercise an experiment end-to-end
//! without bench data. Each generator follows the textbook physics of its
//! experiment and adds small Gaussian measurement noise, so the fitted
//! parameters land near the true values without being suspiciously exact.
//! Generation is deterministic per `(kind, seed)` pair.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{
    DetectorCharacteristic, DiodeCharacteristic, ExperimentKind, ExperimentRequest, FiberRequest,
    FranckHertzRequest, MeasurementSeries, MechanicsRequest, MillikanRequest, NewtonData,
    OscillationData, PhotoDevicesRequest, SolarCellRequest, SpringMassData, ThermalRequest,
    UltrasoundRequest, VelocityRun, default_ld_linear_start, default_resolution,
};

/// Build a demo request for the given experiment kind.
pub fn demo_request(kind: ExperimentKind, seed: u64) -> ExperimentRequest {
    let mut rng = StdRng::seed_from_u64(seed);
    match kind {
        ExperimentKind::Fiber => ExperimentRequest::Fiber(fiber(&mut rng)),
        ExperimentKind::FranckHertz => ExperimentRequest::FranckHertz(franck_hertz(&mut rng)),
        ExperimentKind::Millikan => ExperimentRequest::Millikan(millikan(&mut rng)),
        ExperimentKind::Mechanics => ExperimentRequest::Mechanics(mechanics(&mut rng)),
        ExperimentKind::Thermal => ExperimentRequest::Thermal(thermal(&mut rng)),
        ExperimentKind::PhotoDevices => ExperimentRequest::PhotoDevices(photo_devices(&mut rng)),
        ExperimentKind::SolarCell => ExperimentRequest::SolarCell(solar_cell(&mut rng)),
        ExperimentKind::Ultrasound => ExperimentRequest::Ultrasound(ultrasound(&mut rng)),
    }
}

/// One draw of zero-mean Gaussian noise.
fn jitter(rng: &mut StdRng, sigma: f64) -> f64 {
    // Normal::new only rejects non-finite sigma.
    Normal::new(0.0, sigma).map(|n| n.sample(rng)).unwrap_or(0.0)
}

/// Laser-diode I-U sweep with a conduction knee near 1.5 V.
fn fiber(rng: &mut StdRng) -> FiberRequest {
    let voltage: Vec<f64> = (0..12).map(|i| 1.1 + 0.1 * i as f64).collect();
    let current = voltage
        .iter()
        .map(|&u| {
            let ideal = if u > 1.5 { 45.0 * (u - 1.5) } else { 0.2 * u };
            (ideal + jitter(rng, 0.2)).max(0.0)
        })
        .collect();
    FiberRequest::VoltageCurrent { voltage, current }
}

/// Two retarding-voltage groups over the default 1..=82 V axis, with the
/// classic ~4.9 V peak spacing riding on a rising baseline.
fn franck_hertz(rng: &mut StdRng) -> FranckHertzRequest {
    let axis: Vec<f64> = (1..=82).map(f64::from).collect();
    let mut group = |scale: f64, label: &str| {
        let currents = axis
            .iter()
            .map(|&v| {
                let baseline = 0.22 * v;
                let ripple = 1.8 * (0.5 + v / 82.0) * (v / 4.9 * std::f64::consts::TAU).sin();
                scale * (baseline + ripple) + jitter(rng, 0.08)
            })
            .collect();
        MeasurementSeries::new(label, currents)
    };
    FranckHertzRequest {
        accelerating_voltage: None,
        groups: vec![
            group(1.0, "VG1=1.5 V, VR=7.0 V"),
            group(0.85, "VG1=1.5 V, VR=8.5 V"),
        ],
        resolution: default_resolution(),
    }
}

/// Droplets carrying one to six elementary charges.
fn millikan(rng: &mut StdRng) -> MillikanRequest {
    let multiples = vec![1.0, 1.0, 2.0, 3.0, 3.0, 4.0, 5.0, 6.0];
    let charges = multiples
        .iter()
        .map(|&n| 1.602 * n + jitter(rng, 0.05))
        .collect();
    MillikanRequest { multiples, charges }
}

/// Spring with k = 25 N/m; harmonic oscillation at ω = 3.2 rad/s, A = 10 cm.
fn mechanics(rng: &mut StdRng) -> MechanicsRequest {
    let stiffness = 25.0;
    let base_mass_g = 50.0;
    let added_mass_g = vec![10.0, 20.0, 30.0, 40.0, 50.0];
    let ten_period_s = added_mass_g
        .iter()
        .map(|w| {
            let mass_kg: f64 = (base_mass_g + w) / 1000.0;
            10.0 * std::f64::consts::TAU * (mass_kg / stiffness).sqrt() + jitter(rng, 0.05)
        })
        .collect();

    let omega = 3.2;
    let amplitude = 10.0;
    let displacement_cm = vec![2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let speed_cms = displacement_cm
        .iter()
        .map(|x: &f64| omega * (amplitude * amplitude - x * x).sqrt() + jitter(rng, 0.15))
        .collect();

    MechanicsRequest {
        t2m: SpringMassData {
            base_mass_g,
            added_mass_g,
            ten_period_s,
        },
        v2x2: OscillationData {
            displacement_cm,
            speed_cms,
        },
    }
}

/// Pt100 close to its nominal 0.385 Ω/°C line; NTC with B = 3435 K.
fn thermal(rng: &mut StdRng) -> ThermalRequest {
    let temperatures = vec![55.0, 60.0, 65.0, 70.0, 75.0, 80.0];
    let pt100_resistance = temperatures
        .iter()
        .map(|t| 100.0 * (1.0 + 0.00385 * t) + jitter(rng, 0.08))
        .collect();
    let ntc_resistance = temperatures
        .iter()
        .map(|t| {
            let kelvin = t + 273.15;
            10.0 * (3435.0 * (1.0 / kelvin - 1.0 / 298.15)).exp() + jitter(rng, 0.04)
        })
        .collect();
    ThermalRequest {
        temperatures: None,
        pt100_resistance,
        ntc_resistance,
    }
}

/// LED with a soft linear output; laser diode lasing above ~12 mA so the
/// default linear-region start lands inside the lasing line.
fn photo_devices(rng: &mut StdRng) -> PhotoDevicesRequest {
    let led_current: Vec<f64> = (0..10).map(|i| 2.5 * i as f64).collect();
    let led = DiodeCharacteristic {
        voltage: led_current
            .iter()
            .map(|i| 1.6 + 0.02 * i + jitter(rng, 0.01))
            .collect(),
        power: led_current
            .iter()
            .map(|i| 0.05 * i + jitter(rng, 0.02))
            .collect(),
        current: led_current,
    };

    let ld_current: Vec<f64> = (0..8).map(|i| 5.0 * i as f64).collect();
    let laser_diode = DiodeCharacteristic {
        voltage: ld_current
            .iter()
            .map(|i| 1.4 + 0.03 * i + jitter(rng, 0.01))
            .collect(),
        power: ld_current
            .iter()
            .map(|i| (0.08 * (i - 12.0)).max(0.0) + jitter(rng, 0.01))
            .collect(),
        current: ld_current,
    };

    PhotoDevicesRequest {
        led,
        laser_diode,
        ld_linear_start: default_ld_linear_start(),
        photodiode: detector(rng, 0.02, 880.0, 5.0),
        phototransistor: detector(rng, 0.08, 850.0, 12.0),
    }
}

/// Shared detector generator: linear illuminance response, saturated I-V,
/// Gaussian spectral peak.
fn detector(rng: &mut StdRng, responsivity: f64, peak_nm: f64, peak_current: f64) -> DetectorCharacteristic {
    let illuminance: Vec<f64> = (1..=6).map(|i| 50.0 * i as f64).collect();
    let voltage: Vec<f64> = (1..=8).map(|i| 0.5 * i as f64).collect();
    let wavelength: Vec<f64> = (0..10).map(|i| 500.0 + 50.0 * i as f64).collect();
    DetectorCharacteristic {
        current_vs_illuminance: illuminance
            .iter()
            .map(|e| responsivity * e + jitter(rng, 0.03))
            .collect(),
        current_vs_voltage: voltage
            .iter()
            .map(|v| responsivity * 200.0 + 0.05 * v + jitter(rng, 0.02))
            .collect(),
        current_vs_wavelength: wavelength
            .iter()
            .map(|w| {
                let arg = (w - peak_nm) / 120.0;
                peak_current * (-arg * arg).exp() + jitter(rng, 0.05)
            })
            .collect(),
        illuminance,
        voltage,
        wavelength,
    }
}

/// Silicon cell: exponential dark curve, illuminated curve shifted by the
/// photocurrent, linear Isc and logarithmic Voc illumination response.
fn solar_cell(rng: &mut StdRng) -> SolarCellRequest {
    let voltage: Vec<f64> = (0..9).map(|i| 0.1 * i as f64).collect();
    let dark_current: Vec<f64> = voltage
        .iter()
        .map(|u| 0.02 * ((4.5 * u).exp() - 1.0) + jitter(rng, 0.01))
        .collect();
    let light_current = voltage
        .iter()
        .map(|u| 0.02 * ((4.5 * u).exp() - 1.0) - 8.0 + jitter(rng, 0.02))
        .collect();

    let light_power = vec![20.0, 40.0, 60.0, 80.0, 100.0];
    let short_circuit_current = light_power
        .iter()
        .map(|p| 0.08 * p + 0.2 + jitter(rng, 0.04))
        .collect();
    let open_circuit_voltage = light_power
        .iter()
        .map(|p: &f64| 0.06 * p.ln() + 0.30 + jitter(rng, 0.004))
        .collect();

    SolarCellRequest {
        dark_voltage: voltage.clone(),
        dark_current,
        light_voltage: voltage,
        light_current,
        light_power,
        short_circuit_current,
        open_circuit_voltage,
        relative_intensity: Some(vec![0.2, 0.4, 0.6, 0.8, 1.0]),
    }
}

/// Free fall near g, three cart runs, and a Newton check consistent with
/// the cart accelerations.
fn ultrasound(rng: &mut StdRng) -> UltrasoundRequest {
    let time_s: Vec<f64> = (0..9).map(|i| 0.05 * i as f64).collect();

    let mut velocity_run = |label: &str, slope: f64, intercept: f64, repeats: usize| {
        let velocities = (1..=repeats)
            .map(|r| {
                let values = time_s
                    .iter()
                    .map(|&t| slope * t + intercept + jitter(rng, 0.02))
                    .collect();
                MeasurementSeries::new(format!("repeat {r}"), values)
            })
            .collect();
        VelocityRun {
            label: label.to_string(),
            time_s: time_s.clone(),
            velocities,
        }
    };

    let free_fall = velocity_run("free fall", 9.8, 0.12, 3);
    let runs = vec![
        velocity_run("cart, m = 20 g", 1.6, 0.05, 2),
        velocity_run("cart, m = 30 g", 2.4, 0.05, 2),
        velocity_run("cart, m = 40 g", 3.2, 0.05, 2),
    ];

    let mass_kg = vec![0.02, 0.03, 0.04, 0.05];
    let acceleration = mass_kg
        .iter()
        .map(|m| 80.0 * m + jitter(rng, 0.03))
        .collect();

    UltrasoundRequest {
        free_fall: Some(free_fall),
        runs,
        newton: Some(NewtonData {
            mass_kg,
            acceleration,
        }),
    }
}

//! Plot descriptions emitted by the fit layer.
//!
//! The fitting core never rasterizes anything. Each experiment produces a
//! list of `Figure`s holding the raw series, densely sampled fitted curves,
//! axis labels, and an annotation block; an external renderer turns those
//! into images. Keeping this a pure value layer is what keeps the fit
//! functions side-effect-free and testable.

use serde::{Deserialize, Serialize};

/// How a renderer should draw one series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesStyle {
    /// Individual markers only (raw measurements).
    Scatter,
    /// Connected line only (fitted curves).
    Line,
    /// Markers joined by a line (the standard raw-sweep look).
    ScatterLine,
}

/// One plottable series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub style: SeriesStyle,
}

impl SeriesSpec {
    pub fn scatter(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            style: SeriesStyle::Scatter,
        }
    }

    pub fn line(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            style: SeriesStyle::Line,
        }
    }

    pub fn scatter_line(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            style: SeriesStyle::ScatterLine,
        }
    }
}

/// A complete figure description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<SeriesSpec>,
    /// Text block overlaid on the figure (fit parameters, references).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl Figure {
    /// Standard raw-sweep figure: a measured scatter plus a trend line
    /// through the same points.
    pub fn sweep(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        x: &[f64],
        y: &[f64],
    ) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: vec![
                SeriesSpec::scatter("measured points", x.to_vec(), y.to_vec()),
                SeriesSpec::line("trend", x.to_vec(), y.to_vec()),
            ],
            annotation: None,
        }
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// `n` is clamped to at least 2 so the endpoints are always present.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let n = n.max(2);
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Minimum and maximum of a slice, ignoring NaNs.
///
/// Returns `None` for an empty slice.
pub fn span(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_endpoints() {
        let xs = linspace(1.0, 3.0, 5);
        assert_eq!(xs.len(), 5);
        assert!((xs[0] - 1.0).abs() < 1e-12);
        assert!((xs[4] - 3.0).abs() < 1e-12);
        assert!((xs[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn linspace_clamps_to_two_points() {
        let xs = linspace(0.0, 1.0, 0);
        assert_eq!(xs, vec![0.0, 1.0]);
    }

    #[test]
    fn span_finds_extremes() {
        assert_eq!(span(&[3.0, 1.0, 2.0]), Some((1.0, 3.0)));
        assert_eq!(span(&[]), None);
    }

    #[test]
    fn sweep_builds_scatter_and_trend() {
        let fig = Figure::sweep("t", "x", "y", &[1.0, 2.0], &[3.0, 4.0]);
        assert_eq!(fig.series.len(), 2);
        assert_eq!(fig.series[0].style, SeriesStyle::Scatter);
        assert_eq!(fig.series[1].style, SeriesStyle::Line);
        assert_eq!(fig.series[0].x, fig.series[1].x);
    }
}

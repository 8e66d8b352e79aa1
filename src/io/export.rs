//! Result exports.
//!
//! Two artifacts cover the downstream consumers:
//!
//! - a per-fit CSV summary, easy to consume in spreadsheets
//! - the full output JSON (fits + figures), the portable bundle an
//!   external renderer draws from

use std::fs::File;
use std::path::Path;

use crate::domain::ExperimentOutput;
use crate::error::AppError;

/// Write one CSV row per fitted curve.
pub fn write_fits_csv(path: &Path, output: &ExperimentOutput) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["experiment", "fit", "coefficients", "r_squared", "derived"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for fit in &output.fits {
        let coefficients = fit
            .coefficients
            .iter()
            .map(|c| format!("{c:.10}"))
            .collect::<Vec<_>>()
            .join(" ");
        let derived = fit
            .derived
            .iter()
            .map(|d| {
                if d.unit.is_empty() {
                    format!("{}={:.6}", d.symbol, d.value)
                } else {
                    format!("{}={:.6} {}", d.symbol, d.value, d.unit)
                }
            })
            .collect::<Vec<_>>()
            .join("; ");
        writer
            .write_record([
                output.kind.display_name(),
                fit.label.as_str(),
                coefficients.as_str(),
                format!("{:.10}", fit.r_squared).as_str(),
                derived.as_str(),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the full output (fits + figures) as pretty JSON.
pub fn write_output_json(path: &Path, output: &ExperimentOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create output JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, output)
        .map_err(|e| AppError::new(2, format!("Failed to write output JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DerivedQuantity, ExperimentKind, FitResult};
    use crate::render::Figure;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("labfit-export-{}-{name}", std::process::id()));
        path
    }

    fn sample_output() -> ExperimentOutput {
        ExperimentOutput {
            kind: ExperimentKind::Millikan,
            fits: vec![FitResult {
                label: "origin-forced linear fit".to_string(),
                coefficients: vec![1.6],
                r_squared: 0.999,
                derived: vec![DerivedQuantity::new(
                    "elementary charge estimate",
                    "e",
                    1.6,
                    "×10⁻¹⁹ C",
                )],
            }],
            figures: vec![Figure::sweep("q-n", "n", "q", &[1.0, 2.0], &[1.6, 3.2])],
        }
    }

    #[test]
    fn csv_export_has_a_row_per_fit() {
        let path = temp_path("fits.csv");
        write_fits_csv(&path, &sample_output()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "experiment,fit,coefficients,r_squared,derived"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Millikan oil drop,origin-forced linear fit,"));
        assert!(row.contains("e=1.600000"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn json_export_round_trips() {
        let path = temp_path("output.json");
        write_output_json(&path, &sample_output()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: ExperimentOutput = serde_json::from_str(&text).unwrap();
        assert_eq!(back.kind, ExperimentKind::Millikan);
        assert_eq!(back.fits.len(), 1);
        assert_eq!(back.figures[0].series.len(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unwritable_path_is_a_config_error() {
        let err = write_output_json(Path::new("/nonexistent/dir/out.json"), &sample_output())
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

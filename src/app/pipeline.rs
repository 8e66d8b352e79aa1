//! Shared "fit pipeline" logic used by every front-end mode.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! request -> validate/fit -> derived quantities -> figures -> exports
//!
//! The CLI modes then focus on where requests come from (a file, the
//! synthetic generator, the batch queue) and on presentation.

use crate::cli::ExportArgs;
use crate::domain::{ExperimentOutput, ExperimentRequest};
use crate::error::AppError;

/// Execute one fit request and return its complete output.
pub fn run_request(request: &ExperimentRequest) -> Result<ExperimentOutput, AppError> {
    let output = crate::fit::fit_request(request)?;
    Ok(output)
}

/// Write the optional export artifacts for one output.
pub fn write_exports(output: &ExperimentOutput, export: &ExportArgs) -> Result<(), AppError> {
    if let Some(path) = &export.export {
        crate::io::write_fits_csv(path, output)?;
    }
    if let Some(path) = &export.export_figures {
        crate::io::write_output_json(path, output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExperimentKind, MillikanRequest};

    #[test]
    fn run_request_produces_fits_and_figures() {
        let request = ExperimentRequest::Millikan(MillikanRequest {
            multiples: vec![1.0, 2.0, 3.0],
            charges: vec![1.6, 3.2, 4.8],
        });
        let output = run_request(&request).unwrap();
        assert_eq!(output.kind, ExperimentKind::Millikan);
        assert_eq!(output.fits.len(), 1);
        assert!(!output.figures.is_empty());
    }

    #[test]
    fn fit_errors_surface_as_data_exit_code() {
        let request = ExperimentRequest::Millikan(MillikanRequest {
            multiples: vec![1.0, 2.0],
            charges: vec![1.6],
        });
        let err = run_request(&request).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn empty_export_args_write_nothing() {
        let request = ExperimentRequest::Millikan(MillikanRequest {
            multiples: vec![1.0, 2.0, 3.0],
            charges: vec![1.6, 3.2, 4.8],
        });
        let output = run_request(&request).unwrap();
        write_exports(&output, &ExportArgs::default()).unwrap();
    }
}

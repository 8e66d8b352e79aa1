//! Request loading.
//!
//! Requests travel as JSON documents tagged with their experiment kind;
//! the schema is defined by `domain::ExperimentRequest`. Parse errors are
//! configuration errors (exit code 2), not data errors: the payload never
//! reached the fit layer.

use std::fs::File;
use std::path::Path;

use crate::domain::ExperimentRequest;
use crate::error::AppError;

/// Read an experiment request from a JSON file.
pub fn read_request_json(path: &Path) -> Result<ExperimentRequest, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open request JSON '{}': {e}", path.display())))?;
    let request: ExperimentRequest = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid request JSON '{}': {e}", path.display())))?;
    Ok(request)
}

/// Write a request as pretty JSON, in the same schema `read_request_json`
/// accepts. Used by `demo --save-request` to produce reusable fixtures.
pub fn write_request_json(path: &Path, request: &ExperimentRequest) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create request JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, request)
        .map_err(|e| AppError::new(2, format!("Failed to write request JSON: {e}")))?;
    Ok(())
}

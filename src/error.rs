//! Error types for the fitting core and the application shell.
//!
//! The fitting core reports typed `FitError`s so callers can tell bad input
//! shapes apart from genuine numerical failures. The binary maps everything
//! onto `AppError`, which carries the process exit code:
//!
//! - `2`: configuration / input problems (bad CLI usage, unreadable files)
//! - `3`: measurement data that cannot be fitted (shape, emptiness, domain)
//! - `4`: a fit that ran but failed to converge

use thiserror::Error;

/// Errors produced while validating or fitting measurement data.
///
/// Every variant is local to a single fit call; the core holds no state
/// across calls and never retries on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Two series that must share an index axis differ in length.
    #[error("series '{left}' has {left_len} point(s) but '{right}' has {right_len}; paired series must be equally long")]
    ShapeMismatch {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },

    /// Fewer points than the fit's degrees of freedom require.
    #[error("'{series}' has {got} point(s); at least {min} required")]
    InsufficientData {
        series: String,
        got: usize,
        min: usize,
    },

    /// Input that makes the fitting problem itself singular.
    #[error("degenerate input in {context}: {detail}")]
    DegenerateInput { context: String, detail: String },

    /// A value outside the mathematical domain of the requested model.
    #[error("domain violation in {context}: {detail}")]
    Domain { context: String, detail: String },

    /// An iterative fit exhausted its budget without settling.
    #[error("{context} did not converge within {iterations} iteration(s)")]
    Convergence { context: String, iterations: usize },
}

impl FitError {
    pub fn shape_mismatch(
        left: impl Into<String>,
        left_len: usize,
        right: impl Into<String>,
        right_len: usize,
    ) -> Self {
        Self::ShapeMismatch {
            left: left.into(),
            left_len,
            right: right.into(),
            right_len,
        }
    }

    pub fn insufficient(series: impl Into<String>, got: usize, min: usize) -> Self {
        Self::InsufficientData {
            series: series.into(),
            got,
            min,
        }
    }

    pub fn degenerate(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::DegenerateInput {
            context: context.into(),
            detail: detail.into(),
        }
    }

    pub fn domain(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Domain {
            context: context.into(),
            detail: detail.into(),
        }
    }

    pub fn convergence(context: impl Into<String>, iterations: usize) -> Self {
        Self::Convergence {
            context: context.into(),
            iterations,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match &err {
            FitError::Convergence { .. } => 4,
            _ => 3,
        };
        AppError::new(exit_code, err.to_string())
    }
}

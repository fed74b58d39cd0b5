//! Error types for the pf-app service layer.

use std::path::PathBuf;

/// Unified error for the CLI: backend errors are flattened to strings, except
/// divergence which callers may want to match on.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Case error: {0}")]
    Project(String),

    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case validation failed: {0}")]
    Validation(String),

    #[error("Runtime compilation failed: {0}")]
    Compile(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Numerical divergence: {field} is {value} at node {index}")]
    NumericalDivergence {
        field: &'static str,
        index: usize,
        value: f64,
    },

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<pf_project::ProjectError> for AppError {
    fn from(err: pf_project::ProjectError) -> Self {
        match err {
            pf_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<pf_project::ValidationError> for AppError {
    fn from(err: pf_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<pf_fluids::FluidError> for AppError {
    fn from(err: pf_fluids::FluidError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<pf_solver::SolverError> for AppError {
    fn from(err: pf_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<pf_core::PfError> for AppError {
    fn from(err: pf_core::PfError) -> Self {
        match err {
            pf_core::PfError::NonFinite { what, index, value } => AppError::NumericalDivergence {
                field: what,
                index,
                value,
            },
            other => AppError::Solver(other.to_string()),
        }
    }
}

impl From<pf_results::ResultsError> for AppError {
    fn from(err: pf_results::ResultsError) -> Self {
        match err {
            pf_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}

//! Error types for solver operations.

use pf_core::error::PfError;
use pf_fluids::FluidError;
use thiserror::Error;

/// Errors the solver reports.
///
/// Divergence, sub-solidus property evaluation and inner-loop non-convergence
/// are absent: they never halt a run. `SingularSystem` only
/// appears when pivot checking is switched on.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Singular tridiagonal system: zero or non-finite pivot at row {row}")]
    SingularSystem { row: usize },

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),

    #[error("Core error: {0}")]
    Core(#[from] PfError),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub(crate) fn config(what: impl Into<String>) -> Self {
        SolverError::InvalidConfig { what: what.into() }
    }
}

impl From<SolverError> for PfError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidConfig { .. } => PfError::InvalidArg {
                what: "solver configuration",
            },
            SolverError::SingularSystem { .. } => PfError::InvalidArg {
                what: "singular system",
            },
            SolverError::Fluid(_) => PfError::InvalidArg { what: "fluid" },
            SolverError::Core(inner) => inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_row() {
        let err = SolverError::SingularSystem { row: 7 };
        assert!(err.to_string().contains("row 7"));
    }

    #[test]
    fn converts_into_core_error() {
        let err: PfError = SolverError::config("nodes").into();
        assert!(matches!(err, PfError::InvalidArg { .. }));
    }
}

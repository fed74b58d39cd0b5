//! Fluid property errors.

use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors raised while building a property model.
///
/// Property evaluation itself never fails; out-of-range temperatures only
/// produce a diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative density, viscosity, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Inconsistent correlation coefficients.
    #[error("Invalid coefficients: {what}")]
    InvalidCoefficients { what: &'static str },
}

//! Property model trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use pf_core::units::{Conductivity, Density, DynVisc, SpecHeatCapacity, Temperature};

/// Material properties evaluated at a single temperature.
///
/// Batches the four queries the solver needs per node so a model can share
/// intermediate terms and emit at most one range diagnostic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialState {
    /// Density [kg/m³]
    pub rho: Density,

    /// Dynamic viscosity [Pa·s]
    pub mu: DynVisc,

    /// Thermal conductivity [W/(m·K)]
    pub k: Conductivity,

    /// Specific heat capacity at constant pressure [J/(kg·K)]
    pub cp: SpecHeatCapacity,
}

/// Trait for temperature-dependent property models.
///
/// Implementations must be thread-safe (Send + Sync) and deterministic: the same
/// temperature always yields the same values. Evaluation never fails; a model
/// queried outside its validity range returns an extrapolated value and records
/// a diagnostic.
pub trait PropertyModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Density [kg/m³].
    fn density(&self, t: Temperature) -> Density;

    /// Dynamic viscosity [Pa·s].
    fn viscosity(&self, t: Temperature) -> DynVisc;

    /// Thermal conductivity [W/(m·K)].
    fn conductivity(&self, t: Temperature) -> Conductivity;

    /// Specific heat capacity [J/(kg·K)].
    fn specific_heat(&self, t: Temperature) -> SpecHeatCapacity;

    /// All four properties in one call.
    ///
    /// Default implementation calls the individual methods; models with range
    /// diagnostics override it so one call emits at most one diagnostic.
    fn state(&self, t: Temperature) -> MaterialState {
        MaterialState {
            rho: self.density(t),
            mu: self.viscosity(t),
            k: self.conductivity(t),
            cp: self.specific_heat(t),
        }
    }

    /// Number of out-of-range evaluations diagnosed so far.
    fn range_warnings(&self) -> u64 {
        0
    }
}

/// Validation helpers for model construction.
pub(crate) mod validation {
    use super::*;

    /// Ensure a constant property is positive and finite.
    pub fn validate_positive(v: f64, what: &'static str) -> FluidResult<()> {
        if !v.is_finite() || v <= 0.0 {
            return Err(FluidError::NonPhysical { what });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;

    #[test]
    fn validate_positive_rejects_bad_values() {
        assert!(validate_positive(1000.0, "density").is_ok());
        assert!(validate_positive(0.0, "density").is_err());
        assert!(validate_positive(-1.0, "density").is_err());
        assert!(validate_positive(f64::NAN, "density").is_err());
    }
}

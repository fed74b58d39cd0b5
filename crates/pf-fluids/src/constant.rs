//! Constant-property material model.

use crate::error::FluidResult;
use crate::model::validation::validate_positive;
use crate::model::{MaterialState, PropertyModel};
use pf_core::units::{
    Conductivity, Density, DynVisc, SpecHeatCapacity, Temperature, kgpm3, pas, wpmk,
};

/// Temperature-independent properties, used for verification cases where the
/// flow must decouple from the energy equation.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantProperties {
    state: MaterialState,
}

impl ConstantProperties {
    pub fn new(density: f64, viscosity: f64, conductivity: f64, specific_heat: f64) -> FluidResult<Self> {
        validate_positive(density, "density must be positive and finite")?;
        validate_positive(viscosity, "viscosity must be positive and finite")?;
        validate_positive(conductivity, "conductivity must be positive and finite")?;
        validate_positive(specific_heat, "specific heat must be positive and finite")?;
        Ok(Self {
            state: MaterialState {
                rho: kgpm3(density),
                mu: pas(viscosity),
                k: wpmk(conductivity),
                cp: specific_heat,
            },
        })
    }

    /// Water-like properties near room temperature.
    pub fn water() -> Self {
        Self {
            state: MaterialState {
                rho: kgpm3(1000.0),
                mu: pas(1.0e-3),
                k: wpmk(0.6),
                cp: 4180.0,
            },
        }
    }
}

impl PropertyModel for ConstantProperties {
    fn name(&self) -> &str {
        "constant"
    }

    fn density(&self, _t: Temperature) -> Density {
        self.state.rho
    }

    fn viscosity(&self, _t: Temperature) -> DynVisc {
        self.state.mu
    }

    fn conductivity(&self, _t: Temperature) -> Conductivity {
        self.state.k
    }

    fn specific_heat(&self, _t: Temperature) -> SpecHeatCapacity {
        self.state.cp
    }

    fn state(&self, _t: Temperature) -> MaterialState {
        self.state
    }
}

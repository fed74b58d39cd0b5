//! Per-node material property cache.

use crate::ASSEMBLY_MIN_CHUNK;
use pf_core::units::k;
use pf_fluids::PropertyModel;
use rayon::prelude::*;

/// Properties at every node, evaluated once per timestep.
///
/// Temperature is frozen during the flow iteration, so caching is equivalent
/// to evaluating the model inside every assembly pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyField {
    /// Density [kg/m³]
    pub rho: Vec<f64>,
    /// Dynamic viscosity [Pa·s]
    pub mu: Vec<f64>,
    /// Conductivity [W/(m·K)]
    pub k: Vec<f64>,
    /// Specific heat [J/(kg·K)]
    pub cp: Vec<f64>,
}

impl PropertyField {
    pub fn evaluate(model: &dyn PropertyModel, temperature: &[f64]) -> Self {
        let states: Vec<_> = temperature
            .par_iter()
            .with_min_len(ASSEMBLY_MIN_CHUNK)
            .map(|&t| model.state(k(t)))
            .collect();

        let mut field = Self {
            rho: Vec::with_capacity(states.len()),
            mu: Vec::with_capacity(states.len()),
            k: Vec::with_capacity(states.len()),
            cp: Vec::with_capacity(states.len()),
        };
        for s in states {
            field.rho.push(s.rho.value);
            field.mu.push(s.mu.value);
            field.k.push(s.k.value);
            field.cp.push(s.cp);
        }
        field
    }

    /// Uniform field, handy for tests and constant-property cases.
    pub fn uniform(nodes: usize, rho: f64, mu: f64, k: f64, cp: f64) -> Self {
        Self {
            rho: vec![rho; nodes],
            mu: vec![mu; nodes],
            k: vec![k; nodes],
            cp: vec![cp; nodes],
        }
    }

    pub fn len(&self) -> usize {
        self.rho.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rho.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_fluids::{ConstantProperties, SodiumModel};

    #[test]
    fn constant_model_fills_uniform_field() {
        let water = ConstantProperties::water();
        let field = PropertyField::evaluate(&water, &[300.0, 350.0, 400.0]);
        assert_eq!(field, PropertyField::uniform(3, 1000.0, 1e-3, 0.6, 4180.0));
    }

    #[test]
    fn sodium_field_follows_temperature() {
        let na = SodiumModel::default();
        let temps: Vec<f64> = (0..600).map(|i| 400.0 + i as f64).collect();
        let field = PropertyField::evaluate(&na, &temps);
        assert_eq!(field.len(), 600);
        assert!(field.rho.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(na.range_warnings(), 0);
    }
}

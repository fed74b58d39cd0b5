//! Case file schema.
//!
//! Every section except `name` has serde defaults reproducing the reference
//! liquid-sodium case, so a minimal file only needs a name and a version.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub geometry: GeometryDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialDef>,
    #[serde(default)]
    pub physics: PhysicsDef,
    #[serde(default)]
    pub time: TimeDef,
    #[serde(default)]
    pub coupling: CouplingDef,
    #[serde(default)]
    pub boundary: BoundaryDef,
    #[serde(default)]
    pub sources: SourcesDef,
    /// Report singular tridiagonal systems instead of propagating NaN.
    #[serde(default)]
    pub check_pivots: bool,
}

impl Default for CaseFile {
    fn default() -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: "sodium-bed".to_string(),
            geometry: GeometryDef::default(),
            material: Some(MaterialDef::Sodium { coefficients: None }),
            physics: PhysicsDef::default(),
            time: TimeDef::default(),
            coupling: CouplingDef::default(),
            boundary: BoundaryDef::default(),
            sources: SourcesDef::default(),
            check_pivots: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryDef {
    pub length_m: f64,
    pub nodes: usize,
}

impl Default for GeometryDef {
    fn default() -> Self {
        Self {
            length_m: 0.01,
            nodes: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum MaterialDef {
    Sodium {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coefficients: Option<SodiumCoefficientsDef>,
    },
    Constant {
        density_kg_m3: f64,
        viscosity_pa_s: f64,
        conductivity_w_m_k: f64,
        specific_heat_j_kg_k: f64,
    },
}

/// Override for the sodium correlation coefficients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SodiumCoefficientsDef {
    pub critical_temperature_k: f64,
    pub solidification_k: f64,
    pub max_valid_k: f64,
    pub density: [f64; 3],
    pub conductivity: [f64; 4],
    pub specific_heat: [f64; 3],
    pub viscosity: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhysicsDef {
    pub permeability_m2: f64,
    #[serde(default)]
    pub forchheimer: f64,
    pub initial_temperature_k: f64,
    #[serde(default)]
    pub initial_velocity_m_s: f64,
}

impl Default for PhysicsDef {
    fn default() -> Self {
        Self {
            permeability_m2: 1e-6,
            forchheimer: 0.0,
            initial_temperature_k: 300.0,
            initial_velocity_m_s: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeDef {
    pub dt_s: f64,
    pub t_max_s: f64,
}

impl Default for TimeDef {
    fn default() -> Self {
        Self {
            dt_s: 1e-4,
            t_max_s: 0.5,
        }
    }
}

impl TimeDef {
    /// Number of timesteps covering `t_max_s`, rounded to the nearest step.
    pub fn steps(&self) -> usize {
        (self.t_max_s / self.dt_s).round().max(0.0) as usize
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum WeightsDef {
    Simple,
    #[default]
    Simplec,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OutletGhostDef {
    #[default]
    Reflected,
    FixedPressure,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TransientBasisDef {
    Current,
    #[default]
    PreviousStep,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CouplingDef {
    pub max_inner_iterations: usize,
    pub tolerance: f64,
    pub corrector_count: usize,
    pub pressure_relaxation: f64,
    pub velocity_relaxation: f64,
    pub rhie_chow: bool,
    pub outlet_ghost: OutletGhostDef,
    pub weights: WeightsDef,
    pub transient_basis: TransientBasisDef,
}

impl Default for CouplingDef {
    fn default() -> Self {
        Self {
            max_inner_iterations: 1000,
            tolerance: 1e-8,
            corrector_count: 1,
            pressure_relaxation: 0.5,
            velocity_relaxation: 1.0,
            rhie_chow: true,
            outlet_ghost: OutletGhostDef::Reflected,
            weights: WeightsDef::Simplec,
            transient_basis: TransientBasisDef::PreviousStep,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum BoundaryKindDef {
    Dirichlet { value: f64 },
    ZeroGradient,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundaryDef {
    pub inlet_velocity_m_s: f64,
    pub outlet_pressure_pa: f64,
    pub outlet_velocity: BoundaryKindDef,
    pub inlet_temperature: BoundaryKindDef,
    pub outlet_temperature: BoundaryKindDef,
}

impl Default for BoundaryDef {
    fn default() -> Self {
        Self {
            inlet_velocity_m_s: 0.01,
            outlet_pressure_pa: 0.0,
            outlet_velocity: BoundaryKindDef::ZeroGradient,
            inlet_temperature: BoundaryKindDef::Dirichlet { value: 1000.0 },
            outlet_temperature: BoundaryKindDef::Dirichlet { value: 500.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoneDef {
    /// Start as a fraction of the pipe length
    pub start: f64,
    /// End as a fraction of the pipe length
    pub end: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SourceProfileDef {
    Zones {
        #[serde(default)]
        zones: Vec<ZoneDef>,
    },
    /// Alternating +magnitude/−magnitude between consecutive breakpoints.
    Alternating { breakpoints: Vec<f64>, magnitude: f64 },
}

impl Default for SourceProfileDef {
    fn default() -> Self {
        SourceProfileDef::Zones { zones: Vec::new() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct SourcesDef {
    /// kg/(m³·s)
    pub mass: SourceProfileDef,
    /// N/m³
    pub momentum: SourceProfileDef,
    /// W/m³
    pub energy: SourceProfileDef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_case_steps() {
        let case = CaseFile::default();
        assert_eq!(case.time.steps(), 5000);
        assert_eq!(case.geometry.nodes, 500);
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = "version: 1\nname: tiny\n";
        let case: CaseFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(case.name, "tiny");
        assert_eq!(case.coupling, CouplingDef::default());
        assert_eq!(case.boundary, BoundaryDef::default());
        assert!(case.material.is_none());
    }

    #[test]
    fn tagged_enums_read_naturally() {
        let yaml = r#"
version: 1
name: water-column
material:
  type: Constant
  density_kg_m3: 1000.0
  viscosity_pa_s: 0.001
  conductivity_w_m_k: 0.6
  specific_heat_j_kg_k: 4180.0
coupling:
  outlet_ghost: FixedPressure
boundary:
  outlet_temperature:
    type: ZeroGradient
sources:
  energy:
    type: Alternating
    breakpoints: [0.0, 0.5, 1.0]
    magnitude: 1.0e6
"#;
        let case: CaseFile = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(case.material, Some(MaterialDef::Constant { .. })));
        assert_eq!(case.coupling.outlet_ghost, OutletGhostDef::FixedPressure);
        assert_eq!(case.coupling.corrector_count, 1);
        assert_eq!(case.boundary.outlet_temperature, BoundaryKindDef::ZeroGradient);
        assert_eq!(
            case.boundary.inlet_temperature,
            BoundaryKindDef::Dirichlet { value: 1000.0 }
        );
        match &case.sources.energy {
            SourceProfileDef::Alternating { breakpoints, .. } => assert_eq!(breakpoints.len(), 3),
            other => panic!("unexpected profile {other:?}"),
        }
    }
}

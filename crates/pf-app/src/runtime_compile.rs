//! Compile a case file into a solver configuration and material model.

use std::sync::Arc;

use pf_fluids::{ConstantProperties, PropertyModel, SodiumCoefficients, SodiumModel};
use pf_project::schema::{
    BoundaryKindDef, CaseFile, MaterialDef, OutletGhostDef, SourceProfileDef, TransientBasisDef,
    WeightsDef,
};
use pf_solver::{
    BoundaryConfig, BoundaryKind, CorrectionWeights, CouplingConfig, GeometryConfig, OutletGhost,
    PhysicsConfig, SolverConfig, SourceConfig, SourceProfile, SourceZone, TimeConfig,
    TransientBasis,
};

use crate::error::{AppError, AppResult};

/// Everything the time stepper needs.
#[derive(Clone)]
pub struct CaseRuntime {
    pub config: SolverConfig,
    pub model: Arc<dyn PropertyModel>,
}

impl std::fmt::Debug for CaseRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseRuntime")
            .field("config", &self.config)
            .field("model", &self.model.name())
            .finish()
    }
}

pub fn compile_case(case: &CaseFile) -> AppResult<CaseRuntime> {
    let config = SolverConfig {
        geometry: GeometryConfig {
            length: case.geometry.length_m,
            nodes: case.geometry.nodes,
        },
        physics: PhysicsConfig {
            permeability: case.physics.permeability_m2,
            forchheimer: case.physics.forchheimer,
            initial_temperature: case.physics.initial_temperature_k,
            initial_velocity: case.physics.initial_velocity_m_s,
        },
        time: TimeConfig {
            dt: case.time.dt_s,
            steps: case.time.steps(),
        },
        coupling: CouplingConfig {
            max_inner_iterations: case.coupling.max_inner_iterations,
            tolerance: case.coupling.tolerance,
            corrector_count: case.coupling.corrector_count,
            pressure_relaxation: case.coupling.pressure_relaxation,
            velocity_relaxation: case.coupling.velocity_relaxation,
            rhie_chow: case.coupling.rhie_chow,
            outlet_ghost: match case.coupling.outlet_ghost {
                OutletGhostDef::Reflected => OutletGhost::Reflected,
                OutletGhostDef::FixedPressure => OutletGhost::FixedPressure,
            },
            weights: match case.coupling.weights {
                WeightsDef::Simple => CorrectionWeights::Simple,
                WeightsDef::Simplec => CorrectionWeights::Simplec,
            },
            transient_basis: match case.coupling.transient_basis {
                TransientBasisDef::Current => TransientBasis::Current,
                TransientBasisDef::PreviousStep => TransientBasis::PreviousStep,
            },
        },
        boundary: BoundaryConfig {
            inlet_velocity: case.boundary.inlet_velocity_m_s,
            outlet_pressure: case.boundary.outlet_pressure_pa,
            outlet_velocity: boundary_kind(case.boundary.outlet_velocity),
            inlet_temperature: boundary_kind(case.boundary.inlet_temperature),
            outlet_temperature: boundary_kind(case.boundary.outlet_temperature),
        },
        sources: SourceConfig {
            mass: source_profile(&case.sources.mass),
            momentum: source_profile(&case.sources.momentum),
            energy: source_profile(&case.sources.energy),
        },
        check_pivots: case.check_pivots,
    };

    config
        .validate()
        .map_err(|e| AppError::Compile(e.to_string()))?;

    let model = build_property_model(case.material.as_ref())?;
    tracing::debug!(
        case = %case.name,
        material = model.name(),
        nodes = config.geometry.nodes,
        steps = config.time.steps,
        "compiled case"
    );

    Ok(CaseRuntime { config, model })
}

pub fn build_property_model(material: Option<&MaterialDef>) -> AppResult<Arc<dyn PropertyModel>> {
    let model: Arc<dyn PropertyModel> = match material {
        None => {
            return Err(AppError::Compile(
                "case has no material section".to_string(),
            ));
        }
        Some(MaterialDef::Sodium { coefficients: None }) => Arc::new(SodiumModel::default()),
        Some(MaterialDef::Sodium {
            coefficients: Some(c),
        }) => Arc::new(SodiumModel::new(SodiumCoefficients {
            critical_temperature_k: c.critical_temperature_k,
            solidification_k: c.solidification_k,
            max_valid_k: c.max_valid_k,
            density: c.density,
            conductivity: c.conductivity,
            specific_heat: c.specific_heat,
            viscosity: c.viscosity,
        })?),
        Some(MaterialDef::Constant {
            density_kg_m3,
            viscosity_pa_s,
            conductivity_w_m_k,
            specific_heat_j_kg_k,
        }) => Arc::new(ConstantProperties::new(
            *density_kg_m3,
            *viscosity_pa_s,
            *conductivity_w_m_k,
            *specific_heat_j_kg_k,
        )?),
    };
    Ok(model)
}

fn boundary_kind(def: BoundaryKindDef) -> BoundaryKind {
    match def {
        BoundaryKindDef::Dirichlet { value } => BoundaryKind::Dirichlet(value),
        BoundaryKindDef::ZeroGradient => BoundaryKind::ZeroGradient,
    }
}

fn source_profile(def: &SourceProfileDef) -> SourceProfile {
    match def {
        SourceProfileDef::Zones { zones } => SourceProfile::new(
            zones
                .iter()
                .map(|z| SourceZone {
                    start: z.start,
                    end: z.end,
                    value: z.value,
                })
                .collect(),
        ),
        SourceProfileDef::Alternating {
            breakpoints,
            magnitude,
        } => SourceProfile::alternating(breakpoints, *magnitude),
    }
}

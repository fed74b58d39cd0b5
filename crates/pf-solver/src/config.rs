//! Read-only solver configuration.
//!
//! All values are SI: metres, seconds, pascals, kelvin.

use crate::error::{SolverError, SolverResult};
use crate::sources::SourceProfile;

/// Boundary condition for a field at one end of the pipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryKind {
    /// Fixed value.
    Dirichlet(f64),
    /// Boundary node copies its interior neighbour.
    ZeroGradient,
}

impl BoundaryKind {
    pub fn dirichlet_value(&self) -> Option<f64> {
        match self {
            BoundaryKind::Dirichlet(v) => Some(*v),
            BoundaryKind::ZeroGradient => None,
        }
    }
}

/// Field the implicit transient terms are evaluated against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransientBasis {
    /// Latest iterate (pseudo-transient relaxation).
    Current,
    /// Backups taken at the start of the timestep (backward Euler).
    #[default]
    PreviousStep,
}

/// Pseudo-velocity weights used by Rhie-Chow, the pressure-correction
/// conductances and the velocity correction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CorrectionWeights {
    /// `1 / a_P`
    Simple,
    /// `1 / (a_P - Σ a_nb)`
    #[default]
    Simplec,
}

/// Right-hand ghost of the padded pressure buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutletGhost {
    /// `2p_out − p_{N−2}`: linear profiles stay linear through the outlet face.
    #[default]
    Reflected,
    /// The fixed outlet pressure itself.
    FixedPressure,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeometryConfig {
    /// Pipe length [m]
    pub length: f64,
    /// Number of mesh nodes (at least 3)
    pub nodes: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Permeability K [m²]
    pub permeability: f64,
    /// Forchheimer coefficient CF [-], 0 disables quadratic drag
    pub forchheimer: f64,
    /// Uniform initial temperature [K]
    pub initial_temperature: f64,
    /// Uniform initial interior velocity [m/s]
    pub initial_velocity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimeConfig {
    /// Timestep [s]
    pub dt: f64,
    /// Number of timesteps
    pub steps: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CouplingConfig {
    /// Inner iteration budget per timestep
    pub max_inner_iterations: usize,
    /// Velocity-change tolerance [m/s]
    pub tolerance: f64,
    /// Pressure-correction passes per inner iteration (1 = SIMPLE/SIMPLEC, 2+ = PISO)
    pub corrector_count: usize,
    /// α_p in (0, 1]
    pub pressure_relaxation: f64,
    /// α_u in (0, 1]
    pub velocity_relaxation: f64,
    /// Rhie-Chow face correction on/off
    pub rhie_chow: bool,
    pub outlet_ghost: OutletGhost,
    pub weights: CorrectionWeights,
    pub transient_basis: TransientBasis,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryConfig {
    /// Inlet velocity [m/s], always Dirichlet
    pub inlet_velocity: f64,
    /// Outlet pressure [Pa], always fixed
    pub outlet_pressure: f64,
    pub outlet_velocity: BoundaryKind,
    pub inlet_temperature: BoundaryKind,
    pub outlet_temperature: BoundaryKind,
}

/// Distributed sources: mass [kg/(m³·s)], momentum [N/m³], energy [W/m³].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceConfig {
    pub mass: SourceProfile,
    pub momentum: SourceProfile,
    pub energy: SourceProfile,
}

/// Complete solver configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    pub geometry: GeometryConfig,
    pub physics: PhysicsConfig,
    pub time: TimeConfig,
    pub coupling: CouplingConfig,
    pub boundary: BoundaryConfig,
    pub sources: SourceConfig,
    /// Report zero or non-finite tridiagonal pivots as errors instead of
    /// letting NaN propagate.
    pub check_pivots: bool,
}

impl Default for SolverConfig {
    /// Liquid-sodium reference case: 1 cm bed, 500 nodes, 0.5 s.
    fn default() -> Self {
        Self {
            geometry: GeometryConfig {
                length: 0.01,
                nodes: 500,
            },
            physics: PhysicsConfig {
                permeability: 1e-6,
                forchheimer: 0.0,
                initial_temperature: 300.0,
                initial_velocity: 0.0,
            },
            time: TimeConfig {
                dt: 1e-4,
                steps: 5000,
            },
            coupling: CouplingConfig {
                max_inner_iterations: 1000,
                tolerance: 1e-8,
                corrector_count: 1,
                pressure_relaxation: 0.5,
                velocity_relaxation: 1.0,
                rhie_chow: true,
                outlet_ghost: OutletGhost::Reflected,
                weights: CorrectionWeights::Simplec,
                transient_basis: TransientBasis::PreviousStep,
            },
            boundary: BoundaryConfig {
                inlet_velocity: 0.01,
                outlet_pressure: 0.0,
                outlet_velocity: BoundaryKind::ZeroGradient,
                inlet_temperature: BoundaryKind::Dirichlet(1000.0),
                outlet_temperature: BoundaryKind::Dirichlet(500.0),
            },
            sources: SourceConfig::default(),
            check_pivots: false,
        }
    }
}

fn positive(v: f64, what: &str) -> SolverResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(SolverError::config(format!("{what} must be positive, got {v}")))
    }
}

fn finite(v: f64, what: &str) -> SolverResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(SolverError::config(format!("{what} must be finite")))
    }
}

fn relaxation(v: f64, what: &str) -> SolverResult<()> {
    if v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(SolverError::config(format!("{what} must lie in (0, 1], got {v}")))
    }
}

impl SolverConfig {
    /// Uniform node spacing Δz = L / (N − 1).
    pub fn dz(&self) -> f64 {
        self.geometry.length / (self.geometry.nodes.saturating_sub(1).max(1)) as f64
    }

    /// Simulated time span [s].
    pub fn duration(&self) -> f64 {
        self.time.dt * self.time.steps as f64
    }

    /// Reject configurations the discretization cannot run.
    pub fn validate(&self) -> SolverResult<()> {
        if self.geometry.nodes < 3 {
            return Err(SolverError::config(format!(
                "mesh needs at least 3 nodes, got {}",
                self.geometry.nodes
            )));
        }
        positive(self.geometry.length, "length")?;

        positive(self.physics.permeability, "permeability")?;
        finite(self.physics.forchheimer, "Forchheimer coefficient")?;
        if self.physics.forchheimer < 0.0 {
            return Err(SolverError::config("Forchheimer coefficient must be non-negative"));
        }
        positive(self.physics.initial_temperature, "initial temperature")?;
        finite(self.physics.initial_velocity, "initial velocity")?;

        positive(self.time.dt, "timestep")?;
        if self.time.steps == 0 {
            return Err(SolverError::config("step count must be at least 1"));
        }

        let c = &self.coupling;
        if c.max_inner_iterations == 0 {
            return Err(SolverError::config("inner iteration budget must be at least 1"));
        }
        positive(c.tolerance, "tolerance")?;
        if c.corrector_count == 0 {
            return Err(SolverError::config("corrector count must be at least 1"));
        }
        relaxation(c.pressure_relaxation, "pressure relaxation")?;
        relaxation(c.velocity_relaxation, "velocity relaxation")?;

        let b = &self.boundary;
        finite(b.inlet_velocity, "inlet velocity")?;
        finite(b.outlet_pressure, "outlet pressure")?;
        if let Some(v) = b.outlet_velocity.dirichlet_value() {
            finite(v, "outlet velocity")?;
        }
        if let Some(t) = b.inlet_temperature.dirichlet_value() {
            positive(t, "inlet temperature")?;
        }
        if let Some(t) = b.outlet_temperature.dirichlet_value() {
            positive(t, "outlet temperature")?;
        }

        self.sources.mass.validate("mass source")?;
        self.sources.momentum.validate("momentum source")?;
        self.sources.energy.validate("energy source")?;
        Ok(())
    }
}

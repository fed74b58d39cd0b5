//! Outer time loop.

use crate::config::SolverConfig;
use crate::coupling::{CouplingController, CouplingOutcome};
use crate::energy::TemperatureSolver;
use crate::error::SolverResult;
use crate::mesh::Mesh;
use crate::properties::PropertyField;
use crate::sources::SourceZones;
use crate::state::SimulationState;
use pf_core::units::m;
use pf_core::{PfResult, ensure_all_finite};
use pf_fluids::PropertyModel;
use std::sync::Arc;

/// Advisory per-timestep diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Zero-based timestep index
    pub step: usize,
    /// Elapsed time at the start of the step [s]
    pub time: f64,
    /// `|u|max·Δt/Δz`
    pub courant: f64,
    /// `ρ|u|max·√K/μ` at the hottest node
    pub reynolds: f64,
    pub inner_iterations: usize,
    pub outcome: CouplingOutcome,
    /// Final velocity-change metric [m/s]
    pub velocity_change: f64,
    /// Largest continuity residual after the inner loop [m/s]
    pub max_continuity_residual: f64,
}

/// Final fields in node order.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSnapshot {
    /// Simulated time [s]
    pub time: f64,
    /// Node positions [m]
    pub z: Vec<f64>,
    pub u: Vec<f64>,
    pub p: Vec<f64>,
    pub t: Vec<f64>,
}

impl FieldSnapshot {
    pub fn from_state(state: &SimulationState, time: f64) -> Self {
        Self {
            time,
            z: state.mesh.positions(),
            u: state.u.clone(),
            p: state.p.clone(),
            t: state.t.clone(),
        }
    }

    /// Reject NaN or infinite values that a singular system may have left
    /// behind.
    pub fn ensure_finite(&self) -> PfResult<()> {
        ensure_all_finite(&self.u, "velocity")?;
        ensure_all_finite(&self.p, "pressure")?;
        ensure_all_finite(&self.t, "temperature")?;
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct RunSummary {
    pub reports: Vec<StepReport>,
    pub snapshot: FieldSnapshot,
    /// Out-of-range property evaluations seen during the run
    pub range_warnings: u64,
}

impl RunSummary {
    pub fn converged_steps(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.is_converged())
            .count()
    }
}

/// Drives a fixed number of timesteps over one simulation state.
pub struct TimeStepper {
    config: SolverConfig,
    model: Arc<dyn PropertyModel>,
    state: SimulationState,
    sources: SourceZones,
    step: usize,
}

impl TimeStepper {
    pub fn new(config: SolverConfig, model: Arc<dyn PropertyModel>) -> SolverResult<Self> {
        config.validate()?;
        let mesh = Mesh::new(m(config.geometry.length), config.geometry.nodes)?;
        let sources = SourceZones::build(&mesh, &config.sources)?;
        let state = SimulationState::new(mesh, &config);
        tracing::info!(
            nodes = config.geometry.nodes,
            dz = config.dz(),
            steps = config.time.steps,
            model = model.name(),
            "time stepper ready"
        );
        Ok(Self {
            config,
            model,
            state,
            sources,
            step: 0,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn sources(&self) -> &SourceZones {
        &self.sources
    }

    /// Timesteps completed so far.
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    pub fn elapsed(&self) -> f64 {
        self.step as f64 * self.config.time.dt
    }

    /// Courant and Reynolds numbers from the current fields.
    pub fn diagnostics(&self, props: &PropertyField) -> (f64, f64) {
        let u_max = self.state.max_speed();
        let courant = u_max * self.config.time.dt / self.state.mesh.dz();
        let hot = self.state.hottest_node();
        let reynolds =
            props.rho[hot] * u_max * self.config.physics.permeability.sqrt() / props.mu[hot];
        (courant, reynolds)
    }

    /// Advance one timestep: flow coupling, then temperature.
    pub fn step(&mut self) -> SolverResult<StepReport> {
        let props = PropertyField::evaluate(self.model.as_ref(), &self.state.t);
        let (courant, reynolds) = self.diagnostics(&props);
        let time = self.elapsed();
        tracing::info!(
            step = self.step,
            time,
            courant,
            reynolds,
            "timestep"
        );

        self.state.backup();
        let coupling = CouplingController::run(&mut self.state, &self.config, &props, &self.sources)?;
        TemperatureSolver::solve(&mut self.state, &self.config, &props, &self.sources)?;

        let report = StepReport {
            step: self.step,
            time,
            courant,
            reynolds,
            inner_iterations: coupling.iterations,
            outcome: coupling.outcome,
            velocity_change: coupling.velocity_change,
            max_continuity_residual: coupling.max_continuity_residual,
        };
        self.step += 1;
        Ok(report)
    }

    /// Run every configured timestep and return the final snapshot.
    pub fn run(
        &mut self,
        mut progress: Option<&mut dyn FnMut(&StepReport)>,
    ) -> SolverResult<RunSummary> {
        let mut reports = Vec::with_capacity(self.config.time.steps);
        while self.step < self.config.time.steps {
            let report = self.step()?;
            if let Some(cb) = progress.as_mut() {
                cb(&report);
            }
            reports.push(report);
        }

        let snapshot = FieldSnapshot::from_state(&self.state, self.elapsed());
        let range_warnings = self.model.range_warnings();
        if range_warnings > 0 {
            tracing::warn!(range_warnings, "material properties were extrapolated");
        }
        Ok(RunSummary {
            reports,
            snapshot,
            range_warnings,
        })
    }
}

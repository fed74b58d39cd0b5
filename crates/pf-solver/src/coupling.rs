//! SIMPLE/PISO inner iteration.

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::momentum::MomentumPredictor;
use crate::pressure::PressureCorrector;
use crate::properties::PropertyField;
use crate::residual::continuity_residual;
use crate::sources::SourceZones;
use crate::state::SimulationState;
use crate::update::FieldUpdater;

/// Where the controller is within an inner iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CouplingPhase {
    Predicting,
    Correcting { pass: usize, of: usize },
}

/// How an inner loop ended. Neither outcome is an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CouplingOutcome {
    Converged,
    IterationBudgetExhausted,
}

impl CouplingOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, CouplingOutcome::Converged)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CouplingReport {
    pub outcome: CouplingOutcome,
    pub iterations: usize,
    /// Velocity-change metric of the final inner iteration [m/s]
    pub velocity_change: f64,
    /// Largest continuity residual of the final iterate [m/s]
    pub max_continuity_residual: f64,
}

/// One momentum solve per inner iteration, followed by `corrector_count`
/// pressure-correction passes on frozen momentum coefficients.
pub struct CouplingController;

impl CouplingController {
    /// Iterate until both the velocity change and the largest continuity
    /// residual drop below the tolerance, or the budget runs out.
    pub fn run(
        state: &mut SimulationState,
        config: &SolverConfig,
        props: &PropertyField,
        sources: &SourceZones,
    ) -> SolverResult<CouplingReport> {
        let budget = config.coupling.max_inner_iterations;
        let tol = config.coupling.tolerance;
        state.inner_iteration = 0;

        for iteration in 1..=budget {
            let change = Self::iterate(state, config, props, sources)?;
            state.inner_iteration = iteration;
            state.velocity_change = change;
            tracing::debug!(iteration, velocity_change = change, "inner iteration");

            if change < tol {
                let residual = max_residual(state, config, props, sources);
                if residual < tol {
                    return Ok(CouplingReport {
                        outcome: CouplingOutcome::Converged,
                        iterations: iteration,
                        velocity_change: change,
                        max_continuity_residual: residual,
                    });
                }
                tracing::trace!(
                    iteration,
                    continuity_residual = residual,
                    "velocity settled but continuity not yet satisfied"
                );
            }
        }

        let residual = max_residual(state, config, props, sources);
        tracing::warn!(
            iterations = budget,
            velocity_change = state.velocity_change,
            continuity_residual = residual,
            tolerance = tol,
            "inner loop hit its iteration budget, continuing with last iterate"
        );
        Ok(CouplingReport {
            outcome: CouplingOutcome::IterationBudgetExhausted,
            iterations: budget,
            velocity_change: state.velocity_change,
            max_continuity_residual: residual,
        })
    }

    /// One prediction plus all corrector passes. Returns the largest velocity
    /// change over the passes.
    pub fn iterate(
        state: &mut SimulationState,
        config: &SolverConfig,
        props: &PropertyField,
        sources: &SourceZones,
    ) -> SolverResult<f64> {
        tracing::trace!(phase = ?CouplingPhase::Predicting);
        MomentumPredictor::solve(state, config, props, sources)?;

        let of = config.coupling.corrector_count;
        let mut change: f64 = 0.0;
        for pass in 1..=of {
            tracing::trace!(phase = ?CouplingPhase::Correcting { pass, of });
            let correction = PressureCorrector::solve(state, config, props, sources)?;
            change = change.max(FieldUpdater::apply(state, config, &correction));
        }
        Ok(change)
    }
}

fn max_residual(
    state: &SimulationState,
    config: &SolverConfig,
    props: &PropertyField,
    sources: &SourceZones,
) -> f64 {
    continuity_residual(state, config, props, sources)
        .into_iter()
        .fold(0.0, f64::max)
}

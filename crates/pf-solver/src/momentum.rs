//! Momentum predictor.

use crate::ASSEMBLY_MIN_CHUNK;
use crate::config::{BoundaryKind, CorrectionWeights, SolverConfig, TransientBasis};
use crate::error::SolverResult;
use crate::properties::PropertyField;
use crate::rhie_chow::FaceInterpolator;
use crate::sources::SourceZones;
use crate::state::SimulationState;
use crate::tridiag::{Row, TridiagonalSystem};
use rayon::prelude::*;

/// Assembles and solves the velocity system from the frozen pressure field.
///
/// Interior row `i`:
///
/// ```text
/// a_W = μ_w/Δz² + max(F_w, 0)/Δz
/// a_E = μ_e/Δz² + max(−F_e, 0)/Δz
/// a_P = ρ/Δt + a_W + a_E + μ/K + CF·ρ/√K·|u|
/// a_P u_P − a_W u_W − a_E u_E = ρ/Δt·u° − (p_E − p_W)/(2Δz) + S_u
/// ```
///
/// Face viscosities are arithmetic means; drag uses node values.
pub struct MomentumPredictor;

impl MomentumPredictor {
    /// Overwrites `state.u` and `state.weights`.
    pub fn solve(
        state: &mut SimulationState,
        config: &SolverConfig,
        props: &PropertyField,
        sources: &SourceZones,
    ) -> SolverResult<()> {
        let (system, weights) = Self::assemble(state, config, props, sources);
        state.u = system.solve_with(config.check_pivots)?;
        state.weights = weights.iter().map(|w| 1.0 / w).collect();
        Ok(())
    }

    /// Linear system and un-inverted pseudo-velocity weights.
    pub fn assemble(
        state: &SimulationState,
        config: &SolverConfig,
        props: &PropertyField,
        sources: &SourceZones,
    ) -> (TridiagonalSystem, Vec<f64>) {
        let n = state.nodes();
        let dz = state.mesh.dz();
        let dt = config.time.dt;
        let k = config.physics.permeability;
        let cf = config.physics.forchheimer;
        let (rho, mu) = (&props.rho, &props.mu);
        let u = &state.u;
        let p = &state.p;
        let basis = match config.coupling.transient_basis {
            TransientBasis::PreviousStep => &state.u_old,
            TransientBasis::Current => &state.u,
        };

        let faces = FaceInterpolator::new(config.coupling.rhie_chow, dz).faces(
            u,
            &state.padded,
            &state.weights,
            rho,
        );
        let drag = |i: usize| mu[i] / k + cf * rho[i] / k.sqrt() * u[i].abs();

        let first = Row::fixed(config.boundary.inlet_velocity);
        let last = match config.boundary.outlet_velocity {
            BoundaryKind::Dirichlet(v) => Row::fixed(v),
            BoundaryKind::ZeroGradient => Row::copy_previous(),
        };

        let system = TridiagonalSystem::assemble(n, first, last, |i| {
            let (west, east) = (&faces[i - 1], &faces[i]);
            let diff_w = 0.5 * (mu[i - 1] + mu[i]) / (dz * dz);
            let diff_e = 0.5 * (mu[i] + mu[i + 1]) / (dz * dz);
            let a_w = diff_w + west.forward() / dz;
            let a_e = diff_e + east.backward() / dz;
            let transient = rho[i] / dt;
            Row {
                a: -a_w,
                b: transient + a_w + a_e + drag(i),
                c: -a_e,
                d: transient * basis[i] - (p[i + 1] - p[i - 1]) / (2.0 * dz)
                    + sources.momentum[i],
            }
        });

        let simplec = config.coupling.weights == CorrectionWeights::Simplec;
        let weights = (0..n)
            .into_par_iter()
            .with_min_len(ASSEMBLY_MIN_CHUNK)
            .map(|i| {
                if i == 0 || i == n - 1 {
                    let base = rho[i] / dt + drag(i);
                    if simplec {
                        base
                    } else {
                        base + 2.0 * mu[i] / (dz * dz)
                    }
                } else if simplec {
                    system.b[i] + system.a[i] + system.c[i]
                } else {
                    system.b[i]
                }
            })
            .collect();

        (system, weights)
    }
}

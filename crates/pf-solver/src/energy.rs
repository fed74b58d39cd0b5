//! Energy equation.

use crate::config::{BoundaryKind, SolverConfig, TransientBasis};
use crate::error::SolverResult;
use crate::properties::PropertyField;
use crate::rhie_chow::FaceInterpolator;
use crate::sources::SourceZones;
use crate::state::SimulationState;
use crate::tridiag::{Row, TridiagonalSystem};

/// Advances temperature once per timestep with the converged flow field.
///
/// Per unit cross-section, interior row `i`:
///
/// ```text
/// a_W = k_w/Δz + max(F_w, 0)·cp_w
/// a_E = k_e/Δz + max(−F_e, 0)·cp_e
/// a_P = ρ cp Δz/Δt + a_W + a_E
/// a_P T_P − a_W T_W − a_E T_E = ρ cp Δz/Δt · T° + S_t Δz
/// ```
///
/// Properties come from the start-of-step temperature, so the new
/// temperature only affects the flow from the next timestep onwards.
pub struct TemperatureSolver;

impl TemperatureSolver {
    /// Overwrites `state.t`.
    pub fn solve(
        state: &mut SimulationState,
        config: &SolverConfig,
        props: &PropertyField,
        sources: &SourceZones,
    ) -> SolverResult<()> {
        state.t = Self::assemble(state, config, props, sources).solve_with(config.check_pivots)?;
        Ok(())
    }

    pub fn assemble(
        state: &SimulationState,
        config: &SolverConfig,
        props: &PropertyField,
        sources: &SourceZones,
    ) -> TridiagonalSystem {
        let n = state.nodes();
        let dz = state.mesh.dz();
        let dt = config.time.dt;
        let (rho, k, cp) = (&props.rho, &props.k, &props.cp);
        let basis = match config.coupling.transient_basis {
            TransientBasis::PreviousStep => &state.t_old,
            TransientBasis::Current => &state.t,
        };

        let faces = FaceInterpolator::new(config.coupling.rhie_chow, dz).faces(
            &state.u,
            &state.padded,
            &state.weights,
            rho,
        );

        let first = match config.boundary.inlet_temperature {
            BoundaryKind::Dirichlet(v) => Row::fixed(v),
            BoundaryKind::ZeroGradient => Row::copy_next(),
        };
        let last = match config.boundary.outlet_temperature {
            BoundaryKind::Dirichlet(v) => Row::fixed(v),
            BoundaryKind::ZeroGradient => Row::copy_previous(),
        };

        TridiagonalSystem::assemble(n, first, last, |i| {
            let (west, east) = (&faces[i - 1], &faces[i]);
            let a_w = 0.5 * (k[i - 1] + k[i]) / dz + west.forward() * cp[west.upwind];
            let a_e = 0.5 * (k[i] + k[i + 1]) / dz + east.backward() * cp[east.upwind];
            let transient = rho[i] * cp[i] * dz / dt;
            Row {
                a: -a_w,
                b: transient + a_w + a_e,
                c: -a_e,
                d: transient * basis[i] + sources.energy[i] * dz,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use pf_core::units::m;

    fn setup(inlet: BoundaryKind, outlet: BoundaryKind) -> (SimulationState, SolverConfig) {
        let mut cfg = SolverConfig::default();
        cfg.geometry.length = 1.0;
        cfg.geometry.nodes = 6;
        cfg.time.dt = 10.0;
        cfg.boundary.inlet_temperature = inlet;
        cfg.boundary.outlet_temperature = outlet;
        let mesh = Mesh::new(m(1.0), 6).unwrap();
        let mut st = SimulationState::new(mesh, &cfg);
        st.u = vec![0.01; 6];
        st.backup();
        (st, cfg)
    }

    #[test]
    fn dirichlet_boundaries_are_exact() {
        let (mut st, cfg) = setup(BoundaryKind::Dirichlet(1000.0), BoundaryKind::Dirichlet(500.0));
        let props = PropertyField::uniform(6, 900.0, 3e-4, 70.0, 1300.0);
        TemperatureSolver::solve(&mut st, &cfg, &props, &SourceZones::zeros(6)).unwrap();
        assert_eq!(st.t[0], 1000.0);
        assert_eq!(st.t[5], 500.0);
        assert!(st.t[1..5].iter().all(|t| *t > 300.0 && *t < 1000.0));
    }

    #[test]
    fn zero_gradient_outlet_copies_neighbour() {
        let (mut st, cfg) = setup(BoundaryKind::Dirichlet(600.0), BoundaryKind::ZeroGradient);
        let props = PropertyField::uniform(6, 900.0, 3e-4, 70.0, 1300.0);
        TemperatureSolver::solve(&mut st, &cfg, &props, &SourceZones::zeros(6)).unwrap();
        assert_eq!(st.t[0], 600.0);
        assert!((st.t[5] - st.t[4]).abs() < 1e-9);
    }

    #[test]
    fn isothermal_field_stays_put() {
        let (mut st, cfg) = setup(BoundaryKind::Dirichlet(300.0), BoundaryKind::Dirichlet(300.0));
        st.t = vec![300.0; 6];
        st.backup();
        let props = PropertyField::uniform(6, 1000.0, 1e-3, 0.6, 4180.0);
        TemperatureSolver::solve(&mut st, &cfg, &props, &SourceZones::zeros(6)).unwrap();
        assert!(st.t.iter().all(|t| (t - 300.0).abs() < 1e-9));
    }

    #[test]
    fn energy_source_heats_interior() {
        let (mut st, cfg) = setup(BoundaryKind::Dirichlet(300.0), BoundaryKind::Dirichlet(300.0));
        st.t = vec![300.0; 6];
        st.backup();
        let props = PropertyField::uniform(6, 1000.0, 1e-3, 0.6, 4180.0);
        let mut sources = SourceZones::zeros(6);
        sources.energy = vec![1e6; 6];
        TemperatureSolver::solve(&mut st, &cfg, &props, &sources).unwrap();
        assert!(st.t[1..5].iter().all(|t| *t > 300.0));
    }
}

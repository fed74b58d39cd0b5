//! Pressure-correction equation.

use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::properties::PropertyField;
use crate::rhie_chow::{FaceFlux, FaceInterpolator};
use crate::sources::SourceZones;
use crate::state::SimulationState;
use crate::tridiag::{Row, TridiagonalSystem};

/// Builds the correction system from the discrete mass imbalance
///
/// ```text
/// r_P = (F_e − F_w)/Δz − S_m
/// G_f = ρ̄_f · d̄_f / Δz²
/// −G_w p'_W + (G_w + G_e) p'_P − G_e p'_E = −r_P
/// ```
///
/// The inlet row holds zero gradient and the outlet row pins the correction
/// to zero so the outlet pressure stays fixed.
pub struct PressureCorrector;

impl PressureCorrector {
    /// Solve for the correction field. Does not touch `u` or `p`.
    pub fn solve(
        state: &SimulationState,
        config: &SolverConfig,
        props: &PropertyField,
        sources: &SourceZones,
    ) -> SolverResult<Vec<f64>> {
        Self::assemble(state, config, props, sources).solve_with(config.check_pivots)
    }

    pub fn assemble(
        state: &SimulationState,
        config: &SolverConfig,
        props: &PropertyField,
        sources: &SourceZones,
    ) -> TridiagonalSystem {
        let n = state.nodes();
        let dz = state.mesh.dz();
        let rho = &props.rho;
        let d = &state.weights;
        let imbalance = Self::mass_imbalance(state, config, props, sources);

        let conductance = |j: usize| 0.25 * (rho[j] + rho[j + 1]) * (d[j] + d[j + 1]) / (dz * dz);

        TridiagonalSystem::assemble(n, Row::copy_next(), Row::fixed(0.0), |i| {
            let (g_w, g_e) = (conductance(i - 1), conductance(i));
            Row {
                a: -g_w,
                b: g_w + g_e,
                c: -g_e,
                d: -imbalance[i],
            }
        })
    }

    /// Net mass outflow per unit volume at every node [kg/(m³·s)]; zero at
    /// the two boundary nodes.
    pub fn mass_imbalance(
        state: &SimulationState,
        config: &SolverConfig,
        props: &PropertyField,
        sources: &SourceZones,
    ) -> Vec<f64> {
        let dz = state.mesh.dz();
        let faces = FaceInterpolator::new(config.coupling.rhie_chow, dz).faces(
            &state.u,
            &state.padded,
            &state.weights,
            &props.rho,
        );
        imbalance_from_faces(&faces, &sources.mass, dz)
    }
}

pub(crate) fn imbalance_from_faces(faces: &[FaceFlux], mass_source: &[f64], dz: f64) -> Vec<f64> {
    let n = faces.len() + 1;
    let mut r = vec![0.0; n];
    for i in 1..n - 1 {
        r[i] = (faces[i].mass_flux - faces[i - 1].mass_flux) / dz - mass_source[i];
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use pf_core::units::m;

    fn setup() -> (SimulationState, SolverConfig, PropertyField) {
        let mut cfg = SolverConfig::default();
        cfg.geometry.length = 1.0;
        cfg.geometry.nodes = 5;
        let mesh = Mesh::new(m(1.0), 5).unwrap();
        let mut st = SimulationState::new(mesh, &cfg);
        st.weights = vec![1e-3; 5];
        (st, cfg, PropertyField::uniform(5, 1000.0, 1e-3, 0.6, 4180.0))
    }

    #[test]
    fn uniform_flow_has_no_imbalance() {
        let (mut st, cfg, props) = setup();
        st.u = vec![0.01; 5];
        let r = PressureCorrector::mass_imbalance(&st, &cfg, &props, &SourceZones::zeros(5));
        assert!(r.iter().all(|v| v.abs() < 1e-12));
        let pc = PressureCorrector::solve(&st, &cfg, &props, &SourceZones::zeros(5)).unwrap();
        assert!(pc.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn mass_source_enters_the_balance() {
        let (mut st, cfg, props) = setup();
        st.u = vec![0.01; 5];
        let mut sources = SourceZones::zeros(5);
        sources.mass[2] = 4.0;
        let r = PressureCorrector::mass_imbalance(&st, &cfg, &props, &sources);
        assert_eq!(r[2], -4.0);
        assert_eq!(r[0], 0.0);
    }

    #[test]
    fn boundary_rows_fix_outlet_and_mirror_inlet() {
        let (mut st, cfg, props) = setup();
        st.u = vec![0.0, 0.02, 0.0, 0.01, 0.01];
        let pc = PressureCorrector::solve(&st, &cfg, &props, &SourceZones::zeros(5)).unwrap();
        assert_eq!(pc[4], 0.0);
        assert_eq!(pc[0], pc[1]);
    }
}

//! Pressure and velocity correction.

use crate::config::{BoundaryKind, SolverConfig};
use crate::state::SimulationState;

pub struct FieldUpdater;

impl FieldUpdater {
    /// Apply a pressure correction and return the largest interior velocity
    /// change [m/s].
    ///
    /// `p += α_p p'`, the inlet pressure is re-extrapolated from the interior,
    /// the padded buffer is refreshed, then
    /// `u_P −= α_u d_P (p'_E − p'_W)/(2Δz)` at interior nodes.
    pub fn apply(state: &mut SimulationState, config: &SolverConfig, correction: &[f64]) -> f64 {
        let n = state.nodes();
        let dz = state.mesh.dz();
        let alpha_p = config.coupling.pressure_relaxation;
        let alpha_u = config.coupling.velocity_relaxation;

        for (p, pc) in state.p.iter_mut().zip(correction) {
            *p += alpha_p * pc;
        }
        state.p[0] = 2.0 * state.p[1] - state.p[2];
        state.refresh_padded(config);

        let mut max_change: f64 = 0.0;
        for i in 1..n - 1 {
            let du = alpha_u * state.weights[i] * (correction[i + 1] - correction[i - 1]) / (2.0 * dz);
            state.u[i] -= du;
            max_change = max_change.max(du.abs());
        }
        if config.boundary.outlet_velocity == BoundaryKind::ZeroGradient {
            state.u[n - 1] = state.u[n - 2];
        }
        max_change
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use pf_core::units::m;

    #[test]
    fn applies_relaxed_correction() {
        let mut cfg = SolverConfig::default();
        cfg.coupling.pressure_relaxation = 0.5;
        cfg.coupling.velocity_relaxation = 1.0;
        let mesh = Mesh::new(m(1.0), 5).unwrap();
        let mut st = SimulationState::new(mesh, &cfg);
        st.u = vec![0.0; 5];
        st.weights = vec![1.0; 5];

        let pc = [4.0, 4.0, 2.0, 2.0, 0.0];
        let change = FieldUpdater::apply(&mut st, &cfg, &pc);

        assert_eq!(&st.p[1..], &[2.0, 1.0, 1.0, 0.0]);
        assert_eq!(st.p[0], 3.0);
        // node 1: (2 - 4) / 0.5 = -4, node 3: (0 - 2) / 0.5 = -4
        assert_eq!(st.u[1], 4.0);
        assert_eq!(st.u[2], 4.0);
        assert_eq!(st.u[3], 4.0);
        assert_eq!(st.u[4], st.u[3]);
        assert_eq!(change, 4.0);
        assert_eq!(st.padded.get(0), 2.0 * st.p[0] - st.p[1]);
    }

    #[test]
    fn zero_correction_changes_nothing() {
        let cfg = SolverConfig::default();
        let mesh = Mesh::new(m(1.0), 6).unwrap();
        let mut st = SimulationState::new(mesh, &cfg);
        let before = st.u.clone();
        let change = FieldUpdater::apply(&mut st, &cfg, &[0.0; 6]);
        assert_eq!(change, 0.0);
        assert_eq!(st.u, before);
    }
}

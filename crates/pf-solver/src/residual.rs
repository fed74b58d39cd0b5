//! Continuity residual diagnostics.

use crate::config::SolverConfig;
use crate::pressure::PressureCorrector;
use crate::properties::PropertyField;
use crate::sources::SourceZones;
use crate::state::SimulationState;

/// Per-node volumetric imbalance `|F_e − F_w − S_m Δz| / ρ_P` [m/s].
///
/// Same units as the velocity-change tolerance. Boundary nodes carry no
/// continuity equation and report zero.
pub fn continuity_residual(
    state: &SimulationState,
    config: &SolverConfig,
    props: &PropertyField,
    sources: &SourceZones,
) -> Vec<f64> {
    let dz = state.mesh.dz();
    PressureCorrector::mass_imbalance(state, config, props, sources)
        .iter()
        .zip(&props.rho)
        .map(|(r, rho)| (r * dz / rho).abs())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use pf_core::units::m;

    #[test]
    fn converging_nozzle_shows_imbalance() {
        let mut cfg = SolverConfig::default();
        cfg.coupling.rhie_chow = false;
        let mesh = Mesh::new(m(1.0), 5).unwrap();
        let mut st = SimulationState::new(mesh, &cfg);
        st.u = vec![1.0, 1.0, 2.0, 2.0, 2.0];
        let props = PropertyField::uniform(5, 1000.0, 1e-3, 0.6, 4180.0);
        let r = continuity_residual(&st, &cfg, &props, &SourceZones::zeros(5));
        // faces: 1.0, 1.5, 2.0, 2.0
        assert_eq!(r[0], 0.0);
        assert!((r[1] - 0.5).abs() < 1e-12);
        assert!((r[2] - 0.5).abs() < 1e-12);
        assert_eq!(r[3], 0.0);
        assert_eq!(r[4], 0.0);
    }
}

//! Mutable simulation state.

use crate::config::{BoundaryKind, OutletGhost, SolverConfig};
use crate::mesh::Mesh;

/// Pressure with one ghost value at each end (length N+2).
///
/// Owns its storage; it is re-synchronised from the interior pressure after
/// every correction so the 4-point Rhie-Chow difference needs no boundary
/// branches.
#[derive(Clone, Debug, PartialEq)]
pub struct PaddedPressureBuffer {
    values: Vec<f64>,
}

impl PaddedPressureBuffer {
    pub fn new(nodes: usize) -> Self {
        Self {
            values: vec![0.0; nodes + 2],
        }
    }

    /// Copy `p` into slots `1..=N` and rebuild both ghosts.
    ///
    /// Left ghost extrapolates linearly (`2p₀ − p₁`). The right ghost follows
    /// `ghost`: either the reflection `2p_out − p_{N−2}` or `p_out` itself.
    pub fn refresh(&mut self, p: &[f64], outlet_pressure: f64, ghost: OutletGhost) {
        let n = p.len();
        debug_assert_eq!(self.values.len(), n + 2);
        self.values[1..=n].copy_from_slice(p);
        self.values[0] = 2.0 * p[0] - p[1];
        self.values[n + 1] = match ghost {
            OutletGhost::Reflected => 2.0 * outlet_pressure - p[n - 2],
            OutletGhost::FixedPressure => outlet_pressure,
        };
    }

    /// Padded value; index 0 is the left ghost, `i + 1` is node `i`.
    #[inline]
    pub fn get(&self, j: usize) -> f64 {
        self.values[j]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Fields, backups and convergence counters of a running simulation.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub mesh: Mesh,
    /// Velocity [m/s]
    pub u: Vec<f64>,
    /// Pressure [Pa]
    pub p: Vec<f64>,
    /// Temperature [K]
    pub t: Vec<f64>,
    pub padded: PaddedPressureBuffer,
    /// Reciprocal momentum weights `d = 1/a` from the last momentum solve.
    /// Zero until the first prediction, which reduces Rhie-Chow to a plain
    /// average.
    pub weights: Vec<f64>,
    /// Start-of-timestep backups.
    pub u_old: Vec<f64>,
    pub p_old: Vec<f64>,
    pub t_old: Vec<f64>,
    /// Inner iterations run in the current timestep.
    pub inner_iteration: usize,
    /// Velocity-change metric of the last inner iteration [m/s].
    pub velocity_change: f64,
}

impl SimulationState {
    /// Initial fields with boundary values applied.
    pub fn new(mesh: Mesh, config: &SolverConfig) -> Self {
        let n = mesh.nodes();
        let bc = &config.boundary;

        let mut u = vec![config.physics.initial_velocity; n];
        u[0] = bc.inlet_velocity;
        match bc.outlet_velocity {
            BoundaryKind::Dirichlet(v) => u[n - 1] = v,
            BoundaryKind::ZeroGradient => u[n - 1] = u[n - 2],
        }

        let p = vec![bc.outlet_pressure; n];

        let mut t = vec![config.physics.initial_temperature; n];
        if let Some(v) = bc.inlet_temperature.dirichlet_value() {
            t[0] = v;
        }
        if let Some(v) = bc.outlet_temperature.dirichlet_value() {
            t[n - 1] = v;
        }

        let mut padded = PaddedPressureBuffer::new(n);
        padded.refresh(&p, bc.outlet_pressure, config.coupling.outlet_ghost);

        Self {
            mesh,
            u_old: u.clone(),
            p_old: p.clone(),
            t_old: t.clone(),
            u,
            p,
            t,
            padded,
            weights: vec![0.0; n],
            inner_iteration: 0,
            velocity_change: 0.0,
        }
    }

    pub fn nodes(&self) -> usize {
        self.mesh.nodes()
    }

    /// Snapshot u, p and T before a timestep's inner loop.
    pub fn backup(&mut self) {
        self.u_old.clone_from(&self.u);
        self.p_old.clone_from(&self.p);
        self.t_old.clone_from(&self.t);
    }

    pub fn refresh_padded(&mut self, config: &SolverConfig) {
        self.padded.refresh(
            &self.p,
            config.boundary.outlet_pressure,
            config.coupling.outlet_ghost,
        );
    }

    /// Largest |u| [m/s].
    pub fn max_speed(&self) -> f64 {
        pf_core::max_abs(&self.u)
    }

    /// Index of the hottest node.
    pub fn hottest_node(&self) -> usize {
        self.t
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bt), (i, &t)| {
                if t > bt { (i, t) } else { (bi, bt) }
            })
            .0
    }
}

//! Distributed mass, momentum and energy sources.
//!
//! A profile is a list of zones over fractions of the pipe length. Zones may
//! overlap; their values add. Source arrays are built once from the mesh and
//! stay constant for the whole simulation.

use crate::config::SourceConfig;
use crate::error::{SolverError, SolverResult};
use crate::mesh::Mesh;

/// Constant source density over `[start, end)` (fractions of the length).
///
/// A zone ending at 1.0 includes the outlet node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceZone {
    pub start: f64,
    pub end: f64,
    pub value: f64,
}

impl SourceZone {
    fn contains(&self, x: f64) -> bool {
        x >= self.start && (x < self.end || (self.end >= 1.0 && x <= 1.0))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceProfile {
    zones: Vec<SourceZone>,
}

impl SourceProfile {
    pub fn new(zones: Vec<SourceZone>) -> Self {
        Self { zones }
    }

    pub fn zones(&self) -> &[SourceZone] {
        &self.zones
    }

    pub fn is_empty(&self) -> bool {
        self.zones.iter().all(|z| z.value == 0.0)
    }

    /// Alternating source/sink zones between consecutive breakpoints.
    ///
    /// `breakpoints = [0.0, 0.25, 0.5, 1.0]` with magnitude `m` yields `+m` on
    /// `[0, 0.25)`, `-m` on `[0.25, 0.5)` and `+m` on `[0.5, 1]`.
    pub fn alternating(breakpoints: &[f64], magnitude: f64) -> Self {
        let zones = breakpoints
            .windows(2)
            .enumerate()
            .map(|(i, w)| SourceZone {
                start: w[0],
                end: w[1],
                value: if i % 2 == 0 { magnitude } else { -magnitude },
            })
            .collect();
        Self { zones }
    }

    pub fn validate(&self, what: &str) -> SolverResult<()> {
        for (i, z) in self.zones.iter().enumerate() {
            let in_range = (0.0..=1.0).contains(&z.start) && (0.0..=1.0).contains(&z.end);
            if !in_range || z.start > z.end {
                return Err(SolverError::config(format!(
                    "{what} zone {i} must satisfy 0 <= start <= end <= 1, got [{}, {}]",
                    z.start, z.end
                )));
            }
            if !z.value.is_finite() {
                return Err(SolverError::config(format!(
                    "{what} zone {i} value must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Sample the profile at every mesh node.
    pub fn sample(&self, mesh: &Mesh) -> Vec<f64> {
        (0..mesh.nodes())
            .map(|i| {
                let x = mesh.fraction(i);
                self.zones
                    .iter()
                    .filter(|z| z.contains(x))
                    .map(|z| z.value)
                    .sum()
            })
            .collect()
    }
}

/// Per-node source arrays `Sm`, `Su`, `St`.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceZones {
    /// Mass source [kg/(m³·s)]
    pub mass: Vec<f64>,
    /// Momentum source [N/m³]
    pub momentum: Vec<f64>,
    /// Energy source [W/m³]
    pub energy: Vec<f64>,
}

impl SourceZones {
    pub fn build(mesh: &Mesh, config: &SourceConfig) -> SolverResult<Self> {
        config.mass.validate("mass source")?;
        config.momentum.validate("momentum source")?;
        config.energy.validate("energy source")?;
        Ok(Self {
            mass: config.mass.sample(mesh),
            momentum: config.momentum.sample(mesh),
            energy: config.energy.sample(mesh),
        })
    }

    pub fn zeros(nodes: usize) -> Self {
        Self {
            mass: vec![0.0; nodes],
            momentum: vec![0.0; nodes],
            energy: vec![0.0; nodes],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pf_core::units::m;

    #[test]
    fn alternating_profile_flips_sign() {
        let mesh = Mesh::new(m(1.0), 5).unwrap();
        let profile = SourceProfile::alternating(&[0.0, 0.5, 1.0], 2.0);
        assert_eq!(profile.zones().len(), 2);
        assert_eq!(profile.sample(&mesh), vec![2.0, 2.0, -2.0, -2.0, -2.0]);
    }

    #[test]
    fn overlapping_zones_add() {
        let mesh = Mesh::new(m(1.0), 5).unwrap();
        let profile = SourceProfile::new(vec![
            SourceZone {
                start: 0.0,
                end: 0.6,
                value: 1.0,
            },
            SourceZone {
                start: 0.4,
                end: 1.0,
                value: 10.0,
            },
        ]);
        assert_eq!(profile.sample(&mesh), vec![1.0, 1.0, 11.0, 10.0, 10.0]);
    }

    #[test]
    fn empty_config_gives_zero_arrays() {
        let mesh = Mesh::new(m(1.0), 4).unwrap();
        let zones = SourceZones::build(&mesh, &SourceConfig::default()).unwrap();
        assert_eq!(zones, SourceZones::zeros(4));
    }

    #[test]
    fn rejects_zone_outside_pipe() {
        let profile = SourceProfile::new(vec![SourceZone {
            start: -0.1,
            end: 0.5,
            value: 1.0,
        }]);
        assert!(profile.validate("mass").is_err());
    }
}

//! Uniform collocated 1D mesh.

use crate::error::{SolverError, SolverResult};
use pf_core::units::Length;
use uom::si::length::meter;

/// Fixed node count with uniform spacing. Node `i` is the centre of its
/// control volume at `z = i·Δz`.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    nodes: usize,
    length: f64,
    dz: f64,
}

impl Mesh {
    pub fn new(length: Length, nodes: usize) -> SolverResult<Self> {
        let length = length.get::<meter>();
        if nodes < 3 {
            return Err(SolverError::config(format!(
                "mesh needs at least 3 nodes, got {nodes}"
            )));
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(SolverError::config(format!(
                "mesh length must be positive, got {length}"
            )));
        }
        Ok(Self {
            nodes,
            length,
            dz: length / (nodes - 1) as f64,
        })
    }

    #[inline]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Pipe length [m].
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Node spacing [m].
    #[inline]
    pub fn dz(&self) -> f64 {
        self.dz
    }

    /// Number of faces between adjacent nodes.
    pub fn faces(&self) -> usize {
        self.nodes - 1
    }

    /// Node positions [m].
    pub fn positions(&self) -> Vec<f64> {
        (0..self.nodes).map(|i| i as f64 * self.dz).collect()
    }

    /// Position of node `i` as a fraction of the pipe length.
    pub fn fraction(&self, i: usize) -> f64 {
        i as f64 / (self.nodes - 1) as f64
    }
}

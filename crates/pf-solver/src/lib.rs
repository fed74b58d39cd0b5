//! Segregated pressure-velocity-temperature solver for 1D porous pipe flow.
//!
//! The mesh is collocated: velocity, pressure and temperature live on the same
//! nodes, and Rhie-Chow face interpolation keeps the pressure field from
//! decoupling into a checkerboard. Each timestep runs a SIMPLE/PISO inner loop
//! (momentum prediction followed by one or more pressure corrections) and then
//! advances temperature once with the converged flow field.
//!
//! Pipeline per timestep:
//!
//! ```text
//! TimeStepper
//!   └─ CouplingController
//!        ├─ MomentumPredictor
//!        └─ [PressureCorrector → FieldUpdater] × corrector_count
//!   └─ TemperatureSolver
//! ```

pub mod config;
pub mod coupling;
pub mod energy;
pub mod error;
pub mod mesh;
pub mod momentum;
pub mod pressure;
pub mod properties;
pub mod residual;
pub mod rhie_chow;
pub mod sources;
pub mod state;
pub mod stepper;
pub mod tridiag;
pub mod update;

pub use config::{
    BoundaryConfig, BoundaryKind, CorrectionWeights, CouplingConfig, GeometryConfig, OutletGhost,
    PhysicsConfig, SolverConfig, SourceConfig, TimeConfig, TransientBasis,
};
pub use coupling::{CouplingController, CouplingOutcome, CouplingPhase, CouplingReport};
pub use energy::TemperatureSolver;
pub use error::{SolverError, SolverResult};
pub use mesh::Mesh;
pub use momentum::MomentumPredictor;
pub use pressure::PressureCorrector;
pub use properties::PropertyField;
pub use residual::continuity_residual;
pub use rhie_chow::{FaceFlux, FaceInterpolator};
pub use sources::{SourceProfile, SourceZone, SourceZones};
pub use state::{PaddedPressureBuffer, SimulationState};
pub use stepper::{FieldSnapshot, RunSummary, StepReport, TimeStepper};
pub use tridiag::{Row, TridiagonalSystem};
pub use update::FieldUpdater;

/// Assembly passes below this many rows per rayon task run on one thread.
pub(crate) const ASSEMBLY_MIN_CHUNK: usize = 256;

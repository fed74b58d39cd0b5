//! pf-fluids: material property models for porflow.
//!
//! Provides:
//! - `PropertyModel` trait: temperature -> {density, viscosity, conductivity, specific heat}
//! - `MaterialState` property pack for a single temperature
//! - Liquid sodium correlations (`SodiumModel`) with injectable coefficients
//! - Constant-property model (`ConstantProperties`) for verification cases
//!
//! # Architecture
//!
//! The solver only sees the `PropertyModel` trait, so correlations can be swapped
//! without touching the assembly code. Models must be `Send + Sync` because the
//! solver evaluates them from parallel assembly passes.
//!
//! # Example
//!
//! ```
//! use pf_fluids::{PropertyModel, SodiumModel};
//! use pf_core::units::k;
//!
//! let sodium = SodiumModel::default();
//! let state = sodium.state(k(800.0));
//! println!("Density: {} kg/m³", state.rho.value);
//! ```

pub mod constant;
pub mod error;
pub mod model;
pub mod sodium;

// Re-exports for ergonomics
pub use constant::ConstantProperties;
pub use error::{FluidError, FluidResult};
pub use model::{MaterialState, PropertyModel};
pub use sodium::{SodiumCoefficients, SodiumModel};

//! Shared application service layer for porflow.
//!
//! Loads and validates case files, compiles them into a solver configuration
//! plus material model, runs the time loop with progress reporting and persists
//! the result in a run store. The CLI is a thin shell over this crate.

pub mod error;
pub mod progress;
pub mod project_service;
pub mod run_service;
pub mod runtime_compile;

pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage, StepProgress};
pub use project_service::{load_case, save_case, template_case, validate_case};
pub use run_service::{
    LoadedRun, RunOptions, RunRequest, RunResponse, RunTimingSummary, execute_case, list_runs,
    load_run, run_case, run_case_with_progress,
};
pub use runtime_compile::{CaseRuntime, build_property_model, compile_case};

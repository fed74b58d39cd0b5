//! pf-results: run storage for completed simulations.
//!
//! A run directory holds `manifest.json`, `steps.jsonl` (one step record per
//! line), `snapshot.txt` (plain final fields) and `profile.csv`.

pub mod hash;
pub mod snapshot;
pub mod store;
pub mod types;

pub use hash::compute_run_id;
pub use snapshot::{format_profile_csv, format_snapshot, parse_profile_csv};
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Malformed {file} at line {line}: {message}")]
    Malformed {
        file: &'static str,
        line: usize,
        message: String,
    },

    #[error("Profile columns have different lengths")]
    RaggedProfile,
}

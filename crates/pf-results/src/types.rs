use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: String,
    pub case_name: String,
    /// RFC 3339, UTC
    pub timestamp: String,
    pub solver_version: String,
    pub nodes: usize,
    pub dt_s: f64,
    pub steps: usize,
    pub converged_steps: usize,
    /// Property evaluations outside the correlation window during the run
    #[serde(default)]
    pub range_warnings: u64,
}

/// Current time in the manifest timestamp format.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// One timestep as persisted in `steps.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    pub step: usize,
    pub time_s: f64,
    pub courant: f64,
    pub reynolds: f64,
    pub inner_iterations: usize,
    pub converged: bool,
    pub velocity_change: f64,
    pub max_continuity_residual: f64,
}

/// Final fields in node order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileSnapshot {
    pub time_s: f64,
    pub z_m: Vec<f64>,
    pub u_m_s: Vec<f64>,
    pub p_pa: Vec<f64>,
    pub t_k: Vec<f64>,
}

impl ProfileSnapshot {
    pub fn len(&self) -> usize {
        self.z_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_m.is_empty()
    }

    pub fn is_rectangular(&self) -> bool {
        let n = self.z_m.len();
        self.u_m_s.len() == n && self.p_pa.len() == n && self.t_k.len() == n
    }
}

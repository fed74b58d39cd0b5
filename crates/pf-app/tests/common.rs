#![allow(dead_code)]

use pf_project::schema::{BoundaryKindDef, CaseFile, MaterialDef};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn unique_temp_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("pf_app_{label}_{nanos}"));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Isothermal water column: 0.1 m, 21 nodes, 3 steps of 1 ms.
pub fn water_column() -> CaseFile {
    let mut case = CaseFile {
        name: "water-column".to_string(),
        ..CaseFile::default()
    };
    case.geometry.length_m = 0.1;
    case.geometry.nodes = 21;
    case.time.dt_s = 1e-3;
    case.time.t_max_s = 3e-3;
    case.coupling.corrector_count = 2;
    case.coupling.pressure_relaxation = 1.0;
    case.material = Some(MaterialDef::Constant {
        density_kg_m3: 1000.0,
        viscosity_pa_s: 1e-3,
        conductivity_w_m_k: 0.6,
        specific_heat_j_kg_k: 4180.0,
    });
    case.boundary.inlet_temperature = BoundaryKindDef::Dirichlet { value: 300.0 };
    case.boundary.outlet_temperature = BoundaryKindDef::Dirichlet { value: 300.0 };
    case
}

//! Case loading, saving and validation.

use std::path::Path;

use pf_project::CaseFile;

use crate::error::{AppError, AppResult};

/// Load a case file. `.json` is read as JSON, anything else as YAML.
pub fn load_case(path: &Path) -> AppResult<CaseFile> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::CaseFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let case = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => pf_project::parse_json(&content)?,
        _ => pf_project::parse_yaml(&content)?,
    };
    Ok(case)
}

pub fn save_case(path: &Path, case: &CaseFile) -> AppResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => pf_project::save_json(path, case)?,
        _ => pf_project::save_yaml(path, case)?,
    }
    Ok(())
}

pub fn validate_case(case: &CaseFile) -> AppResult<()> {
    pf_project::validate_case(case)?;
    Ok(())
}

/// Reference case as YAML.
pub fn template_case() -> AppResult<String> {
    Ok(pf_project::template_yaml()?)
}

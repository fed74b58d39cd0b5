//! Case file migration.

use crate::ProjectError;
use crate::schema::{CaseFile, MaterialDef};

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut case: CaseFile) -> Result<CaseFile, ProjectError> {
    while case.version < LATEST_VERSION {
        case = migrate_one_version(case)?;
    }
    Ok(case)
}

fn migrate_one_version(case: CaseFile) -> Result<CaseFile, ProjectError> {
    match case.version {
        0 => migrate_v0_to_v1(case),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 files predate the material section and always meant sodium with
/// the built-in coefficients.
fn migrate_v0_to_v1(mut case: CaseFile) -> Result<CaseFile, ProjectError> {
    if case.material.is_none() {
        case.material = Some(MaterialDef::Sodium { coefficients: None });
    }
    case.version = 1;
    Ok(case)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v0_gains_sodium_material() {
        let case = CaseFile {
            version: 0,
            material: None,
            ..CaseFile::default()
        };
        let migrated = migrate_to_latest(case).unwrap();
        assert_eq!(migrated.version, LATEST_VERSION);
        assert!(matches!(
            migrated.material,
            Some(MaterialDef::Sodium { coefficients: None })
        ));
    }

    #[test]
    fn latest_is_untouched() {
        let case = CaseFile::default();
        assert_eq!(migrate_to_latest(case.clone()).unwrap(), case);
    }
}

//! Case validation.
//!
//! Checks the file on its own terms, with field paths in the messages. The
//! solver re-validates the compiled configuration.

use crate::schema::{BoundaryKindDef, CaseFile, MaterialDef, SourceProfileDef};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing section: {section}")]
    MissingSection { section: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must be positive"))
    }
}

fn finite(field: &str, v: f64) -> Result<(), ValidationError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, v, "must be finite"))
    }
}

fn unit_interval(field: &str, v: f64) -> Result<(), ValidationError> {
    if v > 0.0 && v <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, v, "must lie in (0, 1]"))
    }
}

pub fn validate_case(case: &CaseFile) -> Result<(), ValidationError> {
    if case.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }
    if case.name.trim().is_empty() {
        return Err(invalid("name", "\"\"", "must not be empty"));
    }

    if case.geometry.nodes < 3 {
        return Err(invalid("geometry.nodes", case.geometry.nodes, "need at least 3"));
    }
    positive("geometry.length_m", case.geometry.length_m)?;

    match &case.material {
        None => {
            return Err(ValidationError::MissingSection {
                section: "material".to_string(),
            });
        }
        Some(MaterialDef::Constant {
            density_kg_m3,
            viscosity_pa_s,
            conductivity_w_m_k,
            specific_heat_j_kg_k,
        }) => {
            positive("material.density_kg_m3", *density_kg_m3)?;
            positive("material.viscosity_pa_s", *viscosity_pa_s)?;
            positive("material.conductivity_w_m_k", *conductivity_w_m_k)?;
            positive("material.specific_heat_j_kg_k", *specific_heat_j_kg_k)?;
        }
        Some(MaterialDef::Sodium { coefficients }) => {
            if let Some(c) = coefficients {
                positive("material.coefficients.critical_temperature_k", c.critical_temperature_k)?;
                if c.solidification_k >= c.max_valid_k {
                    return Err(invalid(
                        "material.coefficients.solidification_k",
                        c.solidification_k,
                        "must be below max_valid_k",
                    ));
                }
            }
        }
    }

    positive("physics.permeability_m2", case.physics.permeability_m2)?;
    finite("physics.forchheimer", case.physics.forchheimer)?;
    if case.physics.forchheimer < 0.0 {
        return Err(invalid(
            "physics.forchheimer",
            case.physics.forchheimer,
            "must be non-negative",
        ));
    }
    positive("physics.initial_temperature_k", case.physics.initial_temperature_k)?;
    finite("physics.initial_velocity_m_s", case.physics.initial_velocity_m_s)?;

    positive("time.dt_s", case.time.dt_s)?;
    positive("time.t_max_s", case.time.t_max_s)?;
    if case.time.steps() == 0 {
        return Err(invalid("time.t_max_s", case.time.t_max_s, "shorter than one timestep"));
    }

    let c = &case.coupling;
    if c.max_inner_iterations == 0 {
        return Err(invalid("coupling.max_inner_iterations", 0, "must be at least 1"));
    }
    positive("coupling.tolerance", c.tolerance)?;
    if c.corrector_count == 0 {
        return Err(invalid("coupling.corrector_count", 0, "must be at least 1"));
    }
    unit_interval("coupling.pressure_relaxation", c.pressure_relaxation)?;
    unit_interval("coupling.velocity_relaxation", c.velocity_relaxation)?;

    let b = &case.boundary;
    finite("boundary.inlet_velocity_m_s", b.inlet_velocity_m_s)?;
    finite("boundary.outlet_pressure_pa", b.outlet_pressure_pa)?;
    if let BoundaryKindDef::Dirichlet { value } = b.outlet_velocity {
        finite("boundary.outlet_velocity.value", value)?;
    }
    if let BoundaryKindDef::Dirichlet { value } = b.inlet_temperature {
        positive("boundary.inlet_temperature.value", value)?;
    }
    if let BoundaryKindDef::Dirichlet { value } = b.outlet_temperature {
        positive("boundary.outlet_temperature.value", value)?;
    }

    validate_profile("sources.mass", &case.sources.mass)?;
    validate_profile("sources.momentum", &case.sources.momentum)?;
    validate_profile("sources.energy", &case.sources.energy)?;
    Ok(())
}

fn validate_profile(field: &str, profile: &SourceProfileDef) -> Result<(), ValidationError> {
    let in_unit = |v: f64| (0.0..=1.0).contains(&v);
    match profile {
        SourceProfileDef::Zones { zones } => {
            for (i, z) in zones.iter().enumerate() {
                let name = format!("{field}.zones[{i}]");
                if !in_unit(z.start) || !in_unit(z.end) || z.start > z.end {
                    return Err(invalid(
                        &name,
                        format!("[{}, {}]", z.start, z.end),
                        "need 0 <= start <= end <= 1",
                    ));
                }
                finite(&format!("{name}.value"), z.value)?;
            }
        }
        SourceProfileDef::Alternating {
            breakpoints,
            magnitude,
        } => {
            if breakpoints.len() < 2 {
                return Err(invalid(
                    &format!("{field}.breakpoints"),
                    breakpoints.len(),
                    "need at least two breakpoints",
                ));
            }
            let ordered = breakpoints.windows(2).all(|w| w[0] <= w[1]);
            if !ordered || !breakpoints.iter().all(|b| in_unit(*b)) {
                return Err(invalid(
                    &format!("{field}.breakpoints"),
                    format!("{breakpoints:?}"),
                    "must be ascending fractions in [0, 1]",
                ));
            }
            finite(&format!("{field}.magnitude"), *magnitude)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ZoneDef;

    #[test]
    fn default_case_is_valid() {
        validate_case(&CaseFile::default()).unwrap();
    }

    #[test]
    fn future_version_rejected() {
        let case = CaseFile {
            version: 99,
            ..CaseFile::default()
        };
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }

    #[test]
    fn missing_material_rejected() {
        let case = CaseFile {
            material: None,
            ..CaseFile::default()
        };
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::MissingSection { .. })
        ));
    }

    #[test]
    fn error_names_the_field() {
        let mut case = CaseFile::default();
        case.coupling.pressure_relaxation = 1.2;
        let err = validate_case(&case).unwrap_err();
        assert!(err.to_string().contains("coupling.pressure_relaxation"));

        let mut case = CaseFile::default();
        case.sources.mass = SourceProfileDef::Zones {
            zones: vec![ZoneDef {
                start: 0.8,
                end: 0.2,
                value: 1.0,
            }],
        };
        let err = validate_case(&case).unwrap_err();
        assert!(err.to_string().contains("sources.mass.zones[0]"));
    }

    #[test]
    fn unordered_breakpoints_rejected() {
        let mut case = CaseFile::default();
        case.sources.energy = SourceProfileDef::Alternating {
            breakpoints: vec![0.0, 0.7, 0.3],
            magnitude: 1.0,
        };
        assert!(validate_case(&case).is_err());
    }
}

use pf_project::*;

#[test]
fn roundtrip_yaml_reference_case() {
    let case = CaseFile::default();
    let path = std::env::temp_dir().join("pf_project_roundtrip_reference.yaml");

    save_yaml(&path, &case).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(case, loaded);

    let via_ext = load_case(&path).unwrap();
    assert_eq!(case, via_ext);
}

#[test]
fn roundtrip_json_with_sources() {
    let mut case = CaseFile::default();
    case.name = "json-sources".to_string();
    case.material = Some(MaterialDef::Constant {
        density_kg_m3: 1000.0,
        viscosity_pa_s: 1e-3,
        conductivity_w_m_k: 0.6,
        specific_heat_j_kg_k: 4180.0,
    });
    case.sources.mass = SourceProfileDef::Alternating {
        breakpoints: vec![0.0, 0.25, 0.5, 1.0],
        magnitude: 20.0,
    };
    case.sources.energy = SourceProfileDef::Zones {
        zones: vec![ZoneDef {
            start: 0.1,
            end: 0.4,
            value: 5e5,
        }],
    };
    case.boundary.outlet_temperature = BoundaryKindDef::ZeroGradient;

    let path = std::env::temp_dir().join("pf_project_roundtrip_sources.json");
    save_json(&path, &case).unwrap();
    assert_eq!(load_case(&path).unwrap(), case);
}

#[test]
fn template_parses_back_to_default() {
    let text = template_yaml().unwrap();
    assert!(text.contains("sodium-bed"));
    assert_eq!(parse_yaml(&text).unwrap(), CaseFile::default());
}

#[test]
fn version_zero_file_is_migrated() {
    let case = parse_yaml("version: 0\nname: legacy\n").unwrap();
    assert_eq!(case.version, LATEST_VERSION);
    assert!(matches!(case.material, Some(MaterialDef::Sodium { .. })));
}

#[test]
fn invalid_file_is_refused() {
    let err = parse_yaml("version: 1\nname: bad\ngeometry:\n  length_m: 0.01\n  nodes: 2\n")
        .unwrap_err();
    assert!(matches!(err, ProjectError::Validation(_)));
}

#[test]
fn unknown_extension_is_refused() {
    let path = std::env::temp_dir().join("pf_project_case.toml");
    assert!(matches!(
        load_case(&path),
        Err(ProjectError::UnknownFormat { .. })
    ));
}

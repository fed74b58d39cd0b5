use pf_results::*;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("pf_results_{label}_{nanos}"))
}

fn manifest(run_id: &str, case_name: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        case_name: case_name.to_string(),
        timestamp: timestamp.to_string(),
        solver_version: "0.1.0".to_string(),
        nodes: 3,
        dt_s: 1e-3,
        steps: 2,
        converged_steps: 2,
        range_warnings: 0,
    }
}

fn steps() -> Vec<StepRecord> {
    (1..=2)
        .map(|step| StepRecord {
            step,
            time_s: step as f64 * 1e-3,
            courant: 0.1,
            reynolds: 0.5,
            inner_iterations: 4,
            converged: true,
            velocity_change: 1e-10,
            max_continuity_residual: 1e-11,
        })
        .collect()
}

fn snapshot() -> ProfileSnapshot {
    ProfileSnapshot {
        time_s: 2e-3,
        z_m: vec![0.0, 0.05, 0.1],
        u_m_s: vec![0.01, 0.01, 0.01],
        p_pa: vec![1.0, 0.5, 0.0],
        t_k: vec![300.0, 300.0, 300.0],
    }
}

#[test]
fn save_and_load_run() {
    let dir = unique_temp_dir("roundtrip");
    let store = RunStore::new(dir.clone()).unwrap();
    let m = manifest("abc123", "column", "2026-02-25T12:00:00+00:00");

    let run_dir = store.save_run(&m, &steps(), &snapshot()).unwrap();
    for file in ["manifest.json", "steps.jsonl", "snapshot.txt", "profile.csv"] {
        assert!(run_dir.join(file).exists(), "{file} missing");
    }
    assert!(store.has_run("abc123"));

    assert_eq!(store.load_manifest("abc123").unwrap(), m);
    assert_eq!(store.load_steps("abc123").unwrap(), steps());
    assert_eq!(store.load_profile("abc123").unwrap(), snapshot());

    let text = std::fs::read_to_string(run_dir.join("snapshot.txt")).unwrap();
    assert_eq!(text.lines().count(), 3);

    store.delete_run("abc123").unwrap();
    assert!(!store.has_run("abc123"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn list_runs_filters_by_case_and_sorts() {
    let dir = unique_temp_dir("list");
    let store = RunStore::new(dir.clone()).unwrap();

    store
        .save_run(
            &manifest("late", "column", "2026-03-01T00:00:00+00:00"),
            &steps(),
            &snapshot(),
        )
        .unwrap();
    store
        .save_run(
            &manifest("early", "column", "2026-01-01T00:00:00+00:00"),
            &steps(),
            &snapshot(),
        )
        .unwrap();
    store
        .save_run(
            &manifest("other", "sodium-bed", "2026-02-01T00:00:00+00:00"),
            &steps(),
            &snapshot(),
        )
        .unwrap();

    let runs = store.list_runs("column").unwrap();
    let ids: Vec<&str> = runs.iter().map(|r| r.run_id.as_str()).collect();
    assert_eq!(ids, ["early", "late"]);
    assert_eq!(store.list_runs("missing").unwrap().len(), 0);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_run_is_reported() {
    let dir = unique_temp_dir("missing");
    let store = RunStore::new(dir.clone()).unwrap();
    assert!(matches!(
        store.load_manifest("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
    assert!(store.load_steps("nope").is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

//! Run storage API.

use crate::snapshot::{format_profile_csv, format_snapshot, parse_profile_csv};
use crate::types::{ProfileSnapshot, RunManifest, StepRecord};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST: &str = "manifest.json";
const STEPS: &str = "steps.jsonl";
const SNAPSHOT: &str = "snapshot.txt";
const PROFILE: &str = "profile.csv";

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(MANIFEST).exists()
    }

    /// Write every file of a run. An existing run with the same id is overwritten.
    pub fn save_run(
        &self,
        manifest: &RunManifest,
        steps: &[StepRecord],
        snapshot: &ProfileSnapshot,
    ) -> ResultsResult<PathBuf> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join(MANIFEST), manifest_json)?;

        let mut steps_content = String::new();
        for record in steps {
            let line = serde_json::to_string(record)?;
            steps_content.push_str(&line);
            steps_content.push('\n');
        }
        fs::write(run_dir.join(STEPS), steps_content)?;

        fs::write(run_dir.join(SNAPSHOT), format_snapshot(snapshot))?;
        fs::write(run_dir.join(PROFILE), format_profile_csv(snapshot)?)?;

        Ok(run_dir)
    }

    fn existing_file(&self, run_id: &str, name: &str) -> ResultsResult<PathBuf> {
        let path = self.run_dir(run_id).join(name);
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        Ok(path)
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let path = self.existing_file(run_id, MANIFEST)?;
        let content = fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_steps(&self, run_id: &str) -> ResultsResult<Vec<StepRecord>> {
        let path = self.existing_file(run_id, STEPS)?;
        let content = fs::read_to_string(path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                let record: StepRecord = serde_json::from_str(line)?;
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Final profile, timestamped from the manifest step count.
    pub fn load_profile(&self, run_id: &str) -> ResultsResult<ProfileSnapshot> {
        let manifest = self.load_manifest(run_id)?;
        let path = self.existing_file(run_id, PROFILE)?;
        let mut snapshot = parse_profile_csv(&fs::read_to_string(path)?)?;
        snapshot.time_s = manifest.steps as f64 * manifest.dt_s;
        Ok(snapshot)
    }

    /// Manifests of every stored run of `case_name`, oldest first.
    pub fn list_runs(&self, case_name: &str) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id)
                    && manifest.case_name == case_name
                {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

//! Run execution and persistence.

use std::path::{Path, PathBuf};
use std::time::Instant;

use pf_project::CaseFile;
use pf_results::{ProfileSnapshot, RunManifest, RunStore, StepRecord};
use pf_solver::{FieldSnapshot, StepReport, TimeStepper};

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage, StepProgress};
use crate::project_service;
use crate::runtime_compile;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub solver_version: String,
    /// Replaces the step count implied by `t_max / dt`.
    pub steps_override: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
            steps_override: None,
        }
    }
}

/// Request to run a case file and store the result under `out_dir`.
pub struct RunRequest<'a> {
    pub case_path: &'a Path,
    pub out_dir: &'a Path,
    pub options: RunOptions,
}

#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub solve_time_s: f64,
    pub save_time_s: f64,
    pub total_time_s: f64,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub run_dir: PathBuf,
    pub manifest: RunManifest,
    pub timing: RunTimingSummary,
}

/// A stored run read back from disk.
#[derive(Debug, Clone)]
pub struct LoadedRun {
    pub manifest: RunManifest,
    pub steps: Vec<StepRecord>,
    pub profile: ProfileSnapshot,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

pub fn run_case(request: &RunRequest) -> AppResult<RunResponse> {
    run_case_with_progress(request, None)
}

pub fn run_case_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    emit_progress(
        &mut progress_cb,
        RunStage::LoadingCase,
        Instant::now(),
        Some(request.case_path.display().to_string()),
    );
    let case = project_service::load_case(request.case_path)?;
    execute_case(&case, request.out_dir, &request.options, progress_cb)
}

/// Run an already loaded case and persist it.
///
/// The run id is derived from the case as actually run, so a step override
/// yields a different id than the file on its own.
pub fn execute_case(
    case: &CaseFile,
    out_dir: &Path,
    options: &RunOptions,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    let mut case = case.clone();
    if let Some(steps) = options.steps_override {
        if steps == 0 {
            return Err(AppError::InvalidInput(
                "step override must be at least 1".to_string(),
            ));
        }
        case.time.t_max_s = steps as f64 * case.time.dt_s;
    }

    emit_progress(&mut progress_cb, RunStage::CompilingRuntime, started, None);
    let compile_start = Instant::now();
    let runtime = runtime_compile::compile_case(&case)?;
    timing.compile_time_s = compile_start.elapsed().as_secs_f64();

    let run_id = pf_results::compute_run_id(&case, &options.solver_version);
    let total_steps = runtime.config.time.steps;
    let dt = runtime.config.time.dt;
    let t_end = runtime.config.duration();
    tracing::info!(
        case = %case.name,
        run_id = %run_id,
        steps = total_steps,
        dt,
        material = runtime.model.name(),
        "starting run"
    );

    emit_progress(&mut progress_cb, RunStage::Stepping, started, None);
    let solve_start = Instant::now();
    let mut stepper = TimeStepper::new(runtime.config, runtime.model)?;
    let summary = {
        let mut on_step = |report: &StepReport| {
            if let Some(cb) = progress_cb.as_deref_mut() {
                let done = report.step + 1;
                cb(RunProgressEvent {
                    stage: RunStage::Stepping,
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                    message: None,
                    step: Some(StepProgress {
                        step: done,
                        total_steps,
                        sim_time_s: done as f64 * dt,
                        t_end_s: t_end,
                        fraction_complete: done as f64 / total_steps as f64,
                        courant: report.courant,
                        reynolds: report.reynolds,
                        inner_iterations: report.inner_iterations,
                        converged: report.outcome.is_converged(),
                    }),
                });
            }
        };
        stepper.run(Some(&mut on_step))?
    };
    timing.solve_time_s = solve_start.elapsed().as_secs_f64();

    if let Err(e) = summary.snapshot.ensure_finite() {
        tracing::warn!(run_id = %run_id, error = %e, "run diverged, results not saved");
        return Err(e.into());
    }

    let converged_steps = summary.converged_steps();
    if converged_steps < summary.reports.len() {
        tracing::warn!(
            unconverged = summary.reports.len() - converged_steps,
            "some timesteps exhausted the inner iteration budget"
        );
    }

    emit_progress(&mut progress_cb, RunStage::SavingResults, started, None);
    let save_start = Instant::now();
    let manifest = RunManifest {
        run_id: run_id.clone(),
        case_name: case.name.clone(),
        timestamp: pf_results::timestamp_now(),
        solver_version: options.solver_version.clone(),
        nodes: case.geometry.nodes,
        dt_s: dt,
        steps: summary.reports.len(),
        converged_steps,
        range_warnings: summary.range_warnings,
    };
    let records: Vec<StepRecord> = summary.reports.iter().map(step_record).collect();
    let store = RunStore::new(out_dir.to_path_buf())?;
    let run_dir = store.save_run(&manifest, &records, &profile(&summary.snapshot))?;
    timing.save_time_s = save_start.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();

    tracing::info!(
        run_id = %run_id,
        dir = %run_dir.display(),
        total_s = timing.total_time_s,
        "run saved"
    );
    emit_progress(
        &mut progress_cb,
        RunStage::Completed,
        started,
        Some(run_id.clone()),
    );

    Ok(RunResponse {
        run_id,
        run_dir,
        manifest,
        timing,
    })
}

pub fn load_run(out_dir: &Path, run_id: &str) -> AppResult<LoadedRun> {
    let store = RunStore::new(out_dir.to_path_buf())?;
    if !store.has_run(run_id) {
        return Err(AppError::RunNotFound(run_id.to_string()));
    }
    Ok(LoadedRun {
        manifest: store.load_manifest(run_id)?,
        steps: store.load_steps(run_id)?,
        profile: store.load_profile(run_id)?,
    })
}

pub fn list_runs(out_dir: &Path, case_name: &str) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::new(out_dir.to_path_buf())?;
    Ok(store.list_runs(case_name)?)
}

fn step_record(report: &StepReport) -> StepRecord {
    StepRecord {
        step: report.step,
        time_s: report.time,
        courant: report.courant,
        reynolds: report.reynolds,
        inner_iterations: report.inner_iterations,
        converged: report.outcome.is_converged(),
        velocity_change: report.velocity_change,
        max_continuity_residual: report.max_continuity_residual,
    }
}

fn profile(snapshot: &FieldSnapshot) -> ProfileSnapshot {
    ProfileSnapshot {
        time_s: snapshot.time,
        z_m: snapshot.z.clone(),
        u_m_s: snapshot.u.clone(),
        p_pa: snapshot.p.clone(),
        t_k: snapshot.t.clone(),
    }
}

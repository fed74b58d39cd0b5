mod common;

use common::{unique_temp_dir, water_column};
use pf_app::{RunOptions, RunProgressEvent, RunStage, execute_case};

#[test]
fn stages_and_steps_arrive_in_order() {
    let dir = unique_temp_dir("progress");
    let mut events: Vec<RunProgressEvent> = Vec::new();
    let mut cb = |event: RunProgressEvent| events.push(event);

    execute_case(&water_column(), &dir, &RunOptions::default(), Some(&mut cb)).unwrap();

    let mut stages: Vec<RunStage> = events.iter().map(|e| e.stage).collect();
    stages.dedup();
    assert_eq!(
        stages,
        [
            RunStage::CompilingRuntime,
            RunStage::Stepping,
            RunStage::SavingResults,
            RunStage::Completed,
        ]
    );

    let steps: Vec<_> = events.iter().filter_map(|e| e.step.as_ref()).collect();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[2].step, 3);
    assert_eq!(steps[2].total_steps, 3);
    assert!((steps[2].fraction_complete - 1.0).abs() < 1e-12);
    assert!((steps[2].sim_time_s - steps[2].t_end_s).abs() < 1e-12);
    assert!(steps.iter().all(|s| s.converged && s.courant > 0.0));

    let elapsed: Vec<f64> = events.iter().map(|e| e.elapsed_wall_s).collect();
    assert!(elapsed.windows(2).all(|w| w[0] <= w[1]));
    let _ = std::fs::remove_dir_all(&dir);
}

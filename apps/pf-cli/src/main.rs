use clap::{Parser, Subcommand};
use pf_app::{
    AppResult, RunOptions, RunProgressEvent, RunRequest, RunStage, project_service, run_service,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PorFlow CLI - transient porous pipe flow solver", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a case file
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Print the reference case as YAML
    Template {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a case and store the results
    Run {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Directory holding stored runs
        #[arg(long, default_value = "runs")]
        out: PathBuf,
        /// Override the number of timesteps
        #[arg(long)]
        steps: Option<usize>,
    },
    /// Show a stored run
    ShowRun {
        /// Directory holding stored runs
        dir: PathBuf,
        /// Run ID to display
        run_id: String,
    },
}

fn main() -> AppResult<()> {
    // Per-step diagnostics are logged at info; RUST_LOG=info shows them.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Template { output } => cmd_template(output.as_deref()),
        Commands::Run {
            case_path,
            out,
            steps,
        } => cmd_run(&case_path, &out, steps),
        Commands::ShowRun { dir, run_id } => cmd_show_run(&dir, &run_id),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = project_service::load_case(case_path)?;
    project_service::validate_case(&case)?;
    println!("✓ Case '{}' is valid", case.name);
    println!(
        "  {} nodes over {} m, {} steps of {} s",
        case.geometry.nodes,
        case.geometry.length_m,
        case.time.steps(),
        case.time.dt_s
    );
    Ok(())
}

fn cmd_template(output: Option<&Path>) -> AppResult<()> {
    let yaml = project_service::template_case()?;
    match output {
        Some(path) => {
            std::fs::write(path, yaml)?;
            println!("✓ Template written to {}", path.display());
        }
        None => print!("{yaml}"),
    }
    Ok(())
}

fn cmd_run(case_path: &Path, out: &Path, steps: Option<usize>) -> AppResult<()> {
    println!("Running case: {}", case_path.display());
    tracing::debug!(?steps, out = %out.display(), "run requested");

    let request = RunRequest {
        case_path,
        out_dir: out,
        options: RunOptions {
            steps_override: steps,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::run_case_with_progress(
        &request,
        Some(&mut |event: RunProgressEvent| {
            let fraction = event
                .step
                .as_ref()
                .map(|s| s.fraction_complete)
                .unwrap_or(-1.0);
            let emit_now = event.step.is_none()
                || (fraction - last_fraction).abs() >= 0.005
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                if fraction >= 0.0 {
                    last_fraction = fraction;
                }
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    let m = &response.manifest;
    println!("✓ Simulation completed: {}", response.run_id);
    println!("  Stored in: {}", response.run_dir.display());
    println!("  Steps: {} ({} converged)", m.steps, m.converged_steps);
    if m.range_warnings > 0 {
        println!(
            "  ! {} property evaluations outside the correlation range",
            m.range_warnings
        );
    }
    let t = &response.timing;
    println!(
        "  Timing: compile {:.3}s, solve {:.3}s, save {:.3}s, total {:.3}s",
        t.compile_time_s, t.solve_time_s, t.save_time_s, t.total_time_s
    );
    Ok(())
}

fn cmd_show_run(dir: &Path, run_id: &str) -> AppResult<()> {
    let run = run_service::load_run(dir, run_id)?;
    let m = &run.manifest;

    println!("Run: {}", m.run_id);
    println!("  Case: {}", m.case_name);
    println!("  Timestamp: {}", m.timestamp);
    println!("  Solver version: {}", m.solver_version);
    println!("  Nodes: {}", m.nodes);
    println!(
        "  Steps: {} x {} s ({} converged)",
        m.steps, m.dt_s, m.converged_steps
    );
    if m.range_warnings > 0 {
        println!("  Range warnings: {}", m.range_warnings);
    }

    if let Some(last) = run.steps.last() {
        println!(
            "  Last step: Co={:.3e} Re={:.3e} iterations={} residual={:.3e}",
            last.courant, last.reynolds, last.inner_iterations, last.max_continuity_residual
        );
    }

    let p = &run.profile;
    if let (Some(first), Some(last)) = (p.z_m.first(), p.z_m.last()) {
        println!("  Profile at t = {} s ({} nodes):", p.time_s, p.len());
        println!("    {:>12} {:>14} {:>14} {:>12}", "z [m]", "u [m/s]", "p [Pa]", "T [K]");
        let n = p.len();
        for (label, i) in [("inlet", 0), ("middle", n / 2), ("outlet", n - 1)] {
            println!(
                "    {:>12.5e} {:>14.6e} {:>14.6e} {:>12.3}  {}",
                p.z_m[i], p.u_m_s[i], p.p_pa[i], p.t_k[i], label
            );
        }
        let (t_min, t_max) = p
            .t_k
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
                (lo.min(t), hi.max(t))
            });
        println!("    T range [{t_min:.3}, {t_max:.3}] K over [{first}, {last}] m");
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (&event.stage, &event.step) {
        (RunStage::Stepping, Some(s)) => {
            let width = 28usize;
            let filled = ((s.fraction_complete * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  t={:.4}/{:.4}s  step={}/{}  Co={:.2e}  Re={:.2e}  it={}{}  elapsed={:.1}s",
                bar,
                s.fraction_complete * 100.0,
                s.sim_time_s,
                s.t_end_s,
                s.step,
                s.total_steps,
                s.courant,
                s.reynolds,
                s.inner_iterations,
                if s.converged { "" } else { "!" },
                event.elapsed_wall_s
            );
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{line}");
        }
    }
    let _ = io::stdout().flush();
}

//! courier: runnable demo for the robot courier simulator.
//!
//! Loads an optional TOML config (first CLI argument), builds the grid from
//! a text layout, runs until every package is delivered and every robot is
//! back home, and writes snapshots, events and `times.txt` to the output
//! directory.
//!
//! ```text
//! cargo run -p courier -- apps/courier/courier.toml
//! RUST_LOG=debug cargo run -p courier
//! ```

mod config;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use rb_output::{SimOutputObserver, TimesReport, TIMES_FILE_NAME};
use rb_sim::{Sim, SimBuilder, SimObserver};
use rb_spatial::{AStarPlanner, PathPlanner};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;

// ── Output backend ────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
fn open_writer(dir: &Path) -> Result<rb_output::CsvWriter> {
    Ok(rb_output::CsvWriter::new(dir)?)
}

#[cfg(feature = "sqlite")]
fn open_writer(dir: &Path) -> Result<rb_output::SqliteWriter> {
    Ok(rb_output::SqliteWriter::new(dir)?)
}

// ── Driving ───────────────────────────────────────────────────────────────────

/// Tick at the configured wall-clock pace, re-reading the interval every
/// tick so speed changes take effect immediately.
fn run_realtime<P: PathPlanner, O: SimObserver>(sim: &mut Sim<P>, observer: &mut O) -> Result<()> {
    sim.start()?;
    while sim.state.is_running() && sim.clock.current_tick.0 < sim.config.max_ticks {
        sim.tick(observer)?;
        std::thread::sleep(sim.tick_interval());
    }
    observer.on_sim_end(sim.clock.current_tick, sim.elapsed());
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => AppConfig::from_file(Path::new(&path))?,
        None => AppConfig::default(),
    };
    let grid = config.load_grid()?;

    println!("=== courier: robot courier simulator ===");
    println!(
        "Grid: {}x{}  |  Robots: {}  |  Packages: {}  |  Delivery points: {}",
        grid.columns(),
        grid.rows(),
        grid.starts().len(),
        grid.packages().len(),
        grid.ends().len(),
    );
    print!("{grid}");
    println!();

    let planner = AStarPlanner::for_grid(&grid);
    let mut sim = SimBuilder::new(config.sim.clone(), grid, planner).build()?;

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let mut obs = SimOutputObserver::new(open_writer(&config.output_dir)?);

    let t0 = Instant::now();
    if config.realtime {
        run_realtime(&mut sim, &mut obs)?;
    } else {
        sim.run(&mut obs)?;
    }
    let wall = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    let report = TimesReport::from_sim(&sim);
    let report_path = config.output_dir.join(TIMES_FILE_NAME);
    report.write_path(&report_path)?;
    info!(path = %report_path.display(), "times report written");

    println!(
        "{} at {} ({} ticks) in {:.3} s wall",
        if sim.is_finished() { "Finished" } else { "Stopped at horizon" },
        sim.elapsed(),
        sim.clock.current_tick.0,
        wall.as_secs_f64(),
    );
    println!("Delivered {}/{} packages", sim.delivered.len(), sim.grid.packages().len());
    println!();

    println!("{:<6} {:<10} {:<8} {:<10}", "Robot", "Home", "Steps", "Parked at");
    println!("{}", "-".repeat(36));
    for view in sim.robot_views() {
        let i = view.id.index();
        let steps = sim.robots.trail[i].len().saturating_sub(1);
        let parked = sim.park_time(view.id).map_or_else(|| "--".to_owned(), |t| t.to_string());
        println!("{:<6} {:<10} {:<8} {:<10}", view.id.0, view.home.to_string(), steps, parked);
    }

    Ok(())
}

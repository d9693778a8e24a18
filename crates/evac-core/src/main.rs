//! Evacuation Drill Simulator
//!
//! Headless runner: loads a tuning file, plays the drill script against a
//! seeded world and prints a JSON summary per session.
//!
//! Examples:
//!   cargo run -p evac-core -- --ticks 3000 --alarm-at 0 --fire-at 50
//!   RUST_LOG=debug cargo run -p evac-core -- --config drill.toml --print-snapshot

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use evac_core::{ConfigError, DrillAction, SessionSummary, SimConfig, StatsCollector, World};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "evac_sim")]
#[command(about = "Agent-based evacuation drill under a spreading hazard")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 3000)]
    ticks: u64,

    /// TOML tuning file (falls back to ./drill.toml, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raise the alarm at this tick
    #[arg(long)]
    alarm_at: Option<u64>,

    /// Ignite the hazard at the configured ignition point at this tick
    #[arg(long)]
    fire_at: Option<u64>,

    /// Ticks between progress log lines
    #[arg(long, default_value_t = 100)]
    report_interval: u64,

    /// Stop early once every agent is out and no actions remain
    #[arg(long)]
    stop_when_evacuated: bool,

    /// Print the final world snapshot as JSON
    #[arg(long)]
    print_snapshot: bool,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: Args) -> Result<(), RunError> {
    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::load_or_default(),
    };
    if let Some(tick) = args.alarm_at {
        config.drill.schedule(tick, DrillAction::RaiseAlarm);
    }
    if let Some(tick) = args.fire_at {
        config.drill.schedule(tick, DrillAction::StartHazard { origin: None });
    }
    if config.drill.is_empty() {
        warn!("No drill actions scheduled; raising alarm and starting hazard at tick 0");
        config.drill.schedule(0, DrillAction::RaiseAlarm);
        config.drill.schedule(0, DrillAction::StartHazard { origin: None });
    }

    info!(
        seed = args.seed,
        ticks = args.ticks,
        agents = config.agents.count,
        "Starting evacuation drill"
    );

    let script = config.drill.clone();
    let last_action = script.last_tick().unwrap_or(0);
    let mut world = World::seeded(config, args.seed)?;
    let mut stats = StatsCollector::new(world.agents().len());
    let mut summaries: Vec<SessionSummary> = Vec::new();

    for step in 0..args.ticks {
        for action in script.due(step) {
            info!(step, ?action, "Drill action");
            if let DrillAction::Reset = action {
                summaries.push(stats.summarize(&world));
                world = action.apply(world)?;
                stats = StatsCollector::new(world.agents().len());
            } else {
                world = action.apply(world)?;
            }
        }

        let report = world.tick();
        stats.record_tick(&report, world.active_hazard_cell_count());

        if args.report_interval > 0 && step % args.report_interval == 0 {
            info!(
                tick = report.timestamp.tick,
                time = report.timestamp.time,
                evacuated = world.evacuated_count(),
                remaining = world.remaining_count(),
                hazard_cells = world.active_hazard_cell_count(),
                blocked = report.steps.blocked,
                "Progress"
            );
        }

        if args.stop_when_evacuated && world.all_evacuated() && step >= last_action {
            info!(tick = report.timestamp.tick, "Stopping: everyone is out");
            break;
        }
    }

    summaries.push(stats.summarize(&world));
    println!("{}", serde_json::to_string_pretty(&summaries)?);

    if args.print_snapshot {
        println!("{}", world.snapshot().to_json()?);
    }
    Ok(())
}

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use orrery::catalog::{self, BuiltinCatalog};
use orrery::config::{SimulationConfig, load_config};
use orrery::export::csv::SnapshotCsvWriter;
use orrery::export::snapshot::Snapshot;
use orrery::export::{self, json};
use orrery::{PhysicsSimulator, SolarSystem, SystemSource};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Headless driver: propagate a system and export body positions"
)]
struct Cli {
    /// System to load from the built-in catalog (case-insensitive)
    #[arg(long, default_value = catalog::SOLAR_SYSTEM)]
    system: String,

    /// Motion model
    #[arg(long, value_enum, default_value_t = Mode::Kinematic)]
    mode: Mode,

    /// Start time in years since J2000 (overrides the config clock)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "preset")]
    start: Option<f64>,

    /// Start at a historic preset whose label contains this text
    #[arg(long)]
    preset: Option<String>,

    /// Number of frames to simulate after the initial snapshot
    #[arg(long, default_value_t = 0)]
    frames: usize,

    /// Real seconds per frame, scaled by the clock's time scale
    #[arg(long, default_value_t = 1.0)]
    frame_seconds: f64,

    /// Physics sub-steps per frame (defaults to the config value)
    #[arg(long)]
    substeps: Option<u32>,

    /// Optional TOML/YAML simulation config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Output path (`-` for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,

    /// List available systems and presets, then exit
    #[arg(long, default_value_t = false)]
    list: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug, PartialEq)]
enum Mode {
    Kinematic,
    NBody,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Format {
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let source = BuiltinCatalog;

    if cli.list {
        for name in source.available() {
            match catalog::system_kind(&name) {
                catalog::SystemKind::Planetary => println!("{name}"),
                catalog::SystemKind::SpecialEvent => println!("{name} (special event)"),
            }
            for event in catalog::historic_events(&name) {
                println!("  {:<28} t = {:>8.3} yr", event.label, event.time);
            }
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let mut system = SolarSystem::new(PhysicsSimulator::from_config(&config.physics));
    system.load_system(&source, &cli.system)?;

    let mut clock = config.clock.build_clock();
    if let Some(start) = cli.start {
        clock.set_time(start);
    }
    if let Some(query) = &cli.preset {
        let event = find_preset(system.name(), query)?;
        info!(preset = event.label, time = event.time, "starting from preset");
        clock.set_time(event.time);
    }

    if cli.mode == Mode::NBody {
        system.set_physics_enabled(true, clock.time());
    }
    let substeps = cli.substeps.unwrap_or(config.physics.substeps);

    let mut snapshots: Vec<Snapshot> = Vec::with_capacity(cli.frames + 1);
    snapshots.push(system.snapshot(clock.time()));
    for _ in 0..cli.frames {
        let before = clock.time();
        clock.advance(cli.frame_seconds);
        system.update_physics_substepped(clock.time() - before, substeps);
        snapshots.push(system.snapshot(clock.time()));
    }
    info!(
        system = system.name(),
        mode = system.mode().label(),
        frames = cli.frames,
        "simulation finished"
    );

    let mut output = export::open_output(&cli.output)
        .with_context(|| format!("opening {}", cli.output.display()))?;
    match cli.format {
        Format::Csv => {
            let mut table = SnapshotCsvWriter::new(output)?;
            for snapshot in &snapshots {
                table.write_snapshot(snapshot)?;
            }
            table.flush()?;
        }
        Format::Json => {
            json::write_snapshots(&mut output, &snapshots)?;
            output.flush()?;
        }
    }

    Ok(())
}

fn find_preset(system: &str, query: &str) -> anyhow::Result<catalog::HistoricEvent> {
    let needle = query.to_lowercase();
    let events = catalog::historic_events(system);
    match events
        .iter()
        .find(|event| event.label.to_lowercase().contains(&needle))
    {
        Some(event) => Ok(*event),
        None => bail!("no preset matching '{}' for system '{}'", query, system),
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use shipment_grid::{MapFile, WorldGrid, procedural};
use shipment_input::{FrameInput, MoveIntent};
use shipment_kernel::{Session, SessionConfig};
use shipment_render::{DebugTextRenderer, RenderView, Renderer};
use shipment_tools::SessionInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shipment-cli", about = "Headless driver for the shipment grid world")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Session config (YAML); defaults to the built-in tuning
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MapArgs {
    /// Map file (.yaml, .yml or .json); defaults to the built-in Shipment map
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Reject layouts with rows of differing length
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build a map and print it top-down
    Map {
        #[command(flatten)]
        map: MapArgs,
        /// Cells drawn around the spawn point
        #[arg(short, long, default_value = "8")]
        radius: i32,
    },
    /// Hold a fixed input for a number of frames and report where the character ends up
    Simulate {
        #[command(flatten)]
        map: MapArgs,
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        ticks: u64,
        /// Frame time in seconds
        #[arg(long, default_value = "0.0166667")]
        dt: f32,
        #[arg(long)]
        forward: bool,
        #[arg(long)]
        back: bool,
        #[arg(long)]
        left: bool,
        #[arg(long)]
        right: bool,
        /// Hold jump for every frame
        #[arg(long)]
        jump: bool,
        /// View yaw in radians
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        yaw: f32,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a scripted walk twice and compare the final states
    Replay {
        /// Number of frames in the script
        #[arg(short, long, default_value = "240")]
        ticks: u64,
    },
    /// Generate a walled yard with seeded random crates
    Procedural {
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Cells from the center to the wall
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(i32).range(2..=512))]
        size: i32,
        /// Chance of a crate on each open cell
        #[arg(short, long, default_value = "0.2")]
        density: f32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SessionConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("shipment-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("grid: {}", shipment_grid::crate_info());
            println!("input: {}", shipment_input::crate_info());
            println!("kernel: {}", shipment_kernel::crate_info());
            println!("render: {}", shipment_render::crate_info());
            println!("tools: {}", shipment_tools::crate_info());
            let c = config.controller;
            println!(
                "controller: speed={} gravity={} jump_force={} eye_height={} jump_latch={}",
                c.speed, c.gravity, c.jump_force, c.eye_height, c.jump_latch
            );
        }
        Commands::Map { map, radius } => {
            let grid = load_grid(map.file.as_deref(), map.strict)?;
            println!("{}", SessionInspector::grid(&grid));
            let session = Session::from_config(grid, &config)?;
            print_frame(&session, radius);
        }
        Commands::Simulate {
            map,
            ticks,
            dt,
            forward,
            back,
            left,
            right,
            jump,
            yaw,
            json,
        } => {
            let grid = load_grid(map.file.as_deref(), map.strict)?;
            let mut session = Session::from_config(grid, &config)?;
            let intent = MoveIntent {
                forward,
                back,
                left,
                right,
            };
            let input = FrameInput::new(dt, intent).with_jump(jump).with_yaw(yaw);
            tracing::info!(ticks, dt, ?intent, jump, yaw, "simulating");
            for _ in 0..ticks {
                session.advance(&input);
            }

            let summary = SessionInspector::summary(&session);
            if json {
                println!("{}", SessionInspector::to_json(&summary)?);
            } else {
                println!("{summary}");
                print_frame(&session, 6);
            }
        }
        Commands::Replay { ticks } => {
            println!("Deterministic replay: ticks={ticks}");
            let script = walk_script(ticks);

            // Run 1
            let mut live = Session::from_config(MapFile::shipment().build(true)?, &config)?;
            live.run(&script);

            // Replay from the recorded inputs
            let replayed = Session::replay(
                MapFile::shipment().build(true)?,
                config.controller,
                config.spawn(),
                &script,
            )?;

            println!("Run 1:  {}", SessionInspector::summary(&live));
            println!("Replay: {}", SessionInspector::summary(&replayed));
            println!(
                "Match: {}",
                if live.state_hash() == replayed.state_hash() {
                    "OK"
                } else {
                    "MISMATCH"
                }
            );
        }
        Commands::Procedural {
            seed,
            size,
            density,
        } => {
            let grid = procedural::yard(config.cell_size, size, seed, density)?;
            println!("Procedural yard: seed={seed} size={size} density={density}");
            println!("{}", SessionInspector::grid(&grid));
            let session = Session::from_config(grid, &config)?;
            print_frame(&session, size.saturating_add(1));
        }
    }

    Ok(())
}

fn load_grid(file: Option<&Path>, strict: bool) -> Result<WorldGrid> {
    let map = match file {
        Some(path) => MapFile::load(path).with_context(|| format!("loading map {}", path.display()))?,
        None => MapFile::shipment(),
    };
    let grid = map
        .build(strict)
        .with_context(|| format!("building map {:?}", map.name))?;
    Ok(grid)
}

fn print_frame(session: &Session, radius: i32) {
    let view = RenderView::new(session.view()).with_radius(radius);
    print!("{}", DebugTextRenderer::new().render(session.grid(), &view));
}

/// Walk a square, turning slowly and hopping every second.
fn walk_script(ticks: u64) -> Vec<FrameInput> {
    let dt = 1.0 / 60.0;
    (0..ticks)
        .map(|i| {
            let intent = match (i / 60) % 4 {
                0 => MoveIntent::forward(),
                1 => MoveIntent::right(),
                2 => MoveIntent::back(),
                _ => MoveIntent::left(),
            };
            FrameInput::new(dt, intent)
                .with_jump(i % 60 == 30)
                .with_yaw(i as f32 * 0.002)
        })
        .collect()
}

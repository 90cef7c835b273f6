//! roomgrid - generate room-grid dungeon layouts from the command line
//!
//! Renders each layout as ASCII (north at the top) or JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use rg_core::config::parse_always_accept;
use rg_core::{GameRng, GenerateError, Generator, GeneratorConfig, Layout};

/// Room-grid dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "roomgrid")]
#[command(author, version, about = "Grow a connected room layout on a grid", long_about = None)]
struct Args {
    /// Config file with OPTIONS=key:value lines
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Regenerate until at least this many rooms exist
    #[arg(long = "min-rooms")]
    min_rooms: Option<usize>,

    /// Stop placing rooms at this count
    #[arg(long = "max-rooms")]
    max_rooms: Option<usize>,

    /// Candidate that skips the coin flip: origin, none, or x,y
    #[arg(long = "always-accept", value_parser = always_accept_arg)]
    always_accept: Option<AlwaysAccept>,

    /// Give up after this many attempts
    #[arg(long = "max-attempts")]
    max_attempts: Option<u32>,

    /// RNG seed (random if omitted)
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Number of layouts to generate, regenerating between each
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,

    /// Print layouts as JSON instead of ASCII
    #[arg(long)]
    json: bool,

    /// Print the effective config and exit
    #[arg(long = "dump-config")]
    dump_config: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parsed `--always-accept` value
#[derive(Debug, Clone, Copy)]
struct AlwaysAccept(Option<rg_core::Coord>);

fn always_accept_arg(value: &str) -> Result<AlwaysAccept, String> {
    parse_always_accept(value)
        .map(AlwaysAccept)
        .ok_or_else(|| format!("expected origin, none or x,y; got '{value}'"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Config file first, then command-line overrides
fn build_config(args: &Args) -> Result<GeneratorConfig, GenerateError> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load_from_file(path)?,
        None => GeneratorConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(min) = args.min_rooms {
        config.min_rooms = min;
    }
    if let Some(max) = args.max_rooms {
        config.max_rooms = max;
    }
    if let Some(AlwaysAccept(coord)) = args.always_accept {
        config.always_accept = coord;
    }
    if args.max_attempts.is_some() {
        config.max_attempts = args.max_attempts;
    }
    Ok(config)
}

fn print_layout(layout: &Layout, index: u32, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(layout)?);
        return Ok(());
    }

    println!(
        "Layout {}: {} rooms, {} attempt(s)",
        index + 1,
        layout.len(),
        layout.attempts
    );
    print!("{}", layout.to_ascii());
    for room in layout {
        let (wx, wy) = layout.world_position(room.coord);
        let doors: Vec<String> = room.open_directions().map(|d| d.to_string()).collect();
        println!("  {} at ({wx}, {wy}) doors: {}", room.coord, doors.join(" "));
    }
    println!();
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(args)?;

    if args.dump_config {
        print!("{}", config.to_config_string());
        return Ok(());
    }

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    info!("Using seed {}", rng.seed());

    let mut generator = Generator::new(config, rng)?;
    for i in 0..args.count {
        let layout = if i == 0 {
            generator.generate()?
        } else {
            generator.regenerate()?
        };
        print_layout(&layout, i, args.json)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("roomgrid: {e}");
            ExitCode::FAILURE
        }
    }
}

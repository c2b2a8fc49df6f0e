#![deny(unsafe_code)]
//! CLI binary for the particle-field simulator.
//!
//! Subcommands:
//! - `render`: run the background headless for N frames, write a PNG
//! - `params`: print the tunable parameters with defaults and ranges

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use particle_field_core::{FieldParams, Seed, Theme};
use particle_field_raster::Pixmap;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "particle-field", about = "Living particle background, rendered headless")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N frames and write a PNG of the last one.
    Render {
        /// Viewport width in device-independent pixels.
        #[arg(short = 'W', long, default_value_t = 1280.0)]
        width: f64,

        /// Viewport height in device-independent pixels.
        #[arg(short = 'H', long, default_value_t = 720.0)]
        height: f64,

        /// Number of frames to simulate before the snapshot.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// PRNG seed for the particle scatter.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Hold the pointer at X,Y for every frame.
        #[arg(long, value_name = "X,Y")]
        pointer: Option<String>,

        /// Theme (dark, light).
        #[arg(short, long, default_value = "dark")]
        theme: String,

        /// Field parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Read the whole run description from a seed JSON file instead of
        /// the viewport, seed, frame, pointer, theme and params flags.
        #[arg(long, value_name = "PATH")]
        seed_file: Option<PathBuf>,

        /// Keep the canvas transparent instead of compositing over the theme
        /// background.
        #[arg(long)]
        transparent: bool,

        /// Output file path.
        #[arg(short, long, default_value = "particles.png")]
        output: PathBuf,
    },
    /// List field parameters with their defaults and ranges.
    Params,
}

/// Parses `"X,Y"` into a pointer position.
fn parse_pointer(raw: &str) -> Result<[f64; 2], CliError> {
    let bad = || CliError::Input(format!("invalid --pointer '{raw}': expected X,Y"));
    let (x, y) = raw.split_once(',').ok_or_else(bad)?;
    let x: f64 = x.trim().parse().map_err(|_| bad())?;
    let y: f64 = y.trim().parse().map_err(|_| bad())?;
    Ok([x, y])
}

fn load_seed_file(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid seed file {}: {e}", path.display())))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let defaults = FieldParams::default().to_json();
            let schema = FieldParams::schema();
            if cli.json {
                let info = serde_json::json!({"defaults": defaults, "schema": schema});
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else if let Some(entries) = schema.as_object() {
                println!("Parameters:");
                for (name, spec) in entries {
                    println!(
                        "  {name} = {} [{}..{}]  {}",
                        spec["default"],
                        spec["min"],
                        spec["max"],
                        spec["description"].as_str().unwrap_or_default()
                    );
                }
            }
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            pointer,
            theme,
            params,
            seed_file,
            transparent,
            output,
        } => {
            let spec = match seed_file {
                Some(path) => load_seed_file(&path)?,
                None => {
                    let mut spec = Seed::new(width, height, seed);
                    spec.frames = frames;
                    spec.params = serde_json::from_str(&params)
                        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                    spec.pointer = pointer.as_deref().map(parse_pointer).transpose()?;
                    spec.theme = theme.parse::<Theme>()?;
                    spec
                }
            };

            let mut sim = spec.build()?;
            let mut pixmap = Pixmap::new(spec.width.ceil() as usize, spec.height.ceil() as usize)?;

            if spec.frames == 0 {
                sim.draw(&mut pixmap);
            } else {
                sim.run(spec.frames, &mut pixmap);
            }
            log::debug!(
                "simulated {} frames over {} particles",
                sim.frames(),
                sim.particles().len()
            );

            let background = (!transparent).then(|| spec.theme.background());
            particle_field_raster::snapshot::write_png(&pixmap, background, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": spec.width,
                    "height": spec.height,
                    "frames": spec.frames,
                    "seed": spec.seed,
                    "particles": sim.particles().len(),
                    "theme": spec.theme,
                    "params": sim.params().to_json(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} particles ({}x{}, {} frames, seed {}) -> {}",
                    sim.particles().len(),
                    spec.width,
                    spec.height,
                    spec.frames,
                    spec.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG still wins over -v when set.
    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

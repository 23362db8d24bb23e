//! Follow Controller Testbed
//!
//! Runs a scripted scenario headlessly and prints a summary of the run.
//! Use `--config <path>` to load a TOML config; flags override its values.
//! Set `RUST_LOG=debug` for per-frame output.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use testbed::{Scenario, Testbed, TestbedConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "crates/testbed/config/testbed.toml";

#[derive(Parser, Debug)]
#[command(name = "follow-testbed")]
#[command(about = "Drive the avatar follow controller through a scripted scene")]
struct Args {
    /// Testbed config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scenario to run
    #[arg(short, long, value_enum)]
    scenario: Option<Scenario>,

    /// Number of frames to simulate
    #[arg(short, long)]
    frames: Option<u64>,

    /// Fixed timestep in seconds
    #[arg(long)]
    dt: Option<f32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => TestbedConfig::from_file(&path)?,
        None => {
            let default_config = PathBuf::from(DEFAULT_CONFIG);
            if default_config.exists() {
                tracing::info!("Loading default config: {}", default_config.display());
                TestbedConfig::from_file(&default_config)?
            } else {
                TestbedConfig::default()
            }
        }
    };

    if let Some(scenario) = args.scenario {
        config.scenario = scenario;
    }
    if let Some(frames) = args.frames {
        config.frames = frames;
    }
    if let Some(dt) = args.dt {
        config.set_dt(dt)?;
    }

    let summary = Testbed::new(config).run();
    println!("{summary}");

    Ok(())
}

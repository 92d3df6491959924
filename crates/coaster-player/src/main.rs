//! Coaster Player - standalone ride binary
//!
//! Usage:
//!   coaster-player [--config <coaster.toml>] [--fullscreen]

use anyhow::{Context, Result};
use clap::Parser;
use coaster_core::RideConfig;
use coaster_track::Ride;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coaster-player")]
#[command(about = "Ride a B-spline roller coaster")]
struct Args {
    /// Path to a ride config file (defaults to ./coaster.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = RideConfig::load(args.config.as_deref()).context("Failed to load ride config")?;
    let ride = Ride::classic(config);

    println!("Track: {} control points", ride.points().len());
    println!();
    println!("{}", coaster_player::CONTROLS);

    coaster_player::run(ride, args.fullscreen)
}

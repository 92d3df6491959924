//! Coaster CLI - Command-line interface for the roller coaster ride

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, export, ride, simulate};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coaster")]
#[command(about = "B-spline roller coaster: ride it, simulate it, export it", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a window and ride the coaster
    Ride {
        /// Path to a ride config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Launch in fullscreen mode
        #[arg(long)]
        fullscreen: bool,
    },

    /// Run the animation headlessly and print per-tick telemetry
    Simulate {
        /// Number of ticks to run
        #[arg(long, default_value = "300")]
        ticks: u64,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_output_format)]
        format: String,

        /// Path to a ride config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write the scene geometry to a file
    Export {
        /// Output file path (extension follows the format when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (obj or json)
        #[arg(long, default_value = "obj")]
        format: String,

        /// Ticks to advance before exporting
        #[arg(long, default_value = "0")]
        ticks: u64,

        /// Path to a ride config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Sweep the track and report its health
    Check {
        /// Path to a ride config file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn parse_output_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown output format '{}'; valid values: text, json", s)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ride { config, fullscreen } => ride::run(ride::RideArgs { config, fullscreen }),
        Commands::Simulate {
            ticks,
            format,
            config,
        } => simulate::run(simulate::SimulateArgs {
            ticks,
            format,
            config,
        }),
        Commands::Export {
            output,
            format,
            ticks,
            config,
        } => export::run(export::ExportArgs {
            output,
            format,
            ticks,
            config,
        }),
        Commands::Check { config } => check::run(config.as_deref()),
    }
}

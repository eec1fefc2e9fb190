use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

mod config;
mod export;
mod label;
mod map;
mod ping;
mod summary;
mod track;

#[derive(Debug, Parser)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the travel map as a static HTML file
    Render,
    /// Write day tracks and pings as GeoJSON
    Export,
    /// Print a per-day stay report
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = match cli.config.as_deref() {
        Some(x) => x,
        None => Path::new("config.toml"),
    };
    let config = config::load(path)?;

    match cli.command {
        Command::Render => map::run(&config)?,
        Command::Export => export::run(&config)?,
        Command::Summary => summary::run(&config)?,
    };

    Ok(())
}

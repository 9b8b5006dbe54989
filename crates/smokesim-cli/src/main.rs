//! smokesim CLI - overlay procedural smoke onto images

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{mask, run};

#[derive(Parser)]
#[command(name = "smokesim")]
#[command(about = "Procedural particle smoke simulator and image augmenter", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate smoke over a background image and write the result
    Run(run::RunArgs),

    /// Generate a standalone cloud opacity mask
    Mask(mask::MaskArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Mask(args) => mask::execute(args),
    }
}

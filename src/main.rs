//! Shabda CLI - Audio Segmentation & Export
//!
//! Command-line interface for the Shabda segmentation engine.

use clap::Parser;
use env_logger::Env;
use log::info;

use shabda::cli::{commands, Cli, Commands};
use shabda::Result;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    info!("Shabda v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Shabda v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::DecodeInfo { audio } => commands::decode_info(&audio),
        Commands::Info { project } => commands::info(&project),
        Commands::NewSnapshot {
            audio,
            dialect,
            output,
        } => commands::new_snapshot(&audio, &dialect, output.as_deref()),
        Commands::Export {
            audio,
            project,
            out_dir,
        } => commands::export(&audio, &project, &out_dir),
    }
}

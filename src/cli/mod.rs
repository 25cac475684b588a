//! CLI Module
//!
//! Command-line interface for the Shabda segmentation engine. All
//! boundary I/O is local files: a decoded WAV in, per-actor bundles and
//! snapshots out.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shabda - actor-attributed audio segmentation and export
#[derive(Parser, Debug)]
#[command(name = "shabda")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a WAV file and print its properties
    #[command(name = "decode-info")]
    DecodeInfo {
        /// Path to the WAV file
        audio: PathBuf,
    },

    /// Print a summary of a project snapshot
    #[command(name = "info")]
    Info {
        /// Path to the snapshot JSON
        project: PathBuf,
    },

    /// Create an empty snapshot for a freshly decoded recording
    #[command(name = "new-snapshot")]
    NewSnapshot {
        /// Path to the WAV file the project annotates
        audio: PathBuf,

        /// Regional dialect tag for exports
        #[arg(short, long)]
        dialect: String,

        /// Output path (defaults to a timestamped name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export per-actor WAV, metadata and subtitle bundles
    #[command(name = "export")]
    Export {
        /// Path to the WAV file
        audio: PathBuf,

        /// Path to the snapshot JSON
        project: PathBuf,

        /// Directory the bundles are written into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

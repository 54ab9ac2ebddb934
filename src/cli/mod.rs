//! CLI module for clipbatch
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// clipbatch - cut many named clips out of one video
///
/// Downloads a remote video with yt-dlp (or uses a local file) and extracts
/// every requested time range with ffmpeg stream copy.
#[derive(Parser, Debug)]
#[command(name = "clipbatch")]
#[command(about = "Cut a batch of named clips out of one video")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: clipbatch/config.toml in the user config directory)
    #[arg(long, global = true, value_name = "FILE", env = "CLIPBATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error, off)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Acquire a source video and cut every clip out of it
    Run(args::RunArgs),
    /// Print the duration of a source video
    Probe(args::ProbeArgs),
    /// Check that yt-dlp, ffmpeg and ffprobe can be run
    Check(args::CheckArgs),
}

//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::delete::DeleteArgs;

/// Padel score tracker.
///
/// Keeps score of a match point by point and rolls finished matches into
/// lifetime statistics.
#[derive(Debug, Parser)]
#[command(name = "padel", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play a match, reading points from stdin.
    Play,

    /// List completed matches, most recent first.
    History {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show lifetime statistics.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Delete a match from the history by its index.
    Delete(DeleteArgs),

    /// Authorize workout sync with the configured fitness service.
    Authorize,
}

//! Command-line argument definitions for the Flowline CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the scene file, the configuration file,
//! containers to toggle before the layout pass, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Flowline inspection tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file (TOML)
    #[arg(help = "Path to the scene file")]
    pub input: String,

    /// Path to write the report to instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Containers to collapse or expand before routing, in order
    #[arg(long = "toggle", value_name = "SHAPE")]
    pub toggle: Vec<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

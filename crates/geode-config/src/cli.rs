//! Command-line argument parsing for the `geode` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::Config;

/// `geode` command-line arguments.
///
/// Global options override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "geode", about = "Inspect icosphere chunk identifiers")]
pub struct CliArgs {
    /// Log level (error, warn, info, debug, trace) or a full filter string.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Decimal places for printed coordinates.
    #[arg(long, global = true)]
    pub precision: Option<usize>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Tool subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Decode a raw identifier (decimal or 0x-prefixed hex).
    Decode {
        /// Raw packed value.
        raw: String,
    },
    /// Build an identifier from `sector[/q.q.q...]`.
    Path {
        /// Sector followed by the quadrant path, e.g. `3/0.2.1`.
        path: String,
    },
    /// List the four children of a raw identifier.
    Children {
        /// Raw packed value.
        raw: String,
    },
    /// Find the chunk containing a direction.
    #[command(allow_negative_numbers = true)]
    Locate {
        /// X component.
        x: f64,
        /// Y component.
        y: f64,
        /// Z component.
        z: f64,
        /// Subdivision depth (defaults to `chunks.default_locate_depth`).
        #[arg(long)]
        depth: Option<u8>,
    },
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(precision) = args.precision {
            self.chunks.print_precision = precision;
        }
    }
}

//! Configuration for the geode chunk tools.
//!
//! Settings persist to disk as RON, missing fields fall back to defaults, and
//! command-line arguments parsed with clap override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, Command};
pub use config::{ChunkConfig, Config, DebugConfig, default_config_dir};
pub use error::ConfigError;

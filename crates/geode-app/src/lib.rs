//! The `geode` inspection tool: decode, build, split and locate chunk identifiers.

mod parse;

use geode_config::{Command, Config, ConfigError};
use geode_icosphere::{ChunkId, ChunkIdError};
use glam::DVec3;

pub use parse::{parse_path, parse_raw};

/// Errors surfaced by the tool.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Loading or saving the configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A chunk operation rejected its input.
    #[error(transparent)]
    Chunk(#[from] ChunkIdError),

    /// The raw identifier is not a decimal or hex `u64`.
    #[error("not a raw chunk id: {0:?}")]
    InvalidRaw(String),

    /// The path is not of the form `sector[/q.q...]`.
    #[error("not a chunk path: {0:?}")]
    InvalidPath(String),
}

/// Execute one subcommand and return the text to print.
pub fn run(command: &Command, config: &Config) -> Result<String, AppError> {
    let precision = config.chunks.print_precision;
    match command {
        Command::Decode { raw } => describe(parse_raw(raw)?, precision),
        Command::Path { path } => describe(parse_path(path)?, precision),
        Command::Children { raw } => {
            let id = parse_raw(raw)?;
            Ok(id
                .children()?
                .into_iter()
                .enumerate()
                .map(|(quadrant, child)| format!("{quadrant}: {child} raw={:#018x}\n", child.raw()))
                .collect())
        }
        Command::Locate { x, y, z, depth } => {
            let depth = depth.unwrap_or(config.chunks.default_locate_depth);
            let id = ChunkId::locate(DVec3::new(*x, *y, *z), depth)?;
            tracing::debug!(%id, depth, "located direction");
            describe(id, precision)
        }
    }
}

/// Multi-line summary of a chunk: fields, raw value and resolved triangle.
pub fn describe(id: ChunkId, precision: usize) -> Result<String, AppError> {
    let tri = id.to_triangle()?;
    let mut out = format!(
        "id:     {id}\nraw:    {raw} ({raw:#018x})\nsector: {}\ndepth:  {}\n",
        id.sector(),
        id.depth(),
        raw = id.raw(),
    );
    for (name, v) in ["a", "b", "c"].into_iter().zip(tri.vertices()) {
        out.push_str(&format!(
            "{name}:      [{:.p$}, {:.p$}, {:.p$}]\n",
            v.x,
            v.y,
            v.z,
            p = precision
        ));
    }
    Ok(out)
}

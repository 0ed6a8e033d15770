//! Parsing of chunk identifiers as typed on the command line.

use geode_icosphere::ChunkId;

use crate::AppError;

/// Parse a raw identifier given in decimal or `0x`-prefixed hex, validating its fields.
pub fn parse_raw(input: &str) -> Result<ChunkId, AppError> {
    let trimmed = input.trim();
    let value = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => trimmed.replace('_', "").parse::<u64>(),
    }
    .map_err(|_| AppError::InvalidRaw(input.to_string()))?;

    Ok(ChunkId::from_raw_checked(value)?)
}

/// Parse the display form `sector[/q.q...]` back into an identifier.
pub fn parse_path(input: &str) -> Result<ChunkId, AppError> {
    let invalid = || AppError::InvalidPath(input.to_string());
    let trimmed = input.trim();

    let (sector, path) = match trimmed.split_once('/') {
        Some((sector, path)) => (sector, Some(path)),
        None => (trimmed, None),
    };
    let sector: u8 = sector.parse().map_err(|_| invalid())?;
    let quadrants = match path {
        Some(path) => path
            .split('.')
            .map(|q| q.parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(ChunkId::from_path(sector, &quadrants)?)
}

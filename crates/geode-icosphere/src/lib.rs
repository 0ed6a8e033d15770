//! Icosphere chunk addressing: the 20 root sectors, bit-packed chunk identifiers,
//! and geodesic resolution of an identifier to its spherical triangle.

mod chunk_id;
mod error;
mod locate;
mod planet;
mod sector;
mod triangle;

pub use chunk_id::ChunkId;
pub use error::ChunkIdError;
pub use planet::Planet;
pub use sector::{SECTOR_COUNT, sector, sectors};
pub use triangle::{Quadrant, SphericalTriangle};

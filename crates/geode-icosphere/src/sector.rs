//! The 20 root sectors of the icosahedron.

use glam::DVec3;

use crate::{ChunkIdError, SphericalTriangle};

/// Number of root sectors (faces of the icosahedron).
pub const SECTOR_COUNT: u8 = 20;

// Unit-length components of the golden-ratio icosahedron vertices
// `(±1, ±φ, 0)` and cyclic permutations.
const S: f64 = 0.525_731_112_119_133_6;
const L: f64 = 0.850_650_808_352_039_9;

const VERTICES: [DVec3; 12] = [
    DVec3::new(-S, L, 0.0),
    DVec3::new(S, L, 0.0),
    DVec3::new(-S, -L, 0.0),
    DVec3::new(S, -L, 0.0),
    DVec3::new(0.0, -S, L),
    DVec3::new(0.0, S, L),
    DVec3::new(0.0, -S, -L),
    DVec3::new(0.0, S, -L),
    DVec3::new(L, 0.0, -S),
    DVec3::new(L, 0.0, S),
    DVec3::new(-L, 0.0, -S),
    DVec3::new(-L, 0.0, S),
];

// Counter-clockwise seen from outside. Order is part of the persisted
// encoding: sector `i` is face `i` here.
const FACES: [[usize; 3]; SECTOR_COUNT as usize] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

const fn build_sectors() -> [SphericalTriangle; SECTOR_COUNT as usize] {
    let mut out = [SphericalTriangle::new(DVec3::ZERO, DVec3::ZERO, DVec3::ZERO);
        SECTOR_COUNT as usize];
    let mut i = 0;
    while i < FACES.len() {
        let [a, b, c] = FACES[i];
        out[i] = SphericalTriangle::new(VERTICES[a], VERTICES[b], VERTICES[c]);
        i += 1;
    }
    out
}

static SECTORS: [SphericalTriangle; SECTOR_COUNT as usize] = build_sectors();

/// All root sector triangles, indexed by sector.
#[must_use]
pub fn sectors() -> &'static [SphericalTriangle; SECTOR_COUNT as usize] {
    &SECTORS
}

/// Look up the root triangle of a sector.
///
/// # Errors
///
/// Returns [`ChunkIdError::InvalidSector`] if `index >= SECTOR_COUNT`.
pub fn sector(index: u8) -> Result<SphericalTriangle, ChunkIdError> {
    SECTORS
        .get(index as usize)
        .copied()
        .ok_or(ChunkIdError::InvalidSector { sector: index })
}

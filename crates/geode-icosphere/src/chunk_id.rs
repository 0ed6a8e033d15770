//! Bit-packed chunk identifier.
//!
//! ## Layout
//!
//! | Bits | Field |
//! |------|-------|
//! | 0..5 | sector (`< 20`) |
//! | 5..10 | depth (`<= 27`) |
//! | 10 + 2i .. 12 + 2i | quadrant at level `i`, for `i < depth` |
//!
//! Level 0 is the outermost subdivision and sits in the lowest quadrant slot.
//! Every bit at or above `10 + 2 * depth` is reserved and always zero.
//! The persisted form is the raw `u64`, little-endian when written as bytes.

use serde::{Deserialize, Serialize};

use crate::sector::{SECTOR_COUNT, sector};
use crate::{ChunkIdError, Quadrant, SphericalTriangle};

const SECTOR_WIDTH: u32 = 5;
const SECTOR_MASK: u64 = (1 << SECTOR_WIDTH) - 1;

const DEPTH_SHIFT: u32 = SECTOR_WIDTH;
const DEPTH_WIDTH: u32 = 5;
const DEPTH_MASK: u64 = (1 << DEPTH_WIDTH) - 1;

const PATH_SHIFT: u32 = DEPTH_SHIFT + DEPTH_WIDTH;
const QUADRANT_WIDTH: u32 = 2;
const QUADRANT_MASK: u64 = (1 << QUADRANT_WIDTH) - 1;

/// Address of a chunk on the icosphere: a root sector plus the quadrant
/// chosen at each subdivision level.
///
/// A plain value: copy, hash, compare and persist it freely. Ordering is the
/// ordering of the raw integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ChunkId(u64);

static_assertions::assert_eq_size!(ChunkId, u64);
static_assertions::assert_impl_all!(ChunkId: Send, Sync, Copy);
static_assertions::const_assert!((ChunkId::MAX_DEPTH as u64) <= DEPTH_MASK);

impl ChunkId {
    /// Deepest subdivision level the 64-bit encoding can hold.
    pub const MAX_DEPTH: u8 = ((u64::BITS - PATH_SHIFT) / QUADRANT_WIDTH) as u8;

    /// Wrap a raw value produced earlier by [`raw`](Self::raw), without validation.
    ///
    /// Use [`from_raw_checked`](Self::from_raw_checked) for values from untrusted storage.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Wrap a raw value after validating every field.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkIdError::MalformedRaw`] if the sector is out of range,
    /// the depth exceeds [`Self::MAX_DEPTH`], or any bit above the quadrant
    /// path is set.
    pub fn from_raw_checked(raw: u64) -> Result<Self, ChunkIdError> {
        let id = Self(raw);
        let depth = id.depth();
        let well_formed = id.sector() < SECTOR_COUNT
            && depth <= Self::MAX_DEPTH
            && raw.checked_shr(slot_shift(depth as usize)).unwrap_or(0) == 0;
        if well_formed {
            Ok(id)
        } else {
            tracing::debug!("rejected malformed chunk id {raw:#018x}");
            Err(ChunkIdError::MalformedRaw { raw })
        }
    }

    /// Build an identifier from a sector and the quadrant chosen at each level,
    /// outermost first.
    ///
    /// # Errors
    ///
    /// - [`ChunkIdError::InvalidSector`] if `sector >= 20`.
    /// - [`ChunkIdError::DepthOverflow`] if more than [`Self::MAX_DEPTH`] quadrants are given.
    /// - [`ChunkIdError::InvalidQuadrant`] if any quadrant is greater than 3.
    pub fn from_path(sector: u8, quadrants: &[u8]) -> Result<Self, ChunkIdError> {
        if sector >= SECTOR_COUNT {
            return Err(ChunkIdError::InvalidSector { sector });
        }
        if quadrants.len() > Self::MAX_DEPTH as usize {
            return Err(ChunkIdError::DepthOverflow {
                depth: quadrants.len(),
            });
        }

        let mut raw = u64::from(sector) | (quadrants.len() as u64) << DEPTH_SHIFT;
        for (level, &q) in quadrants.iter().enumerate() {
            let quadrant = Quadrant::try_from(q)?;
            raw |= u64::from(quadrant.bits()) << slot_shift(level);
        }
        Ok(Self(raw))
    }

    /// The depth-0 chunk covering a whole sector.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkIdError::InvalidSector`] if `sector >= 20`.
    pub fn root(sector: u8) -> Result<Self, ChunkIdError> {
        Self::from_path(sector, &[])
    }

    /// The 20 root chunks in sector order.
    pub fn roots() -> impl Iterator<Item = ChunkId> {
        (0..SECTOR_COUNT).map(|s| Self(u64::from(s)))
    }

    /// Decode the little-endian byte form written by [`to_le_bytes`](Self::to_le_bytes).
    ///
    /// # Errors
    ///
    /// Returns [`ChunkIdError::MalformedRaw`] as [`from_raw_checked`](Self::from_raw_checked) does.
    pub fn from_le_bytes(bytes: [u8; 8]) -> Result<Self, ChunkIdError> {
        Self::from_raw_checked(u64::from_le_bytes(bytes))
    }

    /// The persisted byte form.
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// The packed value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Root sector index.
    #[must_use]
    pub const fn sector(self) -> u8 {
        (self.0 & SECTOR_MASK) as u8
    }

    /// Number of subdivision steps below the root sector.
    #[must_use]
    pub const fn depth(self) -> u8 {
        ((self.0 >> DEPTH_SHIFT) & DEPTH_MASK) as u8
    }

    /// Whether this is a whole-sector chunk.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.depth() == 0
    }

    /// Whether every field is in range and no reserved bit is set.
    #[must_use]
    pub fn is_valid(self) -> bool {
        Self::from_raw_checked(self.0).is_ok()
    }

    /// Quadrant chosen at `level` (0 = first subdivision below the sector).
    ///
    /// # Errors
    ///
    /// Returns [`ChunkIdError::IndexOutOfRange`] if `level >= self.depth()`.
    pub fn quadrant_at(self, level: usize) -> Result<u8, ChunkIdError> {
        let depth = self.depth();
        if level >= depth as usize {
            return Err(ChunkIdError::IndexOutOfRange { level, depth });
        }
        Ok(self.slot(level))
    }

    /// Quadrants from level 0 down to `depth() - 1`.
    pub fn quadrants(self) -> impl Iterator<Item = u8> {
        (0..self.depth() as usize).map(move |level| self.slot(level))
    }

    /// Call `visit` once per level with that level's quadrant, outermost first.
    pub fn walk<F: FnMut(u8)>(self, mut visit: F) {
        for quadrant in self.quadrants() {
            visit(quadrant);
        }
    }

    /// The chunk one level deeper, inside the given quadrant.
    ///
    /// # Errors
    ///
    /// - [`ChunkIdError::InvalidQuadrant`] if `quadrant > 3`.
    /// - [`ChunkIdError::DepthOverflow`] if this chunk is already at [`Self::MAX_DEPTH`].
    pub fn child(self, quadrant: u8) -> Result<Self, ChunkIdError> {
        let quadrant = Quadrant::try_from(quadrant)?;
        self.check_can_descend()?;
        Ok(self.push(quadrant))
    }

    /// All four children in quadrant order.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkIdError::DepthOverflow`] if this chunk is already at [`Self::MAX_DEPTH`].
    pub fn children(self) -> Result<[Self; 4], ChunkIdError> {
        self.check_can_descend()?;
        Ok(Quadrant::ALL.map(|q| self.push(q)))
    }

    /// The chunk one level up, or `None` for a root.
    ///
    /// The ancestor path is kept; the deepest quadrant slot is cleared.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        let depth = self.depth();
        if depth == 0 {
            return None;
        }
        let level = depth as usize - 1;
        let slot = QUADRANT_MASK.checked_shl(slot_shift(level)).unwrap_or(0);
        let raw = self.0 & !slot & !(DEPTH_MASK << DEPTH_SHIFT);
        Some(Self(raw | (level as u64) << DEPTH_SHIFT))
    }

    /// Whether `other` lies strictly below this chunk in the hierarchy.
    #[must_use]
    pub fn is_ancestor_of(self, other: ChunkId) -> bool {
        let depth = self.depth();
        if self.sector() != other.sector() || depth >= other.depth() {
            return false;
        }
        let path_mask = (1u64 << (u32::from(depth) * QUADRANT_WIDTH)) - 1;
        (self.0 >> PATH_SHIFT) & path_mask == (other.0 >> PATH_SHIFT) & path_mask
    }

    /// Resolve the chunk to its triangle on the unit sphere.
    ///
    /// Starts from the sector's root triangle and applies one geodesic
    /// subdivision per level, outermost first. Equal identifiers always
    /// produce bit-identical triangles.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkIdError::MalformedRaw`] if the identifier was wrapped
    /// with [`from_raw`](Self::from_raw) from a value that is not well formed.
    pub fn to_triangle(self) -> Result<SphericalTriangle, ChunkIdError> {
        let id = Self::from_raw_checked(self.0)?;
        let root = sector(id.sector())?;
        Ok(id
            .quadrants()
            .map(Quadrant::from_bits)
            .fold(root, |tri, quadrant| tri.subdivide(quadrant)))
    }

    fn check_can_descend(self) -> Result<(), ChunkIdError> {
        let depth = self.depth();
        if depth >= Self::MAX_DEPTH {
            return Err(ChunkIdError::DepthOverflow {
                depth: depth as usize + 1,
            });
        }
        Ok(())
    }

    fn push(self, quadrant: Quadrant) -> Self {
        let level = self.depth() as usize;
        let shift = slot_shift(level);
        let mut raw = self.0 & !(DEPTH_MASK << DEPTH_SHIFT) & !(QUADRANT_MASK << shift);
        raw |= (level as u64 + 1) << DEPTH_SHIFT;
        raw |= u64::from(quadrant.bits()) << shift;
        Self(raw)
    }

    fn slot(self, level: usize) -> u8 {
        (self.0.checked_shr(slot_shift(level)).unwrap_or(0) & QUADRANT_MASK) as u8
    }
}

const fn slot_shift(level: usize) -> u32 {
    PATH_SHIFT + level as u32 * QUADRANT_WIDTH
}

impl TryFrom<u64> for ChunkId {
    type Error = ChunkIdError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::from_raw_checked(raw)
    }
}

impl From<ChunkId> for u64 {
    fn from(id: ChunkId) -> Self {
        id.raw()
    }
}

impl std::fmt::Display for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sector())?;
        for (level, quadrant) in self.quadrants().enumerate() {
            let sep = if level == 0 { '/' } else { '.' };
            write!(f, "{sep}{quadrant}")?;
        }
        Ok(())
    }
}

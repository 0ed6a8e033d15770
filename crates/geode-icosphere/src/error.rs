//! Error type shared by every chunk-addressing operation.

/// Errors raised when a caller supplies input outside the addressing contract.
///
/// None of these are recoverable inside the crate: the caller has to supply
/// corrected input. Construction either yields a fully valid value or fails
/// with one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChunkIdError {
    /// Sector index outside `0..SECTOR_COUNT`.
    #[error("invalid sector {sector} (expected < 20)")]
    InvalidSector {
        /// The rejected sector index.
        sector: u8,
    },

    /// Quadrant value outside `0..=3`.
    #[error("invalid quadrant {quadrant} (expected 0..=3)")]
    InvalidQuadrant {
        /// The rejected quadrant value.
        quadrant: u8,
    },

    /// Requested depth exceeds what the 64-bit encoding can hold.
    #[error("depth {depth} exceeds maximum of {max}", max = crate::ChunkId::MAX_DEPTH)]
    DepthOverflow {
        /// The depth that was asked for.
        depth: usize,
    },

    /// `quadrant_at` called with a level at or beyond the chunk's depth.
    #[error("level {level} out of range for chunk of depth {depth}")]
    IndexOutOfRange {
        /// The requested level.
        level: usize,
        /// Depth of the chunk that was queried.
        depth: u8,
    },

    /// A raw value whose fields are out of range or that sets reserved bits.
    #[error("malformed raw chunk id {raw:#018x}")]
    MalformedRaw {
        /// The rejected raw value.
        raw: u64,
    },

    /// A zero-length or non-finite direction cannot be located on the sphere.
    #[error("direction is zero or non-finite")]
    DegenerateDirection,

    /// Planet radius must be finite and positive.
    #[error("planet radius must be finite and positive")]
    InvalidRadius,
}

//! Spherical triangles and the single geodesic subdivision step.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::ChunkIdError;

/// One of the four sub-triangles produced by bisecting every edge.
///
/// The discriminants are the 2-bit values stored in a [`ChunkId`](crate::ChunkId)
/// path. The corner mapping is fixed and must never be reordered: changing it
/// would move every persisted chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Quadrant {
    /// Triangle spanned by the three edge midpoints.
    Center = 0,
    /// Corner that keeps vertex `a`.
    CornerA = 1,
    /// Corner that keeps vertex `b`.
    CornerB = 2,
    /// Corner that keeps vertex `c`.
    CornerC = 3,
}

impl Quadrant {
    /// All four quadrants in encoding order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Center,
        Quadrant::CornerA,
        Quadrant::CornerB,
        Quadrant::CornerC,
    ];

    /// The 2-bit value stored in a chunk path.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode the low two bits of `bits`. Higher bits are ignored.
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Quadrant::Center,
            1 => Quadrant::CornerA,
            2 => Quadrant::CornerB,
            _ => Quadrant::CornerC,
        }
    }
}

impl TryFrom<u8> for Quadrant {
    type Error = ChunkIdError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Quadrant::Center),
            1 => Ok(Quadrant::CornerA),
            2 => Ok(Quadrant::CornerB),
            3 => Ok(Quadrant::CornerC),
            quadrant => Err(ChunkIdError::InvalidQuadrant { quadrant }),
        }
    }
}

/// A triangle on the unit sphere whose edges are great-circle arcs.
///
/// Vertices are unit vectors. Every triangle produced by this crate is wound
/// counter-clockwise when viewed from outside the sphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphericalTriangle {
    /// First vertex.
    pub a: DVec3,
    /// Second vertex.
    pub b: DVec3,
    /// Third vertex.
    pub c: DVec3,
}

impl SphericalTriangle {
    /// Construct a triangle from three unit vectors. No normalization is applied.
    #[must_use]
    pub const fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self { a, b, c }
    }

    /// The vertices as `[a, b, c]`.
    #[must_use]
    pub fn vertices(&self) -> [DVec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Unit-normalized edge midpoints `[ab, bc, ac]`.
    ///
    /// Each midpoint is evaluated as `normalize((x + y) / 2)` in a fixed
    /// order, so the same pair of vertices always yields bit-identical output.
    /// Two chunks sharing an edge therefore agree exactly on its midpoint.
    #[must_use]
    pub fn edge_midpoints(&self) -> [DVec3; 3] {
        [
            midpoint(self.a, self.b),
            midpoint(self.b, self.c),
            midpoint(self.a, self.c),
        ]
    }

    /// Apply one geodesic subdivision step and keep the given quadrant.
    #[must_use]
    pub fn subdivide(&self, quadrant: Quadrant) -> Self {
        let [ab, bc, ac] = self.edge_midpoints();
        match quadrant {
            Quadrant::Center => Self::new(ab, bc, ac),
            Quadrant::CornerA => Self::new(self.a, ab, ac),
            Quadrant::CornerB => Self::new(ab, self.b, bc),
            Quadrant::CornerC => Self::new(ac, bc, self.c),
        }
    }

    /// All four sub-triangles in quadrant order.
    #[must_use]
    pub fn split(&self) -> [Self; 4] {
        Quadrant::ALL.map(|q| self.subdivide(q))
    }

    /// Centroid projected back onto the sphere.
    #[must_use]
    pub fn centroid(&self) -> DVec3 {
        ((self.a + self.b + self.c) / 3.0).normalize()
    }

    /// Largest central angle between any two vertices, in radians.
    #[must_use]
    pub fn angular_extent(&self) -> f64 {
        let angle = |p: DVec3, q: DVec3| p.dot(q).clamp(-1.0, 1.0).acos();
        angle(self.a, self.b)
            .max(angle(self.b, self.c))
            .max(angle(self.a, self.c))
    }

    /// Signed distance of `dir` to the nearest edge plane, positive inside.
    ///
    /// Each edge defines a plane through the sphere center; the margin is the
    /// smallest signed distance of the normalized `dir` to those planes. It is
    /// independent of the triangle's winding. A zero or non-finite `dir` is
    /// outside every triangle and yields `f64::NEG_INFINITY`.
    #[must_use]
    pub fn containment_margin(&self, dir: DVec3) -> f64 {
        let Some(dir) = dir.try_normalize() else {
            return f64::NEG_INFINITY;
        };
        let winding = self.a.cross(self.b).dot(self.c).signum();
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
            .into_iter()
            .map(|(p, q)| winding * dir.dot(p.cross(q).normalize_or_zero()))
            .fold(f64::INFINITY, f64::min)
    }

    /// Whether `dir` lies inside the triangle or within `epsilon` of its boundary.
    #[must_use]
    pub fn contains(&self, dir: DVec3, epsilon: f64) -> bool {
        self.containment_margin(dir) >= -epsilon
    }
}

fn midpoint(p: DVec3, q: DVec3) -> DVec3 {
    ((p + q) / 2.0).normalize()
}

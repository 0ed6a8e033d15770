//! Placement of the unit icosphere in world space.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::{ChunkId, ChunkIdError};

/// A spherical planet: chunk triangles are scaled by `radius` and offset by `center`.
///
/// Deserialization goes through [`Planet::new`], so a persisted planet with a
/// bad radius is rejected on load.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlanetRecord")]
pub struct Planet {
    center: DVec3,
    radius: f64,
}

/// Unvalidated wire form of [`Planet`].
#[derive(Deserialize)]
struct PlanetRecord {
    center: DVec3,
    radius: f64,
}

impl TryFrom<PlanetRecord> for Planet {
    type Error = ChunkIdError;

    fn try_from(record: PlanetRecord) -> Result<Self, Self::Error> {
        Self::new(record.center, record.radius)
    }
}

impl Planet {
    /// Construct a planet.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkIdError::InvalidRadius`] if `radius` is not finite and positive.
    pub fn new(center: DVec3, radius: f64) -> Result<Self, ChunkIdError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ChunkIdError::InvalidRadius);
        }
        Ok(Self { center, radius })
    }

    /// Center in world space.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Radius of the base sphere.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// World-space corners of a chunk, in triangle order `[a, b, c]`.
    ///
    /// # Errors
    ///
    /// Propagates [`ChunkId::to_triangle`] errors.
    pub fn chunk_corners(&self, id: ChunkId) -> Result<[DVec3; 3], ChunkIdError> {
        let tri = id.to_triangle()?;
        Ok(tri.vertices().map(|v| self.center + v * self.radius))
    }

    /// Great-circle length of the chunk's longest edge on the surface.
    ///
    /// # Errors
    ///
    /// Propagates [`ChunkId::to_triangle`] errors.
    pub fn chunk_span(&self, id: ChunkId) -> Result<f64, ChunkIdError> {
        Ok(id.to_triangle()?.angular_extent() * self.radius)
    }

    /// The chunk at `depth` under a world-space point.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkIdError::DegenerateDirection`] when `point` is the
    /// planet center, and [`ChunkIdError::DepthOverflow`] as
    /// [`ChunkId::locate`] does.
    pub fn chunk_at(&self, point: DVec3, depth: u8) -> Result<ChunkId, ChunkIdError> {
        ChunkId::locate(point - self.center, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_radius() {
        for radius in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                Planet::new(DVec3::ZERO, radius),
                Err(ChunkIdError::InvalidRadius)
            );
        }
    }

    #[test]
    fn test_deserialize_rejects_bad_radius() {
        for json in [
            r#"{"center":[0.0,0.0,0.0],"radius":-5.0}"#,
            r#"{"center":[0.0,0.0,0.0],"radius":0.0}"#,
        ] {
            assert!(serde_json::from_str::<Planet>(json).is_err(), "accepted {json}");
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let planet = Planet::new(DVec3::new(1.0, 2.0, 3.0), 42.5).unwrap();
        let json = serde_json::to_string(&planet).unwrap();
        assert_eq!(serde_json::from_str::<Planet>(&json).unwrap(), planet);
    }

    #[test]
    fn test_corners_lie_on_surface() {
        let center = DVec3::new(1.0e6, -2.0e5, 3.0e4);
        let planet = Planet::new(center, 6_371_000.0).unwrap();
        let id = ChunkId::from_path(12, &[0, 3, 1, 2]).unwrap();
        for corner in planet.chunk_corners(id).unwrap() {
            let r = (corner - center).length();
            assert!((r - planet.radius()).abs() < 1e-6, "corner at radius {r}");
        }
    }

    #[test]
    fn test_chunk_at_finds_chunk_under_corner_centroid() {
        let planet = Planet::new(DVec3::new(5.0, 5.0, 5.0), 100.0).unwrap();
        let id = ChunkId::from_path(4, &[1, 0, 2]).unwrap();
        let [a, b, c] = planet.chunk_corners(id).unwrap();
        let above = planet.center() + ((a + b + c) / 3.0 - planet.center()) * 2.0;
        assert_eq!(planet.chunk_at(above, 3), Ok(id));
    }

    #[test]
    fn test_chunk_at_center_is_degenerate() {
        let planet = Planet::new(DVec3::ONE, 10.0).unwrap();
        assert_eq!(
            planet.chunk_at(DVec3::ONE, 2),
            Err(ChunkIdError::DegenerateDirection)
        );
    }

    #[test]
    fn test_span_halves_per_level() {
        let planet = Planet::new(DVec3::ZERO, 1000.0).unwrap();
        let root = ChunkId::root(0).unwrap();
        let child = root.child(0).unwrap();
        let root_span = planet.chunk_span(root).unwrap();
        let child_span = planet.chunk_span(child).unwrap();
        assert!(child_span < root_span * 0.6);
        assert!(child_span > root_span * 0.4);
    }
}

//! Direction-to-chunk lookup: find the chunk at a given depth under a point on the sphere.

use glam::DVec3;

use crate::sector::sectors;
use crate::{ChunkId, ChunkIdError, SphericalTriangle};

impl ChunkId {
    /// The chunk at `depth` whose triangle contains `direction`.
    ///
    /// `direction` need not be unit length. At every step the candidate with
    /// the largest [`containment_margin`](SphericalTriangle::containment_margin)
    /// wins, ties going to the lowest index, so points on shared edges and
    /// vertices always map to exactly one chunk.
    ///
    /// # Errors
    ///
    /// - [`ChunkIdError::DegenerateDirection`] if `direction` is zero or not finite.
    /// - [`ChunkIdError::DepthOverflow`] if `depth` exceeds [`Self::MAX_DEPTH`].
    pub fn locate(direction: DVec3, depth: u8) -> Result<Self, ChunkIdError> {
        if depth > Self::MAX_DEPTH {
            return Err(ChunkIdError::DepthOverflow {
                depth: depth as usize,
            });
        }
        let dir = direction
            .try_normalize()
            .ok_or(ChunkIdError::DegenerateDirection)?;

        let sector = best_fit(sectors(), dir);
        let mut id = Self::root(sector as u8)?;
        let mut tri = sectors()[sector];
        for _ in 0..depth {
            let children = tri.split();
            let quadrant = best_fit(&children, dir);
            id = id.child(quadrant as u8)?;
            tri = children[quadrant];
        }
        Ok(id)
    }
}

/// Index of the candidate that contains `dir` with the largest margin.
fn best_fit<const N: usize>(candidates: &[SphericalTriangle; N], dir: DVec3) -> usize {
    let mut best = 0;
    let mut best_margin = f64::NEG_INFINITY;
    for (i, tri) in candidates.iter().enumerate() {
        let margin = tri.containment_margin(dir);
        if margin > best_margin {
            best = i;
            best_margin = margin;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_direction(rng: &mut ChaCha8Rng) -> DVec3 {
        let theta = rng.random::<f64>() * std::f64::consts::TAU;
        let z = 1.0 - 2.0 * rng.random::<f64>();
        let r = (1.0 - z * z).sqrt();
        DVec3::new(r * theta.cos(), r * theta.sin(), z)
    }

    #[test]
    fn test_sector_centroid_locates_its_sector() {
        for (i, tri) in sectors().iter().enumerate() {
            let id = ChunkId::locate(tri.centroid(), 0).unwrap();
            assert_eq!(id, ChunkId::root(i as u8).unwrap());
        }
    }

    #[test]
    fn test_located_chunk_contains_direction() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        for _ in 0..300 {
            let dir = random_direction(&mut rng);
            let depth = rng.random_range(0..=20u8);
            let id = ChunkId::locate(dir, depth).unwrap();
            assert_eq!(id.depth(), depth);
            let tri = id.to_triangle().unwrap();
            assert!(tri.contains(dir, 1e-9), "{id} does not contain {dir:?}");
        }
    }

    #[test]
    fn test_chunk_centroid_round_trips() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let sector = rng.random_range(0..20u8);
            let path: Vec<u8> = (0..rng.random_range(0..=15))
                .map(|_| rng.random_range(0..4u8))
                .collect();
            let id = ChunkId::from_path(sector, &path).unwrap();
            let centroid = id.to_triangle().unwrap().centroid();
            assert_eq!(ChunkId::locate(centroid, id.depth()), Ok(id));
        }
    }

    #[test]
    fn test_deeper_lookup_refines_shallower() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        for _ in 0..100 {
            let dir = random_direction(&mut rng);
            let deep = ChunkId::locate(dir, 12).unwrap();
            let shallow = ChunkId::locate(dir, 11).unwrap();
            assert_eq!(deep.parent(), Some(shallow));
        }
    }

    #[test]
    fn test_direction_need_not_be_unit() {
        let dir = DVec3::new(0.3, -0.8, 0.2);
        assert_eq!(
            ChunkId::locate(dir * 1024.0, 9),
            ChunkId::locate(dir, 9)
        );
    }

    #[test]
    fn test_shared_vertex_maps_to_one_chunk() {
        let vertex = sectors()[0].a;
        let first = ChunkId::locate(vertex, 6).unwrap();
        let second = ChunkId::locate(vertex, 6).unwrap();
        assert_eq!(first, second);
        assert!(first.to_triangle().unwrap().contains(vertex, 1e-12));
    }

    #[test]
    fn test_degenerate_direction_rejected() {
        assert_eq!(
            ChunkId::locate(DVec3::ZERO, 3),
            Err(ChunkIdError::DegenerateDirection)
        );
        assert_eq!(
            ChunkId::locate(DVec3::new(f64::NAN, 1.0, 0.0), 3),
            Err(ChunkIdError::DegenerateDirection)
        );
    }

    #[test]
    fn test_depth_beyond_encoding_rejected() {
        assert_eq!(
            ChunkId::locate(DVec3::X, 28),
            Err(ChunkIdError::DepthOverflow { depth: 28 })
        );
        assert!(ChunkId::locate(DVec3::X, ChunkId::MAX_DEPTH).is_ok());
    }
}

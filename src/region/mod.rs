//! Regions: precise spatial membership over block positions.

use crate::core::types::{BlockVector, DVec3};

/// An arbitrary, possibly non-cuboid set of block positions with known
/// inclusive bounds.
///
/// `contains` is the authoritative membership test; callers filtering by
/// region must use it rather than approximating with the bounding box.
pub trait Region {
    /// Inclusive lower corner of the bounding volume.
    fn minimum_point(&self) -> BlockVector;

    /// Inclusive upper corner of the bounding volume.
    fn maximum_point(&self) -> BlockVector;

    /// Precise membership test for a block position.
    fn contains(&self, position: BlockVector) -> bool;
}

/// Inclusive axis-aligned box of block positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CuboidRegion {
    minimum: BlockVector,
    maximum: BlockVector,
}

impl CuboidRegion {
    /// Create from any two opposite corners.
    pub fn new(first: BlockVector, second: BlockVector) -> Self {
        Self {
            minimum: first.min(second),
            maximum: first.max(second),
        }
    }
}

impl Region for CuboidRegion {
    fn minimum_point(&self) -> BlockVector {
        self.minimum
    }

    fn maximum_point(&self) -> BlockVector {
        self.maximum
    }

    fn contains(&self, position: BlockVector) -> bool {
        position.x >= self.minimum.x && position.x <= self.maximum.x
            && position.y >= self.minimum.y && position.y <= self.maximum.y
            && position.z >= self.minimum.z && position.z <= self.maximum.z
    }
}

/// Ellipsoid of block positions around a center (non-cuboid).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EllipsoidRegion {
    center: BlockVector,
    radii: DVec3,
}

impl EllipsoidRegion {
    pub fn new(center: BlockVector, radii: DVec3) -> Self {
        Self { center, radii }
    }

    /// Sphere special case.
    pub fn sphere(center: BlockVector, radius: f64) -> Self {
        Self::new(center, DVec3::splat(radius))
    }
}

impl Region for EllipsoidRegion {
    fn minimum_point(&self) -> BlockVector {
        self.center
            - BlockVector::new(
                self.radii.x.ceil() as i32,
                self.radii.y.ceil() as i32,
                self.radii.z.ceil() as i32,
            )
    }

    fn maximum_point(&self) -> BlockVector {
        self.center
            + BlockVector::new(
                self.radii.x.ceil() as i32,
                self.radii.y.ceil() as i32,
                self.radii.z.ceil() as i32,
            )
    }

    fn contains(&self, position: BlockVector) -> bool {
        // A zero radius must not divide to NaN; a degenerate ellipsoid
        // still contains exactly its center along that axis
        let radii = self.radii.max(DVec3::splat(f64::EPSILON));
        let offset = (position - self.center).as_dvec3() / radii;
        offset.length_squared() <= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_normalizes_corners() {
        let region = CuboidRegion::new(BlockVector::new(4, 0, -2), BlockVector::new(-1, 3, 5));
        assert_eq!(region.minimum_point(), BlockVector::new(-1, 0, -2));
        assert_eq!(region.maximum_point(), BlockVector::new(4, 3, 5));
    }

    #[test]
    fn test_cuboid_contains_is_inclusive() {
        let region = CuboidRegion::new(BlockVector::ZERO, BlockVector::new(2, 2, 2));
        assert!(region.contains(BlockVector::ZERO));
        assert!(region.contains(BlockVector::new(2, 2, 2)));
        assert!(!region.contains(BlockVector::new(3, 0, 0)));
    }

    #[test]
    fn test_ellipsoid_is_not_its_bounding_box() {
        let region = EllipsoidRegion::sphere(BlockVector::ZERO, 3.0);
        // Inside the bounding box but outside the sphere
        let corner = BlockVector::new(3, 3, 3);
        assert!(corner.x <= region.maximum_point().x);
        assert!(!region.contains(corner));
        assert!(region.contains(BlockVector::new(3, 0, 0)));
        assert!(region.contains(BlockVector::new(1, 1, 1)));
    }

    #[test]
    fn test_degenerate_sphere_contains_only_its_center() {
        let center = BlockVector::new(2, 3, 4);
        let region = EllipsoidRegion::sphere(center, 0.0);
        assert!(region.contains(center));
        assert!(!region.contains(center + BlockVector::new(1, 0, 0)));
        assert!(!region.contains(center - BlockVector::new(0, 1, 0)));
    }
}

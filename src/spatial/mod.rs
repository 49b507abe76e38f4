pub mod math;
mod tests;

use crate::spatial::math::{offset_region, vector::V3c};

/// Axis aligned cube inside the voxel grid, described by its lowest corner
/// and edge length. Sizes are powers of two throughout the crate.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub(crate) struct Cube {
    pub(crate) min_position: V3c<i64>,
    pub(crate) size: i64,
}

impl Cube {
    pub(crate) fn root_bounds(size: i64) -> Self {
        Self {
            min_position: V3c::unit(0),
            size,
        }
    }

    /// Bounding cube of the given child octant
    pub(crate) fn child_bounds_for(&self, octant: usize) -> Cube {
        let child_size = self.size / 2;
        Cube {
            min_position: self.min_position + (offset_region(octant) * child_size),
            size: child_size,
        }
    }

    /// Center of the cube; exact because sizes are even above the unit level
    pub(crate) fn midpoint(&self) -> V3c<i64> {
        self.min_position + V3c::unit(self.size / 2)
    }

    /// True if the given point is inside the cube, lower bound inclusive
    pub(crate) fn contains_point(&self, point: &V3c<i64>) -> bool {
        point.x >= self.min_position.x
            && point.x < self.min_position.x + self.size
            && point.y >= self.min_position.y
            && point.y < self.min_position.y + self.size
            && point.z >= self.min_position.z
            && point.z < self.min_position.z + self.size
    }
}

use crate::render::{Camera, Frustum};
use crate::spatial::math::{offset_region, vector::V3c};

/// Fixed-point scale applied when quantizing projected bounds, so small
/// scenes keep enough precision through repeated integer halving
pub(crate) const BOUND_SCALE: f64 = (1u64 << 16) as f64;

/// Projected position of one scene corner against the view pyramid.
///
/// For a camera-space point (cx, cy, cz) the components are
///   x_low  = near*cx - right*cz      x_high = near*cx - left*cz
///   y_low  = near*cy - top*cz        y_high = near*cy - bottom*cz
/// so the point is inside the pyramid iff `x_low <= 0 <= x_high` and
/// `y_low <= 0 <= y_high`, each component tests exactly one side plane by
/// sign, and `x_high - x_low == y_high - y_low == opening * cz` as long as
/// the pyramid opens equally on both axes. The components are linear in the
/// point, which is what lets traversals derive child bounds by averaging
/// instead of re-projecting.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CornerBound {
    pub(crate) x_low: i64,
    pub(crate) x_high: i64,
    pub(crate) y_low: i64,
    pub(crate) y_high: i64,
}

impl CornerBound {
    /// Projected size measure; positive exactly when the point lies in
    /// front of the camera
    pub(crate) fn footprint(&self) -> i64 {
        self.x_high - self.x_low
    }

    /// Bound of the point halfway between two bounded points
    pub(crate) fn midpoint(a: &Self, b: &Self) -> Self {
        Self {
            x_low: (a.x_low + b.x_low) >> 1,
            x_high: (a.x_high + b.x_high) >> 1,
            y_low: (a.y_low + b.y_low) >> 1,
            y_high: (a.y_high + b.y_high) >> 1,
        }
    }
}

/// Re-windows corner bounds to one screen quadrant: the half kept per axis
/// retains its outer plane, the split plane becomes the averaged component.
/// The components are left unnormalized (scaled by two per level) so the
/// footprint measure survives integer arithmetic down to leaf depth.
pub(crate) fn quadrant_bounds(bounds: &[CornerBound; 8], quadrant: usize) -> [CornerBound; 8] {
    debug_assert!(quadrant < 4);
    bounds.map(|b| {
        let (x_low, x_high) = if quadrant & 1 == 0 {
            (b.x_low + b.x_high, b.x_high * 2)
        } else {
            (b.x_low * 2, b.x_low + b.x_high)
        };
        let (y_low, y_high) = if quadrant & 2 == 0 {
            (b.y_low + b.y_high, b.y_high * 2)
        } else {
            (b.y_low * 2, b.y_low + b.y_high)
        };
        CornerBound {
            x_low,
            x_high,
            y_low,
            y_high,
        }
    })
}

/// True if every corner lies beyond the same side plane, i.e. the convex
/// hull of the bounded points cannot intersect the view pyramid
pub(crate) fn outside_frustum(bounds: &[CornerBound; 8]) -> bool {
    bounds.iter().all(|b| b.x_high < 0)
        || bounds.iter().all(|b| 0 < b.x_low)
        || bounds.iter().all(|b| b.y_high < 0)
        || bounds.iter().all(|b| 0 < b.y_low)
}

pub(crate) struct ProjectedCorners {
    pub(crate) corners: [CornerBound; 8],
    /// Index of the corner farthest along the view axis; traversals visit
    /// children front-to-back relative to it
    pub(crate) far_corner: usize,
}

/// Bound vector of a single world-space point
pub(crate) fn project_point(camera: &Camera, frustum: &Frustum, world: V3c<f64>) -> CornerBound {
    let relative = nalgebra::Vector3::new(
        world.x - camera.position.x as f64,
        world.y - camera.position.y as f64,
        world.z - camera.position.z as f64,
    );
    let c = camera.orientation * relative;
    CornerBound {
        x_low: ((frustum.near * c.x - frustum.right * c.z) * BOUND_SCALE).round() as i64,
        x_high: ((frustum.near * c.x - frustum.left * c.z) * BOUND_SCALE).round() as i64,
        y_low: ((frustum.near * c.y - frustum.top * c.z) * BOUND_SCALE).round() as i64,
        y_high: ((frustum.near * c.y - frustum.bottom * c.z) * BOUND_SCALE).round() as i64,
    }
}

/// Converts the eight corners of the scene cube spanning `[0, size]³` into
/// bound vectors, and identifies the farthest corner
pub(crate) fn project_corners(camera: &Camera, frustum: &Frustum, size: i64) -> ProjectedCorners {
    let mut corners = [CornerBound::default(); 8];
    let mut far_corner = 0;
    let mut far_depth = f64::NEG_INFINITY;
    for octant in 0..8 {
        let world = offset_region(octant) * size;
        corners[octant] = project_point(camera, frustum, V3c::from(world));
        let relative = nalgebra::Vector3::new(
            (world.x - camera.position.x) as f64,
            (world.y - camera.position.y) as f64,
            (world.z - camera.position.z) as f64,
        );
        let depth = (camera.orientation * relative).z;
        if depth > far_depth {
            far_depth = depth;
            far_corner = octant;
        }
    }
    ProjectedCorners {
        corners,
        far_corner,
    }
}

mod tests;
pub mod vector;

use crate::spatial::math::vector::V3c;

///####################################################################################
/// Octant
///####################################################################################

/// Child index bit assignment used throughout the crate: bit 2 (value 4)
/// selects the upper x half, bit 1 (value 2) the upper y half and bit 0
/// (value 1) the upper z half. The cubemap face tables are written in this
/// encoding, so it must not change independently of them.
pub const OCTANT_X: usize = 4;
pub const OCTANT_Y: usize = 2;
pub const OCTANT_Z: usize = 1;

/// Relative offset of the given octant inside its parent, one unit per axis
pub(crate) fn offset_region(octant: usize) -> V3c<i64> {
    debug_assert!(octant < 8);
    V3c::new(
        ((octant & OCTANT_X) != 0) as i64,
        ((octant & OCTANT_Y) != 0) as i64,
        ((octant & OCTANT_Z) != 0) as i64,
    )
}

/// Offset of the given octant's center from its parent's center,
/// in units of a quarter of the parent size: each component is -1 or +1
pub(crate) fn offset_direction(octant: usize) -> V3c<i64> {
    let region = offset_region(octant);
    V3c::new(
        region.x * 2 - 1,
        region.y * 2 - 1,
        region.z * 2 - 1,
    )
}

/// The octant whose center lies in the direction given by the signs,
/// i.e. the child nearest to a viewer positioned that way relative
/// to the parent center. A zero component counts as the lower half.
pub(crate) fn octant_for_signs(toward: &V3c<i64>) -> usize {
    ((toward.x > 0) as usize) * OCTANT_X
        + ((toward.y > 0) as usize) * OCTANT_Y
        + ((toward.z > 0) as usize) * OCTANT_Z
}

/// Child visiting order starting at the octant nearest to the viewer and
/// ending at the diagonally opposite one. XOR-ing the nearest octant with
/// the ascending child indices flips one splitting plane at a time, so
/// every prefix of the order is closer to the viewer than its suffix.
pub(crate) fn nearest_first_order(toward: &V3c<i64>) -> [usize; 8] {
    let base = octant_for_signs(toward);
    let mut order = [0usize; 8];
    for (i, slot) in order.iter_mut().enumerate() {
        *slot = base ^ i;
    }
    order
}

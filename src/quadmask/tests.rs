#[cfg(test)]
mod quadmask_tests {
    use crate::quadmask::{QuadMask, BACKGROUND_BYTE};
    use crate::spatial::math::vector::V3c;

    /// Normals of a pyramid wider than the whole face: everything is inside
    fn wide_open() -> [V3c<f64>; 4] {
        [
            V3c::new(1., 0., 2.),
            V3c::new(-1., 0., 2.),
            V3c::new(0., 1., 2.),
            V3c::new(0., -1., 2.),
        ]
    }

    /// Normals rejecting every direction with a non-negative z component
    fn fully_closed() -> [V3c<f64>; 4] {
        [
            V3c::new(0., 0., -1.),
            V3c::new(0., 0., -1.),
            V3c::new(0., 0., -1.),
            V3c::new(0., 0., -1.),
        ]
    }

    #[test]
    fn test_build_opens_visible_face() {
        let mut mask = QuadMask::new(4);
        mask.build(&wide_open());
        assert!(mask.root_open());
        for cell in 0..4 {
            assert!(mask.is_open(cell));
        }
    }

    #[test]
    fn test_build_closes_invisible_face() {
        let mut mask = QuadMask::new(4);
        mask.build(&fully_closed());
        assert!(!mask.root_open());
    }

    #[test]
    fn test_build_half_plane_closes_half_face() {
        let mut mask = QuadMask::new(3);
        // keep only directions leaning clearly toward +x;
        // the low-x top cells must close entirely
        let normals = [
            V3c::new(1., 0., -0.5),
            V3c::new(1., 0., 2.),
            V3c::new(0., 1., 2.),
            V3c::new(0., -1., 2.),
        ];
        mask.build(&normals);
        assert!(mask.root_open());
        assert!(!mask.is_open(0));
        assert!(mask.is_open(1));
        assert!(!mask.is_open(2));
        assert!(mask.is_open(3));
    }

    #[test]
    fn test_rebuild_resets_painted_cells() {
        let mut mask = QuadMask::new(2);
        mask.build(&wide_open());

        // drill to a leaf and paint it shut
        let mut cell = 0;
        while mask.is_interior(cell) {
            cell = mask.child(cell, 0);
        }
        mask.paint(cell, 0x123456);
        assert!(!mask.is_open(cell));

        mask.build(&wide_open());
        assert!(mask.is_open(cell));
    }

    #[test]
    fn test_paint_writes_pixel_and_closes() {
        let mut mask = QuadMask::new(2);
        mask.build(&wide_open());
        mask.clear_pixels();

        // quadrant path 3 -> 3 is the highest pixel on both axes
        let leaf = mask.child(3, 3);
        assert!(!mask.is_interior(leaf));
        mask.paint(leaf, 0x0A0B0C);

        assert!(!mask.is_open(leaf));
        assert_eq!(mask.pixel(3, 3), [0x0A, 0x0B, 0x0C, 0xFF]);
        assert_eq!(
            mask.pixel(0, 0),
            [BACKGROUND_BYTE, BACKGROUND_BYTE, BACKGROUND_BYTE, BACKGROUND_BYTE]
        );
    }

    #[test]
    fn test_aggregate_closes_exactly_when_all_children_closed() {
        let mut mask = QuadMask::new(2);
        mask.build(&wide_open());

        let top = 1;
        for quadrant in 0..4 {
            assert!(mask.aggregate(top));
            mask.paint(mask.child(top, quadrant), 0x101010);
        }
        assert!(!mask.aggregate(top));
        assert!(!mask.is_open(top));

        // the other top cells are untouched
        assert!(mask.root_open());
    }

    #[test]
    fn test_build_planar_respects_display_rectangle() {
        let mut mask = QuadMask::new(3); // 8x8 mask
        mask.build_planar(5, 8);

        assert!(mask.root_open());
        // top cells: 0 and 2 fully inside, 1 and 3 partially covered
        assert!(mask.is_open(0));
        assert!(mask.is_open(1));
        assert!(mask.is_open(2));
        assert!(mask.is_open(3));

        // cells entirely beyond the display width are closed:
        // top cell 1 spans x in [4, 8); its x-high children start at x=6
        let beyond = mask.child(1, 1);
        assert!(!mask.is_open(beyond));
        let inside = mask.child(1, 0);
        assert!(mask.is_open(inside));
    }

    #[test]
    fn test_leaf_pixel_mapping_covers_target() {
        let mut mask = QuadMask::new(2);
        mask.build(&wide_open());
        mask.clear_pixels();

        // painting every leaf touches every pixel exactly once
        for top in 0..4 {
            for quadrant in 0..4 {
                mask.paint(mask.child(top, quadrant), 0x123456);
            }
            assert!(!mask.aggregate(top));
        }
        assert!(!mask.root_open());
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(mask.pixel(x, y), [0x12, 0x34, 0x56, 0xFF]);
            }
        }
    }
}

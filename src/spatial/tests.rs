#[cfg(test)]
mod cube_tests {
    use crate::spatial::math::vector::V3c;
    use crate::spatial::math::{OCTANT_X, OCTANT_Y, OCTANT_Z};
    use crate::spatial::Cube;

    #[test]
    fn test_child_bounds() {
        let cube = Cube::root_bounds(16);

        let low = cube.child_bounds_for(0);
        assert_eq!(low.min_position, V3c::new(0, 0, 0));
        assert_eq!(low.size, 8);

        let upper_x = cube.child_bounds_for(OCTANT_X);
        assert_eq!(upper_x.min_position, V3c::new(8, 0, 0));

        let upper_yz = cube.child_bounds_for(OCTANT_Y + OCTANT_Z);
        assert_eq!(upper_yz.min_position, V3c::new(0, 8, 8));

        let upper = cube.child_bounds_for(7);
        assert_eq!(upper.min_position, V3c::new(8, 8, 8));
        assert_eq!(upper.size, 8);
    }

    #[test]
    fn test_contains_point() {
        let cube = Cube {
            min_position: V3c::new(4, 4, 4),
            size: 4,
        };
        assert!(cube.contains_point(&V3c::new(4, 4, 4)));
        assert!(cube.contains_point(&V3c::new(7, 7, 7)));
        assert!(!cube.contains_point(&V3c::new(8, 4, 4)));
        assert!(!cube.contains_point(&V3c::new(3, 4, 4)));
    }

    #[test]
    fn test_midpoint() {
        let cube = Cube::root_bounds(16);
        assert_eq!(cube.midpoint(), V3c::new(8, 8, 8));
    }
}

#[cfg(test)]
mod vector_tests {
    use crate::spatial::math::vector::V3c;

    #[test]
    fn test_arithmetic() {
        let a = V3c::new(1i64, 2, 3);
        let b = V3c::new(4i64, -5, 6);
        assert_eq!(a + b, V3c::new(5, -3, 9));
        assert_eq!(a - b, V3c::new(-3, 7, -3));
        assert_eq!(a * 2, V3c::new(2, 4, 6));
        assert_eq!(b.sign(), V3c::new(1, -1, 1));
        assert_eq!(a.dot(&b), 4 - 10 + 18);
    }

    #[test]
    fn test_normalized_length() {
        let v = V3c::new(3.0f64, 0.0, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-12);
        assert!((v.normalized().length() - 1.0).abs() < 1e-12);
    }
}

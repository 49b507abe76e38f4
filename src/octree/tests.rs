#[cfg(test)]
mod voxel_tree_tests {
    use crate::octree::{Albedo, OctreeError, VoxelTree, EMPTY_NODE, V3c};

    #[test]
    fn test_new_rejects_invalid_sizes() {
        assert!(matches!(VoxelTree::new(0), Err(OctreeError::InvalidSize(0))));
        assert!(matches!(VoxelTree::new(1), Err(OctreeError::InvalidSize(1))));
        assert!(matches!(VoxelTree::new(3), Err(OctreeError::InvalidSize(3))));
        assert!(matches!(VoxelTree::new(100), Err(OctreeError::InvalidSize(100))));
        assert!(VoxelTree::new(2).is_ok());
        assert!(VoxelTree::new(64).is_ok());
    }

    #[test]
    fn test_insert_get_roundtrip() {
        let mut tree = VoxelTree::new(8).ok().unwrap();
        let red = Albedo::default().with_red(255).with_alpha(255);
        let blue = Albedo::default().with_blue(255).with_alpha(255);

        tree.insert(&V3c::new(0, 0, 0), red).ok().unwrap();
        tree.insert(&V3c::new(7, 7, 7), blue).ok().unwrap();

        assert_eq!(tree.get(&V3c::new(0, 0, 0)), Some(red));
        assert_eq!(tree.get(&V3c::new(7, 7, 7)), Some(blue));
        assert_eq!(tree.get(&V3c::new(3, 3, 3)), None);
    }

    #[test]
    fn test_insert_rejects_out_of_bounds() {
        let mut tree = VoxelTree::new(4).ok().unwrap();
        let result = tree.insert(&V3c::new(4, 0, 0), Albedo::from(0xFF0000u32));
        assert!(matches!(
            result,
            Err(OctreeError::InvalidPosition { x: 4, y: 0, z: 0 })
        ));
    }

    #[test]
    fn test_parent_samples_follow_inserts() {
        let mut tree = VoxelTree::new(4).ok().unwrap();
        assert!(tree.root_color() < 0);

        let gray = Albedo::from(0x808080u32);
        tree.insert(&V3c::new(0, 0, 0), gray).ok().unwrap();
        assert_eq!(tree.root_color(), gray.pack());

        // averaging two identical colors keeps the sample unchanged
        tree.insert(&V3c::new(3, 3, 3), gray).ok().unwrap();
        assert_eq!(tree.root_color(), gray.pack());
    }

    #[test]
    fn test_sample_sign_matches_child_validity() {
        let mut tree = VoxelTree::new(8).ok().unwrap();
        tree.insert(&V3c::new(1, 2, 3), Albedo::from(0x123456u32))
            .ok()
            .unwrap();
        tree.insert(&V3c::new(6, 5, 4), Albedo::from(0x654321u32))
            .ok()
            .unwrap();

        // a negative sample never accompanies a valid child reference
        for node in tree.nodes() {
            for octant in 0..8 {
                if node.colors[octant] < 0 {
                    assert_eq!(node.children[octant], EMPTY_NODE);
                }
            }
        }
    }

    #[test]
    fn test_albedo_packing() {
        let color = Albedo::default()
            .with_red(0x12)
            .with_green(0x34)
            .with_blue(0x56)
            .with_alpha(0xFF);
        assert_eq!(color.pack(), 0x123456);
        assert_eq!(Albedo::unpack(0x123456), color);
        assert!(color.pack() >= 0);
    }
}

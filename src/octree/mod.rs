mod tests;
pub mod types;

pub use crate::octree::types::{Albedo, OctreeError, VoxelNode, EMPTY_NODE};
pub use crate::spatial::math::vector::V3c;

use crate::spatial::math::{OCTANT_X, OCTANT_Y, OCTANT_Z};
use crate::spatial::Cube;

/// Upper limit on subdivision levels; a full-depth tree spans 2^26 units
pub const MAX_TREE_LEVELS: u32 = 26;

/// Sparse voxel octree stored as a dense array of nodes, root at index 0.
/// Each node records a child reference and a signed average-color sample per
/// octant; parents keep their samples equal to the average of the referenced
/// child's samples, so a traversal may stop at any level and still have a
/// usable color.
pub struct VoxelTree {
    size: u32,
    nodes: Vec<VoxelNode>,
}

/// Octant of the child cube containing the given position
fn child_octant_for(bounds: &Cube, position: &V3c<i64>) -> usize {
    debug_assert!(bounds.contains_point(position));
    let mid = bounds.midpoint();
    ((position.x >= mid.x) as usize) * OCTANT_X
        + ((position.y >= mid.y) as usize) * OCTANT_Y
        + ((position.z >= mid.z) as usize) * OCTANT_Z
}

impl VoxelTree {
    /// creates a tree spanning the given number of voxels per side,
    /// which must be a power of two between 2 and 2^26
    pub fn new(size: u32) -> Result<Self, OctreeError> {
        if size < 2 || !size.is_power_of_two() || MAX_TREE_LEVELS < size.trailing_zeros() {
            return Err(OctreeError::InvalidSize(size));
        }
        Ok(Self {
            size,
            nodes: vec![VoxelNode::default()],
        })
    }

    /// Voxels per side
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Subdivision levels from the root down to unit voxels
    pub fn levels(&self) -> u32 {
        self.size.trailing_zeros()
    }

    pub fn nodes(&self) -> &[VoxelNode] {
        &self.nodes
    }

    /// Average of the root's renderable samples; negative for an empty scene
    pub fn root_color(&self) -> i32 {
        Self::average_sample(&self.nodes[0])
    }

    /// Inserts the given color at the intended voxel position
    pub fn insert(&mut self, position: &V3c<u32>, albedo: Albedo) -> Result<(), OctreeError> {
        if position.x >= self.size || position.y >= self.size || position.z >= self.size {
            return Err(OctreeError::InvalidPosition {
                x: position.x,
                y: position.y,
                z: position.z,
            });
        }
        let position = V3c::<i64>::from(*position);
        let sample = albedo.pack();

        // Descend to the node holding the unit voxel slots, creating the
        // path as needed. A vector does not consume significant resources
        // in this case, the depth is at most MAX_TREE_LEVELS.
        let mut node_stack = vec![(0usize, Cube::root_bounds(self.size as i64))];
        loop {
            let (current_node_key, current_bounds) = *node_stack.last().unwrap();
            let target_octant = child_octant_for(&current_bounds, &position);

            if current_bounds.size == 2 {
                let node = &mut self.nodes[current_node_key];
                node.colors[target_octant] = sample;
                debug_assert!(node.children[target_octant] == EMPTY_NODE);
                break;
            }

            let child_key = self.nodes[current_node_key].children[target_octant];
            let child_key = if child_key == EMPTY_NODE {
                let key = self.nodes.len() as u32;
                self.nodes.push(VoxelNode::default());
                self.nodes[current_node_key].children[target_octant] = key;
                key
            } else {
                child_key
            };
            node_stack.push((
                child_key as usize,
                current_bounds.child_bounds_for(target_octant),
            ));
        }

        // Refresh the average samples along the inserted path
        while let Some((node_key, bounds)) = node_stack.pop() {
            if let Some((parent_key, parent_bounds)) = node_stack.last() {
                let octant = child_octant_for(parent_bounds, &bounds.min_position);
                let average = Self::average_sample(&self.nodes[node_key]);
                self.nodes[*parent_key].colors[octant] = average;
            }
        }
        Ok(())
    }

    /// Provides the color at the given voxel position, if any
    pub fn get(&self, position: &V3c<u32>) -> Option<Albedo> {
        if position.x >= self.size || position.y >= self.size || position.z >= self.size {
            return None;
        }
        let position = V3c::<i64>::from(*position);
        let mut bounds = Cube::root_bounds(self.size as i64);
        let mut node_key = 0usize;
        loop {
            let octant = child_octant_for(&bounds, &position);
            let node = &self.nodes[node_key];
            if bounds.size == 2 {
                return (node.colors[octant] >= 0).then(|| Albedo::unpack(node.colors[octant]));
            }
            if node.children[octant] == EMPTY_NODE {
                // a solid region without subdivision also answers the query
                return (node.colors[octant] >= 0).then(|| Albedo::unpack(node.colors[octant]));
            }
            node_key = node.children[octant] as usize;
            bounds = bounds.child_bounds_for(octant);
        }
    }

    fn average_sample(node: &VoxelNode) -> i32 {
        let mut count = 0i32;
        let mut sum = V3c::<i64>::unit(0);
        for sample in node.colors.iter() {
            if *sample >= 0 {
                let color = Albedo::unpack(*sample);
                sum += V3c::new(color.r as i64, color.g as i64, color.b as i64);
                count += 1;
            }
        }
        if count == 0 {
            return -1;
        }
        Albedo::default()
            .with_red((sum.x / count as i64) as u8)
            .with_green((sum.y / count as i64) as u8)
            .with_blue((sum.z / count as i64) as u8)
            .pack()
    }
}

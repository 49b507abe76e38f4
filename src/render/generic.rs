use crate::octree::{VoxelNode, VoxelTree, EMPTY_NODE, MAX_TREE_LEVELS};
use crate::quadmask::QuadMask;
use crate::render::bounds::{
    outside_frustum, project_corners, quadrant_bounds, CornerBound, BOUND_SCALE,
};
use crate::render::{Camera, RenderConfig, RenderSetupError, RenderStats};
use crate::spatial::math::{nearest_first_order, offset_direction, vector::V3c};
use std::time::Instant;

/// Once the far corner's footprint drops to this measure the whole branch
/// sits within a fraction of a voxel of the camera plane; its stored
/// average color is used as is instead of descending further
const PAINT_THRESHOLD: i64 = BOUND_SCALE as i64 / 4;

/// Renders a voxel tree to a single planar target through the direction
/// agnostic traversal. The occlusion mask doubles as the render target; the
/// mask cells beyond the configured display rectangle start out closed,
/// which is why the mask must be at least display sized.
pub struct PlanarRenderer {
    config: RenderConfig,
    mask: QuadMask,
}

struct TraverseCtx<'a> {
    nodes: &'a [VoxelNode],
    mask: &'a mut QuadMask,
    far_corner: usize,
    size: i64,
}

impl PlanarRenderer {
    pub fn new(config: RenderConfig) -> Result<Self, RenderSetupError> {
        config.validate()?;
        if !config.frustum.is_square() {
            return Err(RenderSetupError::AsymmetricFrustum {
                horizontal: config.frustum.right - config.frustum.left,
                vertical: config.frustum.top - config.frustum.bottom,
            });
        }
        Ok(Self {
            mask: QuadMask::new(config.mask_depth),
            config,
        })
    }

    /// Pixels per side of the (square) render target
    pub fn target_size(&self) -> u32 {
        self.mask.size()
    }

    /// RGBA8 pixels of the last render, row-major, display anchored at the
    /// low corner
    pub fn pixels(&self) -> &[u8] {
        self.mask.pixels()
    }

    pub(crate) fn mask(&self) -> &QuadMask {
        &self.mask
    }

    /// Renders the tree from the given camera pose into the internal target
    pub fn render(&mut self, tree: &VoxelTree, camera: &Camera) -> RenderStats {
        let mut stats = RenderStats::default();
        let t_prepare = Instant::now();
        self.mask
            .build_planar(self.config.display_width, self.config.display_height);
        self.mask.clear_pixels();
        let projected = project_corners(camera, &self.config.frustum, tree.size() as i64);
        stats.prepare = t_prepare.elapsed();

        let t_query = Instant::now();
        let size = tree.size() as i64;
        // camera position relative to the root center, doubled once per
        // level so the octant arithmetic stays integral
        let relative = camera.position * 2 - V3c::unit(size);
        let mut ctx = TraverseCtx {
            nodes: tree.nodes(),
            mask: &mut self.mask,
            far_corner: projected.far_corner,
            size,
        };
        let root_color = tree.root_color();
        let depth = tree.levels() as i32 - 1;
        for top in 0..4usize {
            if !ctx.mask.is_open(top) {
                continue;
            }
            let bounds = quadrant_bounds(&projected.corners, top);
            traverse(&mut ctx, top, 0, root_color, &bounds, relative, depth);
        }
        stats.query = t_query.elapsed();

        tracing::debug!(
            prepare = ?stats.prepare,
            query = ?stats.query,
            "planar render"
        );
        stats
    }
}

/// Joint descent of the voxel tree and the occlusion mask below one mask
/// cell. Returns true when the cell is fully resolved, which releases every
/// pending visit of it.
fn traverse(
    ctx: &mut TraverseCtx,
    cell: usize,
    node: u32,
    color: i32,
    bounds: &[CornerBound; 8],
    relative: V3c<i64>,
    depth: i32,
) -> bool {
    debug_assert!(depth < MAX_TREE_LEVELS as i32);
    if !ctx.mask.is_open(cell) {
        return true;
    }

    if 0 <= depth && PAINT_THRESHOLD < bounds[ctx.far_corner].footprint() {
        // step the tree, nearest child first
        for octant in nearest_first_order(&relative) {
            let (child, child_color) = if node != EMPTY_NODE {
                let current = ctx.nodes[node as usize];
                if current.colors[octant] < 0 {
                    continue;
                }
                (current.children[octant], current.colors[octant])
            } else {
                // inside a solid region: subdivide virtually, the color
                // rides along until the mask resolves
                (EMPTY_NODE, color)
            };

            let mut child_bounds = [CornerBound::default(); 8];
            for (corner, slot) in child_bounds.iter_mut().enumerate() {
                *slot = CornerBound::midpoint(&bounds[octant], &bounds[corner]);
            }
            if outside_frustum(&child_bounds)
                || child_bounds[ctx.far_corner].footprint() <= 0
            {
                continue;
            }

            let child_relative = relative * 2 - offset_direction(octant) * ctx.size;
            if traverse(
                ctx,
                cell,
                child,
                child_color,
                &child_bounds,
                child_relative,
                depth - 1,
            ) {
                return true;
            }
        }
        false
    } else {
        // step the mask
        for quadrant in 0..4usize {
            let child_cell = ctx.mask.child(cell, quadrant);
            if !ctx.mask.is_open(child_cell) {
                continue;
            }
            let cell_bounds = quadrant_bounds(bounds, quadrant);
            if outside_frustum(&cell_bounds)
                || cell_bounds[ctx.far_corner].footprint() <= 0
            {
                continue;
            }
            if ctx.mask.is_interior(child_cell) {
                traverse(ctx, child_cell, node, color, &cell_bounds, relative, depth);
            } else if 0 <= color {
                ctx.mask.paint(child_cell, color);
            }
        }
        !ctx.mask.aggregate(cell)
    }
}

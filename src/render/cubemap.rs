use crate::octree::{VoxelNode, VoxelTree, EMPTY_NODE, MAX_TREE_LEVELS};
use crate::quadmask::QuadMask;
use crate::render::{Camera, RenderConfig, RenderSetupError, RenderStats, MAX_MASK_DEPTH};
use crate::spatial::math::vector::V3c;
use std::time::Instant;

/// One of the six square render targets covering all directions around the
/// camera, named by the direction the face looks toward. The order is the
/// fixed face-table order of [`CubemapRenderer::render`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PosY,
    PosZ,
    PosX,
    NegZ,
    NegX,
    NegY,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosY,
        CubeFace::PosZ,
        CubeFace::PosX,
        CubeFace::NegZ,
        CubeFace::NegX,
        CubeFace::NegY,
    ];
}

/// Receiver of completed face buffers; the display side of the renderer,
/// e.g. a cubemap texture upload
pub trait FaceTarget {
    fn upload(&mut self, face: CubeFace, size: u32, pixels: &[u8]);
}

/// Which octant bit runs along the face-local x and y axes and along the
/// view depth, plus the starting octant of the descent. One entry per face,
/// quadrant dispatch XORs the start octant per mirrored axis.
#[derive(Clone, Copy, Debug)]
struct FaceAxes {
    c: usize,
    ax: usize,
    ay: usize,
    az: usize,
}

struct FaceSetup {
    face: CubeFace,
    axes: FaceAxes,
    /// Maps a view-pyramid normal into the face's local frame
    permute: fn(V3c<f64>) -> V3c<f64>,
    /// Face-local eye position and eye-to-face distance from the centered
    /// camera position and the scene half size
    seed: fn(V3c<i64>, i64) -> (i64, i64, i64),
}

static FACE_TABLE: [FaceSetup; 6] = [
    FaceSetup {
        face: CubeFace::PosY,
        axes: FaceAxes { c: 1, ax: 4, ay: 1, az: 2 },
        permute: |v| V3c::new(v.x, -v.z, v.y),
        seed: |p, w| (p.x, -p.z, w - p.y),
    },
    FaceSetup {
        face: CubeFace::PosZ,
        axes: FaceAxes { c: 0, ax: 4, ay: 2, az: 1 },
        permute: |v| v,
        seed: |p, w| (p.x, p.y, w - p.z),
    },
    FaceSetup {
        face: CubeFace::PosX,
        axes: FaceAxes { c: 1, ax: 1, ay: 2, az: 4 },
        permute: |v| V3c::new(-v.z, v.y, v.x),
        seed: |p, w| (-p.z, p.y, w - p.x),
    },
    FaceSetup {
        face: CubeFace::NegZ,
        axes: FaceAxes { c: 5, ax: 4, ay: 2, az: 1 },
        permute: |v| V3c::new(-v.x, v.y, -v.z),
        seed: |p, w| (-p.x, p.y, w + p.z),
    },
    FaceSetup {
        face: CubeFace::NegX,
        axes: FaceAxes { c: 4, ax: 1, ay: 2, az: 4 },
        permute: |v| V3c::new(v.z, v.y, -v.x),
        seed: |p, w| (p.z, p.y, w + p.x),
    },
    FaceSetup {
        face: CubeFace::NegY,
        axes: FaceAxes { c: 2, ax: 4, ay: 1, az: 2 },
        permute: |v| V3c::new(v.x, v.z, -v.y),
        seed: |p, w| (p.x, p.z, w + p.y),
    },
];

struct FaceCtx<'a> {
    nodes: &'a [VoxelNode],
    mask: &'a mut QuadMask,
    one: i64,
}

/// Generous static bound on the joint descent: tree levels plus, per mask
/// level, the footprint doubling and shrinking runs of the void descent.
/// A traversal crossing it is running away, not rendering.
const MAX_RECURSION: u32 = MAX_TREE_LEVELS + MAX_MASK_DEPTH * (MAX_TREE_LEVELS + 2) + 16;

/// Descends the tree and the occlusion mask below one mask cell, painting
/// still-open pixels the scene reaches. Face-local coordinates: (x, y) is
/// the node's low corner and d its size, projected onto the face and
/// relative to the current mask cell spanning [-one, one]; (xp, yp, dp) is
/// the same for the parent node. DX and DY carry the quadrant's sign
/// convention, so each of the four instantiations runs branch-free on
/// signs. Returns true when the cell has been fully resolved.
fn sub_face_traverse<const DX: i64, const DY: i64>(
    ctx: &mut FaceCtx,
    axes: FaceAxes,
    cell: usize,
    index: u32,
    color: i32,
    x: i64,
    y: i64,
    d: i64,
    xp: i64,
    yp: i64,
    dp: i64,
    level: u32,
) -> bool {
    debug_assert!(level < MAX_RECURSION);
    let one = ctx.one;

    // reject nodes occluded by the cell window or behind it
    if x + d - (1 - DX) * (xp + dp) <= -one || one <= x - (1 + DX) * xp {
        return false;
    }
    if y + d - (1 - DY) * (yp + dp) <= -one || one <= y - (1 + DY) * yp {
        return false;
    }

    if d <= 2 * one {
        // step the tree
        let xn = (x - xp) * 2;
        let yn = (y - yp) * 2;
        let dn = (d - dp) * 2;
        let (x, y, d) = (x * 2, y * 2, d * 2);
        let FaceAxes { c, ax, ay, az } = axes;
        if index != EMPTY_NODE {
            let node = ctx.nodes[index as usize];
            let visit = |ctx: &mut FaceCtx, octant: usize, vx: i64, vy: i64, vd: i64| -> bool {
                0 <= node.colors[octant]
                    && sub_face_traverse::<DX, DY>(
                        ctx,
                        axes,
                        cell,
                        node.children[octant],
                        node.colors[octant],
                        vx,
                        vy,
                        vd,
                        xp,
                        yp,
                        dp,
                        level + 1,
                    )
            };
            if dn > 0 {
                if visit(ctx, c, xn + DX * one, yn + DY * one, dn) {
                    return true;
                }
                if visit(ctx, c ^ ax, xn - DX * one, yn + DY * one, dn) {
                    return true;
                }
                if visit(ctx, c ^ ay, xn + DX * one, yn - DY * one, dn) {
                    return true;
                }
                if visit(ctx, c ^ ax ^ ay, xn - DX * one, yn - DY * one, dn) {
                    return true;
                }
            }
            if visit(ctx, c ^ az, x + DX * one, y + DY * one, d) {
                return true;
            }
            if visit(ctx, c ^ ax ^ az, x - DX * one, y + DY * one, d) {
                return true;
            }
            if visit(ctx, c ^ ay ^ az, x + DX * one, y - DY * one, d) {
                return true;
            }
            if visit(ctx, c ^ ax ^ ay ^ az, x - DX * one, y - DY * one, d) {
                return true;
            }
        } else {
            let visit = |ctx: &mut FaceCtx, vx: i64, vy: i64, vd: i64| -> bool {
                sub_face_traverse::<DX, DY>(
                    ctx,
                    axes,
                    cell,
                    EMPTY_NODE,
                    color,
                    vx,
                    vy,
                    vd,
                    xp,
                    yp,
                    dp,
                    level + 1,
                )
            };
            if dn > 0 {
                // Skip the nearest cube to avoid infinite recursion.
                if visit(ctx, xn - DX * one, yn + DY * one, dn) {
                    return true;
                }
                if visit(ctx, xn + DX * one, yn - DY * one, dn) {
                    return true;
                }
                if visit(ctx, xn - DX * one, yn - DY * one, dn) {
                    return true;
                }
            }
            if visit(ctx, x + DX * one, y + DY * one, d) {
                return true;
            }
            if visit(ctx, x - DX * one, y + DY * one, d) {
                return true;
            }
            if visit(ctx, x + DX * one, y - DY * one, d) {
                return true;
            }
            if visit(ctx, x - DX * one, y - DY * one, d) {
                return true;
            }
        }
        false
    } else {
        // step the mask
        let d = d / 2;
        let dp = dp / 2;
        let xm = x + d;
        let xmp = xp + dp;
        let ym = y + d;
        let ymp = yp + dp;
        let windows = [
            (x, y, xp, yp),
            (xm, y, xmp, yp),
            (x, ym, xp, ymp),
            (xm, ym, xmp, ymp),
        ];
        for (quadrant, (cx, cy, cxp, cyp)) in windows.into_iter().enumerate() {
            let child = ctx.mask.child(cell, quadrant);
            if !ctx.mask.is_open(child) {
                continue;
            }
            if ctx.mask.is_interior(child) {
                sub_face_traverse::<DX, DY>(
                    ctx,
                    axes,
                    child,
                    index,
                    color,
                    cx,
                    cy,
                    d,
                    cxp,
                    cyp,
                    dp,
                    level + 1,
                );
            } else {
                paint_cell::<DX, DY>(ctx, child, color, cx, cy, d, cxp, cyp, dp);
            }
        }
        !ctx.mask.aggregate(cell)
    }
}

/// Leaf version of the window test: paints the pixel when the node still
/// reaches it
fn paint_cell<const DX: i64, const DY: i64>(
    ctx: &mut FaceCtx,
    cell: usize,
    color: i32,
    x: i64,
    y: i64,
    d: i64,
    xp: i64,
    yp: i64,
    dp: i64,
) {
    let one = ctx.one;
    if x + d - (1 - DX) * (xp + dp) <= -one || one <= x - (1 + DX) * xp {
        return;
    }
    if y + d - (1 - DY) * (yp + dp) <= -one || one <= y - (1 + DY) * yp {
        return;
    }
    debug_assert!(0 <= color);
    ctx.mask.paint(cell, color);
}

/// Splits the face into its four screen quadrants and hands each to the
/// sign-specialized traverser, seeded with the matching corner octant.
/// (x, y) is the eye position projected on the face, q the distance from
/// the eye to the scene side behind the face.
fn render_face(ctx: &mut FaceCtx, axes: FaceAxes, x: i64, y: i64, q: i64) {
    let one = ctx.one;
    let FaceAxes { c, ax, ay, az } = axes;
    if ctx.mask.is_open(0) {
        let seeded = FaceAxes { c: c ^ ax ^ ay, ax, ay, az };
        sub_face_traverse::<{ -1 }, { -1 }>(
            ctx, seeded, 0, 0, 0, x - q, y - q, q, -one, -one, one, 0,
        );
    }
    if ctx.mask.is_open(1) {
        let seeded = FaceAxes { c: c ^ ay, ax, ay, az };
        sub_face_traverse::<1, { -1 }>(ctx, seeded, 1, 0, 0, x, y - q, q, 0, -one, one, 0);
    }
    if ctx.mask.is_open(2) {
        let seeded = FaceAxes { c: c ^ ax, ax, ay, az };
        sub_face_traverse::<{ -1 }, 1>(ctx, seeded, 2, 0, 0, x - q, y, q, -one, 0, one, 0);
    }
    if ctx.mask.is_open(3) {
        sub_face_traverse::<1, 1>(ctx, axes, 3, 0, 0, x, y, q, 0, 0, one, 0);
    }
}

/// Renders a voxel tree to the six cubemap faces through the occlusion
/// mask, handing each finished face to the upload target
pub struct CubemapRenderer {
    config: RenderConfig,
    mask: QuadMask,
}

impl CubemapRenderer {
    pub fn new(config: RenderConfig) -> Result<Self, RenderSetupError> {
        config.validate()?;
        Ok(Self {
            mask: QuadMask::new(config.mask_depth),
            config,
        })
    }

    /// Pixels per side of each face buffer
    pub fn face_size(&self) -> u32 {
        self.mask.size()
    }

    pub(crate) fn mask(&self) -> &QuadMask {
        &self.mask
    }

    /// Renders every face whose view pyramid is visible and uploads it to
    /// the target. The camera is expected to be strictly inside the scene
    /// cube. One timing line is traced per call; the figures are
    /// observational and not part of the render contract.
    pub fn render(
        &mut self,
        tree: &VoxelTree,
        camera: &Camera,
        target: &mut impl FaceTarget,
    ) -> RenderStats {
        let t_total = Instant::now();
        let one = (tree.size() / 2) as i64;
        let centered = camera.position - V3c::unit(one);
        debug_assert!(
            centered.x.abs() < one && centered.y.abs() < one && centered.z.abs() < one,
            "camera outside the scene cube"
        );

        // The orientation matrix is orthogonal and therefore inverted by
        // transposition; these are the world-space view pyramid normals.
        let normals = camera.world_normals(&self.config.frustum);

        let mut stats = RenderStats::default();
        let mut rendered = [b'.'; 6];
        for (i, setup) in FACE_TABLE.iter().enumerate() {
            let t_prepare = Instant::now();
            let face_normals = [
                (setup.permute)(normals[0]),
                (setup.permute)(normals[1]),
                (setup.permute)(normals[2]),
                (setup.permute)(normals[3]),
            ];
            self.mask.build(&face_normals);
            stats.prepare += t_prepare.elapsed();

            if !self.mask.root_open() {
                continue;
            }

            let t_query = Instant::now();
            self.mask.clear_pixels();
            let (x, y, q) = (setup.seed)(centered, one);
            let mut ctx = FaceCtx {
                nodes: tree.nodes(),
                mask: &mut self.mask,
                one,
            };
            render_face(&mut ctx, setup.axes, x, y, q);
            stats.query += t_query.elapsed();

            let t_transfer = Instant::now();
            target.upload(setup.face, self.mask.size(), self.mask.pixels());
            stats.transfer += t_transfer.elapsed();

            stats.faces_rendered[i] = true;
            rendered[i] = b'0' + i as u8;
        }

        tracing::debug!(
            total = ?t_total.elapsed(),
            prepare = ?stats.prepare,
            query = ?stats.query,
            transfer = ?stats.transfer,
            faces = %String::from_utf8_lossy(&rendered),
            "cubemap render"
        );
        stats
    }
}

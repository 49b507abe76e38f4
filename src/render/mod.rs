pub(crate) mod bounds;
pub mod cubemap;
pub mod generic;

pub use cubemap::{CubeFace, CubemapRenderer, FaceTarget};
pub use generic::PlanarRenderer;

use crate::spatial::math::vector::V3c;
use nalgebra::Matrix3;
use std::time::Duration;

/// Deepest supported occlusion mask; 12 subdivisions is a 4096² target
pub const MAX_MASK_DEPTH: u32 = 12;

/// View pyramid of the camera: the four side planes described by where they
/// cut the z = near plane. left and bottom are negative, right and top
/// positive; the default is the symmetric unit pyramid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Frustum {
    pub near: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            near: 1.,
            left: -1.,
            right: 1.,
            bottom: -1.,
            top: 1.,
        }
    }
}

impl Frustum {
    /// Inward normals of the four side planes in camera space; a direction
    /// is inside the pyramid iff its dot product with each is non-negative
    pub(crate) fn plane_normals(&self) -> [V3c<f64>; 4] {
        [
            V3c::new(self.near, 0., -self.left),
            V3c::new(-self.near, 0., self.right),
            V3c::new(0., self.near, -self.bottom),
            V3c::new(0., -self.near, self.top),
        ]
    }

    /// The projected-bound arithmetic relies on equal horizontal and
    /// vertical opening; see [`bounds`]
    pub(crate) fn is_square(&self) -> bool {
        ((self.right - self.left) - (self.top - self.bottom)).abs() < 1e-9
    }
}

/// Camera pose: position in voxel coordinates of the rendered tree and the
/// world-to-camera rotation. The orientation is assumed orthogonal, so its
/// inverse is its transpose.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: V3c<i64>,
    pub orientation: Matrix3<f64>,
}

impl Camera {
    pub fn new(position: V3c<i64>, orientation: Matrix3<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Axis aligned camera at the given position
    pub fn axis_aligned(position: V3c<i64>) -> Self {
        Self {
            position,
            orientation: Matrix3::identity(),
        }
    }

    /// The view pyramid side-plane normals rotated into world space
    pub(crate) fn world_normals(&self, frustum: &Frustum) -> [V3c<f64>; 4] {
        let inverse_orientation = self.orientation.transpose();
        frustum
            .plane_normals()
            .map(|normal| V3c::from(inverse_orientation * nalgebra::Vector3::from(normal)))
    }
}

/// error types for renderer construction
#[derive(Debug, Clone, PartialEq)]
pub enum RenderSetupError {
    /// The mask must subdivide at least twice and at most MAX_MASK_DEPTH times
    InvalidMaskDepth(u32),
    /// The mask must cover the display on both axes
    MaskBelowDisplay {
        mask_size: u32,
        display_width: u32,
        display_height: u32,
    },
    /// The planar path requires a square view pyramid
    AsymmetricFrustum { horizontal: f64, vertical: f64 },
}

/// Configuration shared by both render paths, validated once at startup
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Subdivision levels of the occlusion mask; render targets are squares
    /// of `1 << mask_depth` pixels per side
    pub mask_depth: u32,
    pub display_width: u32,
    pub display_height: u32,
    pub frustum: Frustum,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mask_depth: 10,
            display_width: 1024,
            display_height: 768,
            frustum: Frustum::default(),
        }
    }
}

impl RenderConfig {
    pub(crate) fn validate(&self) -> Result<(), RenderSetupError> {
        if self.mask_depth < 2 || MAX_MASK_DEPTH < self.mask_depth {
            return Err(RenderSetupError::InvalidMaskDepth(self.mask_depth));
        }
        let mask_size = 1u32 << self.mask_depth;
        if mask_size < self.display_width || mask_size < self.display_height {
            return Err(RenderSetupError::MaskBelowDisplay {
                mask_size,
                display_width: self.display_width,
                display_height: self.display_height,
            });
        }
        Ok(())
    }
}

/// Wall-clock figures of one render call, observational only
#[derive(Default, Clone, Copy, Debug)]
pub struct RenderStats {
    pub prepare: Duration,
    pub query: Duration,
    pub transfer: Duration,
    pub faces_rendered: [bool; 6],
}

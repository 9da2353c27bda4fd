use quimera_core::MathResult;

use crate::Vec3;
use crate::space_conversion::{DepthRange, SpaceConversionMatrix};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Handedness {
    #[default]
    Left,
    Right,
}

/// Perspective camera. Matrices are built left-handed and switched when
/// `handedness` is [`Handedness::Right`].
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
    pub handedness: Handedness,
    pub depth_range: DepthRange,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_rad: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up,
            fov_y_rad,
            z_near,
            z_far,
            aspect,
            handedness: Handedness::Left,
            depth_range: DepthRange::ZERO_TO_ONE,
        }
    }

    pub fn view(&self) -> MathResult<SpaceConversionMatrix> {
        let view = SpaceConversionMatrix::view_space(self.eye, self.target, self.up)?;
        Ok(match self.handedness {
            Handedness::Left => view,
            Handedness::Right => view.switch_hand_convention_view_space_matrix(),
        })
    }

    pub fn proj(&self) -> MathResult<SpaceConversionMatrix> {
        let proj = SpaceConversionMatrix::projection_space(
            self.z_near,
            self.z_far,
            self.aspect,
            self.fov_y_rad,
            self.depth_range,
        )?;
        Ok(match self.handedness {
            Handedness::Left => proj,
            Handedness::Right => proj.switch_hand_convention_projection_space_matrix(),
        })
    }

    /// `view * proj`: row vectors go through the view first.
    pub fn view_proj(&self) -> MathResult<SpaceConversionMatrix> {
        let vp = self.view()? * self.proj()?;
        log::trace!(
            "Camera {:?} eye={:?} target={:?} -> view_proj={:?}",
            self.handedness,
            self.eye,
            self.target,
            vp.ij
        );
        Ok(vp)
    }

    #[inline]
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    #[inline]
    pub fn with_handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = handedness;
        self
    }

    #[inline]
    pub fn with_depth_range(mut self, depth_range: DepthRange) -> Self {
        self.depth_range = depth_range;
        self
    }
}

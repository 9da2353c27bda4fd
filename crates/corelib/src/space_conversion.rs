//! World, view and projection matrices.
//!
//! A [`SpaceConversionMatrix`] is a plain 4x4 matrix; which space it converts
//! between depends only on the `set_*` method that filled it. Matching hand
//! switches must be applied to each kind.

use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use quimera_core::float::{are_equal, is_zero};
use quimera_core::{MathError, MathResult};

use crate::matrix::{AffineStorage, Matrix4x4};
use crate::rotation::RotationMatrix3x3;
use crate::scaling::ScalingMatrix3x3;
use crate::transformation::{TransformationMatrix, TransformationMatrix4x4};
use crate::translation::TranslationMatrix4x4;
use crate::vector::{ToVec3, TransformVector, transform_point, transform_vec4};
use crate::{Vec3, Vec4};

/// Clip-space depth interval a projection maps `[near, far]` onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthRange {
    pub min: f32,
    pub max: f32,
}

impl DepthRange {
    pub const ZERO_TO_ONE: Self = Self { min: 0.0, max: 1.0 };
    pub const MINUS_ONE_TO_ONE: Self = Self {
        min: -1.0,
        max: 1.0,
    };
}

impl Default for DepthRange {
    fn default() -> Self {
        Self::ZERO_TO_ONE
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SpaceConversionMatrix {
    pub ij: [[f32; 4]; 4],
}

impl SpaceConversionMatrix {
    pub const IDENTITY: Self = Self {
        ij: Matrix4x4::IDENTITY.ij,
    };

    pub const ZERO: Self = Self {
        ij: Matrix4x4::ZERO.ij,
    };

    #[inline]
    pub const fn from_rows(ij: [[f32; 4]; 4]) -> Self {
        Self { ij }
    }

    /// Model to world: `Scale * Rotation * Translation`.
    ///
    /// Each part accepts raw values (`Vec3`/`Vec4`, `Quaternion`, `Vec3`) or the
    /// matching single-purpose matrix in either storage shape.
    pub fn set_world_space_matrix<T, R, S>(&mut self, translation: T, rotation: R, scaling: S)
    where
        T: Into<TranslationMatrix4x4>,
        R: Into<RotationMatrix3x3>,
        S: Into<ScalingMatrix3x3>,
    {
        *self = TransformationMatrix4x4::new(translation, rotation, scaling).into();
    }

    /// Takes row 3 of `translation`, the 3x3 block of `rotation` and the diagonal
    /// of `scaling`; everything else in the inputs is ignored.
    pub fn set_world_space_matrix_from_transformations<M: AffineStorage>(
        &mut self,
        translation: &TransformationMatrix<M>,
        rotation: &TransformationMatrix<M>,
        scaling: &TransformationMatrix<M>,
    ) {
        let t = TranslationMatrix4x4::from(translation.translation());
        let r = RotationMatrix3x3::from_rows(rotation.matrix.linear());
        let s = scaling.matrix.linear();
        let s = ScalingMatrix3x3::new(s[0][0], s[1][1], s[2][2]);
        *self = TransformationMatrix4x4::compose(&t, &r, &s).into();
    }

    /// World to camera, left-handed look-at.
    ///
    /// On error the matrix is left untouched.
    pub fn set_view_space_matrix<V: ToVec3>(
        &mut self,
        point_of_view: V,
        target: V,
        up_direction: V,
    ) -> MathResult<()> {
        let eye = point_of_view.to_vec3();
        let up = up_direction.to_vec3();

        if is_zero(up.length()) {
            log::debug!("Rejecting view matrix: null up direction");
            return Err(MathError::NullUpVector);
        }
        let forward = target.to_vec3() - eye;
        if is_zero(forward.length()) {
            log::debug!("Rejecting view matrix: point of view equals target {:?}", eye);
            return Err(MathError::DegenerateViewDirection);
        }
        let z = forward.normalize();
        let x = up.cross(z);
        if is_zero(x.length()) {
            log::debug!("Rejecting view matrix: up {:?} is parallel to {:?}", up, z);
            return Err(MathError::CollinearUpVector);
        }
        let x = x.normalize();
        let y = z.cross(x);

        self.ij = view_rows(x, y, z, eye);
        Ok(())
    }

    /// Camera to clip, left-handed perspective with depth in `[0, 1]`.
    pub fn set_projection_space_matrix(
        &mut self,
        near_clip_plane: f32,
        far_clip_plane: f32,
        aspect_ratio: f32,
        vertical_fov: f32,
    ) -> MathResult<()> {
        self.calculate_matrix_with_variable_depth_range(
            near_clip_plane,
            far_clip_plane,
            aspect_ratio,
            vertical_fov,
            DepthRange::ZERO_TO_ONE,
        )
    }

    /// Same as [`Self::set_projection_space_matrix`] for an arbitrary depth range.
    pub fn calculate_matrix_with_variable_depth_range(
        &mut self,
        near_clip_plane: f32,
        far_clip_plane: f32,
        aspect_ratio: f32,
        vertical_fov: f32,
        depth: DepthRange,
    ) -> MathResult<()> {
        let (n, f) = (near_clip_plane, far_clip_plane);
        if are_equal(n, f) {
            log::debug!("Rejecting projection matrix: near == far == {}", n);
            return Err(MathError::EqualClipPlanes);
        }
        if is_zero(vertical_fov) {
            log::debug!("Rejecting projection matrix: zero field of view");
            return Err(MathError::ZeroFieldOfView);
        }
        if is_zero(aspect_ratio) {
            log::debug!("Rejecting projection matrix: zero aspect ratio");
            return Err(MathError::ZeroAspectRatio);
        }

        let scale_y = 1.0 / (vertical_fov * 0.5).tan();
        let scale_x = scale_y / aspect_ratio;
        let depth_scale = (depth.max * f - depth.min * n) / (f - n);
        let depth_offset = n * f * (depth.min - depth.max) / (f - n);

        self.ij = [
            [scale_x, 0.0, 0.0, 0.0],
            [0.0, scale_y, 0.0, 0.0],
            [0.0, 0.0, depth_scale, 1.0],
            [0.0, 0.0, depth_offset, 0.0],
        ];
        Ok(())
    }

    /// Handedness switch for a matrix built by one of the world-space setters.
    ///
    /// See [`TransformationMatrix::switch_hand_convention`].
    pub fn switch_hand_convention_world_space_matrix(&self) -> Self {
        TransformationMatrix4x4::from(*self)
            .switch_hand_convention()
            .into()
    }

    /// Handedness switch for a matrix built by [`Self::set_view_space_matrix`].
    ///
    /// Rebuilds the look-at from the recovered eye position and axes, so two
    /// switches round-trip only up to float rounding.
    pub fn switch_hand_convention_view_space_matrix(&self) -> Self {
        let m = &self.ij;
        let t = Vec3::new(m[3][0], m[3][1], m[3][2]);
        let eye = -Vec3::new(
            t.dot(Vec3::new(m[0][0], m[0][1], m[0][2])),
            t.dot(Vec3::new(m[1][0], m[1][1], m[1][2])),
            t.dot(Vec3::new(m[2][0], m[2][1], m[2][2])),
        );
        let up = Vec3::new(m[0][1], m[1][1], m[2][1]);
        let z = -Vec3::new(m[0][2], m[1][2], m[2][2]);
        let x = up.cross(z).normalize_or_zero();
        let y = z.cross(x).normalize_or_zero();
        Self {
            ij: view_rows(x, y, z, eye),
        }
    }

    /// Handedness switch for a projection: negates the Z scale and the W selector.
    pub fn switch_hand_convention_projection_space_matrix(&self) -> Self {
        let mut out = *self;
        out.ij[2][2] = -out.ij[2][2];
        out.ij[2][3] = -out.ij[2][3];
        out
    }

    /// Value-returning form of [`Self::set_world_space_matrix`].
    pub fn world_space<T, R, S>(translation: T, rotation: R, scaling: S) -> Self
    where
        T: Into<TranslationMatrix4x4>,
        R: Into<RotationMatrix3x3>,
        S: Into<ScalingMatrix3x3>,
    {
        let mut m = Self::IDENTITY;
        m.set_world_space_matrix(translation, rotation, scaling);
        m
    }

    pub fn view_space<V: ToVec3>(
        point_of_view: V,
        target: V,
        up_direction: V,
    ) -> MathResult<Self> {
        let mut m = Self::IDENTITY;
        m.set_view_space_matrix(point_of_view, target, up_direction)?;
        Ok(m)
    }

    pub fn projection_space(
        near_clip_plane: f32,
        far_clip_plane: f32,
        aspect_ratio: f32,
        vertical_fov: f32,
        depth: DepthRange,
    ) -> MathResult<Self> {
        let mut m = Self::IDENTITY;
        m.calculate_matrix_with_variable_depth_range(
            near_clip_plane,
            far_clip_plane,
            aspect_ratio,
            vertical_fov,
            depth,
        )?;
        Ok(m)
    }

    /// Row-major bytes, ready for a uniform buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        Matrix4x4::from(*self).abs_diff_eq(&Matrix4x4::from(*other), epsilon)
    }
}

fn view_rows(x: Vec3, y: Vec3, z: Vec3, eye: Vec3) -> [[f32; 4]; 4] {
    [
        [x.x, y.x, z.x, 0.0],
        [x.y, y.y, z.y, 0.0],
        [x.z, y.z, z.z, 0.0],
        [-x.dot(eye), -y.dot(eye), -z.dot(eye), 1.0],
    ]
}

impl Default for SpaceConversionMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Matrix4x4> for SpaceConversionMatrix {
    fn from(m: Matrix4x4) -> Self {
        Self { ij: m.ij }
    }
}

impl From<SpaceConversionMatrix> for Matrix4x4 {
    fn from(m: SpaceConversionMatrix) -> Self {
        Matrix4x4::from_rows(m.ij)
    }
}

impl<M: AffineStorage> From<TransformationMatrix<M>> for SpaceConversionMatrix {
    fn from(m: TransformationMatrix<M>) -> Self {
        m.to_matrix4x4().into()
    }
}

impl From<SpaceConversionMatrix> for TransformationMatrix4x4 {
    fn from(m: SpaceConversionMatrix) -> Self {
        Self { matrix: m.into() }
    }
}

impl From<SpaceConversionMatrix> for glam::Mat4 {
    fn from(m: SpaceConversionMatrix) -> Self {
        Matrix4x4::from(m).into()
    }
}

impl Mul for SpaceConversionMatrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        (Matrix4x4::from(self) * Matrix4x4::from(rhs)).into()
    }
}

impl MulAssign for SpaceConversionMatrix {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl TransformVector<Vec3> for SpaceConversionMatrix {
    fn transform(&self, v: Vec3) -> Vec3 {
        transform_point(&self.ij, v)
    }
}

impl TransformVector<Vec4> for SpaceConversionMatrix {
    fn transform(&self, v: Vec4) -> Vec4 {
        transform_vec4(&self.ij, v)
    }
}

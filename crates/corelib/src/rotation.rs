use std::ops::Mul;

use bytemuck::{Pod, Zeroable};
use quimera_core::float::{copy_sign, is_zero};

use crate::Vec3;
use crate::matrix::{Block3, IDENTITY3, determinant3, mul3, row_mul3, transpose3};
use crate::quaternion::Quaternion;
use crate::vector::TransformVector;

/// Pure rotation, stored row-major for row vectors.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RotationMatrix3x3 {
    pub ij: [[f32; 3]; 3],
}

impl RotationMatrix3x3 {
    pub const IDENTITY: Self = Self { ij: IDENTITY3 };

    #[inline]
    pub const fn from_rows(ij: Block3) -> Self {
        Self { ij }
    }

    /// Same rotation as [`Quaternion::from_euler_angles`]: pitch, then roll, then yaw.
    pub fn from_angles(pitch: f32, yaw: f32, roll: f32) -> Self {
        let (b, a) = pitch.sin_cos();
        let (d, c) = yaw.sin_cos();
        let (f, e) = roll.sin_cos();
        Self {
            ij: [
                [e * c, f, -e * d],
                [-a * f * c + b * d, a * e, a * f * d + b * c],
                [b * f * c + a * d, -b * e, -b * f * d + a * c],
            ],
        }
    }

    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Quaternion::from_axis_angle(axis, angle).into()
    }

    /// Inverse of a rotation is its transpose.
    #[inline]
    pub fn invert(&self) -> Self {
        Self {
            ij: transpose3(&self.ij),
        }
    }

    pub fn determinant(&self) -> f32 {
        determinant3(&self.ij)
    }

    /// Quaternion with non-negative `w`. The block must be orthonormal.
    pub fn to_quaternion(&self) -> Quaternion {
        let m = &self.ij;
        let half_root = |v: f32| 0.5 * v.max(0.0).sqrt();
        Quaternion {
            x: copy_sign(m[1][2] - m[2][1], half_root(1.0 + m[0][0] - m[1][1] - m[2][2])),
            y: copy_sign(m[2][0] - m[0][2], half_root(1.0 - m[0][0] + m[1][1] - m[2][2])),
            z: copy_sign(m[0][1] - m[1][0], half_root(1.0 - m[0][0] - m[1][1] + m[2][2])),
            w: half_root(1.0 + m[0][0] + m[1][1] + m[2][2]),
        }
    }

    /// `(pitch, yaw, roll)` in radians, the inverse of [`Self::from_angles`].
    ///
    /// Roll lands in `[-pi/2, pi/2]`. At `roll = +-pi/2` pitch and yaw share an
    /// axis; yaw is reported as zero and pitch carries the whole turn.
    pub fn to_euler_angles(&self) -> (f32, f32, f32) {
        let m = &self.ij;
        let cos_roll = m[0][0].hypot(m[0][2]);
        let roll = m[0][1].atan2(cos_roll);
        if is_zero(cos_roll) {
            return (m[1][2].atan2(m[2][2]), 0.0, roll);
        }
        (
            (-m[2][1]).atan2(m[1][1]),
            (-m[0][2]).atan2(m[0][0]),
            roll,
        )
    }

    /// Axis and angle (radians, in `[0, pi]`). The block must be orthonormal.
    pub fn to_axis_angle(&self) -> (Vec3, f32) {
        self.to_quaternion().to_axis_angle()
    }
}

impl Default for RotationMatrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Unnormalized input scales the block; the zero quaternion gives the identity.
impl From<Quaternion> for RotationMatrix3x3 {
    fn from(q: Quaternion) -> Self {
        let Quaternion { x, y, z, w } = q;
        Self {
            ij: [
                [
                    1.0 - 2.0 * (y * y + z * z),
                    2.0 * (x * y + w * z),
                    2.0 * (x * z - w * y),
                ],
                [
                    2.0 * (x * y - w * z),
                    1.0 - 2.0 * (x * x + z * z),
                    2.0 * (y * z + w * x),
                ],
                [
                    2.0 * (x * z + w * y),
                    2.0 * (y * z - w * x),
                    1.0 - 2.0 * (x * x + y * y),
                ],
            ],
        }
    }
}

impl Mul for RotationMatrix3x3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            ij: mul3(&self.ij, &rhs.ij),
        }
    }
}

impl TransformVector<Vec3> for RotationMatrix3x3 {
    fn transform(&self, v: Vec3) -> Vec3 {
        row_mul3(v, &self.ij)
    }
}

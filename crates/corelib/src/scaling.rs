use std::ops::Mul;

use bytemuck::{Pod, Zeroable};

use crate::Vec3;
use crate::matrix::IDENTITY3;
use crate::vector::TransformVector;

/// Diagonal scale. Zero factors are allowed.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ScalingMatrix3x3 {
    pub ij: [[f32; 3]; 3],
}

impl ScalingMatrix3x3 {
    pub const IDENTITY: Self = Self { ij: IDENTITY3 };

    pub const fn new(sx: f32, sy: f32, sz: f32) -> Self {
        Self {
            ij: [[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, sz]],
        }
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        Vec3::new(self.ij[0][0], self.ij[1][1], self.ij[2][2])
    }
}

impl Default for ScalingMatrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Vec3> for ScalingMatrix3x3 {
    fn from(s: Vec3) -> Self {
        Self::new(s.x, s.y, s.z)
    }
}

impl Mul for ScalingMatrix3x3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        (self.scale() * rhs.scale()).into()
    }
}

impl TransformVector<Vec3> for ScalingMatrix3x3 {
    fn transform(&self, v: Vec3) -> Vec3 {
        v * self.scale()
    }
}

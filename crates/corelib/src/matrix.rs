//! Row-major storage matrices.
//!
//! Points are row vectors (`p' = p * M`), so the translation of an affine
//! matrix lives in row 3 and products read left to right in application order.

use std::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};

use crate::Vec3;

pub(crate) type Block3 = [[f32; 3]; 3];

pub(crate) const IDENTITY3: Block3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

fn mat3(m: &Block3) -> glam::Mat3 {
    glam::Mat3::from_cols_array_2d(m)
}

/// Row-vector product `a * b`, which is `b * a` in glam's column convention.
pub(crate) fn mul3(a: &Block3, b: &Block3) -> Block3 {
    (mat3(b) * mat3(a)).to_cols_array_2d()
}

pub(crate) fn transpose3(m: &Block3) -> Block3 {
    mat3(m).transpose().to_cols_array_2d()
}

pub(crate) fn determinant3(m: &Block3) -> f32 {
    mat3(m).determinant()
}

/// `None` when the block is singular.
pub(crate) fn inverse3(m: &Block3) -> Option<Block3> {
    let g = mat3(m);
    if quimera_core::float::is_zero(g.determinant()) {
        return None;
    }
    Some(g.inverse().to_cols_array_2d())
}

/// Row vector times a 3x3 block.
pub(crate) fn row_mul3(v: Vec3, m: &Block3) -> Vec3 {
    mat3(m).mul_vec3(v)
}

/// General 4x4 matrix, `ij[row][col]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Matrix4x4 {
    pub ij: [[f32; 4]; 4],
}

/// Affine matrix without the projective column.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Matrix4x3 {
    pub ij: [[f32; 3]; 4],
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self {
        ij: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Self = Self { ij: [[0.0; 4]; 4] };

    #[inline]
    pub const fn from_rows(ij: [[f32; 4]; 4]) -> Self {
        Self { ij }
    }

    pub fn transpose(&self) -> Self {
        glam::Mat4::from(*self).transpose().into()
    }

    /// Element-wise comparison with an absolute tolerance.
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.ij
            .iter()
            .flatten()
            .zip(other.ij.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix4x4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        (glam::Mat4::from(rhs) * glam::Mat4::from(self)).into()
    }
}

impl MulAssign for Matrix4x4 {
    // Operands are copies, so `m *= m` reads the original values.
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Same transform in glam's column-vector convention: row `i` here is column `i` there.
impl From<Matrix4x4> for glam::Mat4 {
    fn from(m: Matrix4x4) -> Self {
        glam::Mat4::from_cols_array_2d(&m.ij)
    }
}

impl From<glam::Mat4> for Matrix4x4 {
    fn from(m: glam::Mat4) -> Self {
        Self {
            ij: m.to_cols_array_2d(),
        }
    }
}

impl Matrix4x3 {
    pub const IDENTITY: Self = Self {
        ij: [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0],
        ],
    };

    pub const ZERO: Self = Self { ij: [[0.0; 3]; 4] };
}

impl Default for Matrix4x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Storage shapes an affine (translation/transformation) matrix can live in.
pub trait AffineStorage: Copy + PartialEq + std::fmt::Debug {
    const IDENTITY: Self;

    /// Upper-left 3x3 block.
    fn linear(&self) -> Block3;
    fn set_linear(&mut self, block: Block3);
    /// Row 3, columns 0..3.
    fn translation(&self) -> Vec3;
    fn set_translation(&mut self, t: Vec3);
    fn to_matrix4x4(&self) -> Matrix4x4;
}

impl AffineStorage for Matrix4x4 {
    const IDENTITY: Self = Matrix4x4::IDENTITY;

    fn linear(&self) -> Block3 {
        let m = &self.ij;
        [
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ]
    }

    fn set_linear(&mut self, block: Block3) {
        for (row, src) in self.ij.iter_mut().zip(block) {
            row[..3].copy_from_slice(&src);
        }
    }

    fn translation(&self) -> Vec3 {
        Vec3::new(self.ij[3][0], self.ij[3][1], self.ij[3][2])
    }

    fn set_translation(&mut self, t: Vec3) {
        self.ij[3][..3].copy_from_slice(&t.to_array());
    }

    fn to_matrix4x4(&self) -> Matrix4x4 {
        *self
    }
}

impl AffineStorage for Matrix4x3 {
    const IDENTITY: Self = Matrix4x3::IDENTITY;

    fn linear(&self) -> Block3 {
        [self.ij[0], self.ij[1], self.ij[2]]
    }

    fn set_linear(&mut self, block: Block3) {
        self.ij[..3].copy_from_slice(&block);
    }

    fn translation(&self) -> Vec3 {
        Vec3::from_array(self.ij[3])
    }

    fn set_translation(&mut self, t: Vec3) {
        self.ij[3] = t.to_array();
    }

    fn to_matrix4x4(&self) -> Matrix4x4 {
        let mut out = Matrix4x4::IDENTITY;
        out.set_linear(self.linear());
        out.set_translation(self.translation());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(start: f32) -> Matrix4x4 {
        let mut ij = [[0.0; 4]; 4];
        for (k, v) in ij.iter_mut().flatten().enumerate() {
            *v = start + k as f32;
        }
        Matrix4x4::from_rows(ij)
    }

    #[test]
    fn product_of_sequences() {
        let m = sequence(1.0) * sequence(17.0);
        assert_eq!(m.ij[0], [250.0, 260.0, 270.0, 280.0]);
        assert_eq!(m.ij[1], [618.0, 644.0, 670.0, 696.0]);
        assert_eq!(m.ij[2], [986.0, 1028.0, 1070.0, 1112.0]);
    }

    #[test]
    fn self_multiplication_uses_original_operand() {
        let mut m = sequence(1.0);
        let expected = m * m;
        m *= m;
        assert_eq!(m, expected);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = sequence(1.0);
        assert_eq!(m.transpose().ij[0], [1.0, 5.0, 9.0, 13.0]);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn glam_interop_preserves_transform() {
        let mut m = Matrix4x4::IDENTITY;
        m.set_translation(Vec3::new(1.0, 2.0, 3.0));
        let g: glam::Mat4 = m.into();
        assert_eq!(g.transform_point3(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Matrix4x4::from(g), m);
    }

    #[test]
    fn storage_shapes_widen_consistently() {
        let mut m = Matrix4x3::IDENTITY;
        m.set_translation(Vec3::new(4.0, 5.0, 6.0));
        let wide = m.to_matrix4x4();
        assert_eq!(wide.ij[3], [4.0, 5.0, 6.0, 1.0]);
        assert_eq!(wide.linear(), IDENTITY3);
    }

    #[test]
    fn block_inverse_round_trips() {
        let b = [[2.0, 0.0, 1.0], [0.0, 3.0, 0.0], [1.0, 0.0, 1.0]];
        let inv = inverse3(&b).expect("invertible");
        let p = mul3(&b, &inv);
        for (i, row) in p.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                let e = if i == j { 1.0 } else { 0.0 };
                assert!((v - e).abs() < 1e-6);
            }
        }
        assert!(inverse3(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]]).is_none());
    }

    #[test]
    fn block_products_apply_left_to_right() {
        let a = [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let b = [[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]];
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(row_mul3(row_mul3(v, &a), &b), row_mul3(v, &mul3(&a, &b)));
        assert_eq!(row_mul3(v, &a), Vec3::new(-2.0, 1.0, 3.0));
        assert_eq!(transpose3(&a)[0], [0.0, -1.0, 0.0]);
        assert_eq!(determinant3(&b), 24.0);
    }
}

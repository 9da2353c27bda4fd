use std::ops::Mul;

use crate::matrix::{AffineStorage, Matrix4x3, Matrix4x4};
use crate::vector::{ToVec3, TransformVector};
use crate::{Vec3, Vec4};

/// Translation-only matrix over a 4x3 or 4x4 storage shape.
///
/// The upper-left 3x3 block stays the identity; only row 3 carries data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TranslationMatrix<M: AffineStorage> {
    pub matrix: M,
}

pub type TranslationMatrix4x3 = TranslationMatrix<Matrix4x3>;
pub type TranslationMatrix4x4 = TranslationMatrix<Matrix4x4>;

impl<M: AffineStorage> TranslationMatrix<M> {
    pub const IDENTITY: Self = Self {
        matrix: M::IDENTITY,
    };

    pub fn new(tx: f32, ty: f32, tz: f32) -> Self {
        let mut matrix = M::IDENTITY;
        matrix.set_translation(Vec3::new(tx, ty, tz));
        Self { matrix }
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.matrix.translation()
    }

    pub fn invert(&self) -> Self {
        (-self.translation()).into()
    }

    #[inline]
    pub fn to_matrix4x4(&self) -> Matrix4x4 {
        self.matrix.to_matrix4x4()
    }
}

impl<M: AffineStorage> Default for TranslationMatrix<M> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<M: AffineStorage> From<Vec3> for TranslationMatrix<M> {
    fn from(t: Vec3) -> Self {
        Self::new(t.x, t.y, t.z)
    }
}

/// `w` is ignored.
impl<M: AffineStorage> From<Vec4> for TranslationMatrix<M> {
    fn from(t: Vec4) -> Self {
        t.to_vec3().into()
    }
}

/// Keeps only row 3 of a full matrix.
impl<M: AffineStorage> From<Matrix4x4> for TranslationMatrix<M> {
    fn from(m: Matrix4x4) -> Self {
        m.translation().into()
    }
}

impl From<TranslationMatrix4x3> for TranslationMatrix4x4 {
    fn from(t: TranslationMatrix4x3) -> Self {
        t.translation().into()
    }
}

impl From<TranslationMatrix4x4> for TranslationMatrix4x3 {
    fn from(t: TranslationMatrix4x4) -> Self {
        t.translation().into()
    }
}

impl<M: AffineStorage> Mul for TranslationMatrix<M> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        (self.translation() + rhs.translation()).into()
    }
}

impl<M: AffineStorage> TransformVector<Vec3> for TranslationMatrix<M> {
    fn transform(&self, v: Vec3) -> Vec3 {
        v + self.translation()
    }
}

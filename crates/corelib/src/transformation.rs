//! Combined scale, rotation and translation.
//!
//! The composition order is fixed to `Scale * Rotation * Translation`: with row
//! vectors a point is scaled first, rotated second and translated last.

use std::ops::Mul;

use quimera_core::float::is_zero;

use crate::matrix::{
    AffineStorage, Block3, Matrix4x3, Matrix4x4, determinant3, inverse3, mul3, row_mul3,
};
use crate::quaternion::Quaternion;
use crate::rotation::RotationMatrix3x3;
use crate::scaling::ScalingMatrix3x3;
use crate::translation::TranslationMatrix;
use crate::vector::{TransformVector, transform_point, transform_vec4};
use crate::{Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformationMatrix<M: AffineStorage> {
    pub matrix: M,
}

pub type TransformationMatrix4x3 = TransformationMatrix<Matrix4x3>;
pub type TransformationMatrix4x4 = TransformationMatrix<Matrix4x4>;

fn inverse_scale(s: f32) -> f32 {
    if is_zero(s) { 0.0 } else { 1.0 / s }
}

impl<M: AffineStorage> TransformationMatrix<M> {
    pub const IDENTITY: Self = Self {
        matrix: M::IDENTITY,
    };

    fn from_parts(linear: Block3, translation: Vec3) -> Self {
        let mut matrix = M::IDENTITY;
        matrix.set_linear(linear);
        matrix.set_translation(translation);
        Self { matrix }
    }

    /// Row `i` of the block is the rotation row `i` scaled by `s_i`; row 3 is the translation.
    pub fn compose<N: AffineStorage>(
        translation: &TranslationMatrix<N>,
        rotation: &RotationMatrix3x3,
        scaling: &ScalingMatrix3x3,
    ) -> Self {
        let s = scaling.scale().to_array();
        let mut linear = rotation.ij;
        for (row, factor) in linear.iter_mut().zip(s) {
            for v in row.iter_mut() {
                *v *= factor;
            }
        }
        Self::from_parts(linear, translation.translation())
    }

    /// Accepts vectors, quaternions or the single-purpose matrices for each part.
    pub fn new<T, R, S>(translation: T, rotation: R, scaling: S) -> Self
    where
        T: Into<TranslationMatrix<M>>,
        R: Into<RotationMatrix3x3>,
        S: Into<ScalingMatrix3x3>,
    {
        Self::compose(&translation.into(), &rotation.into(), &scaling.into())
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.matrix.translation()
    }

    /// Lengths of the block rows. Always non-negative.
    pub fn scale(&self) -> Vec3 {
        let l = self.matrix.linear();
        Vec3::new(
            Vec3::from_array(l[0]).length(),
            Vec3::from_array(l[1]).length(),
            Vec3::from_array(l[2]).length(),
        )
    }

    fn rotation_block(&self) -> Block3 {
        let mut l = self.matrix.linear();
        for (row, s) in l.iter_mut().zip(self.scale().to_array()) {
            let inv = inverse_scale(s);
            for v in row.iter_mut() {
                *v *= inv;
            }
        }
        l
    }

    pub fn rotation(&self) -> Quaternion {
        RotationMatrix3x3::from_rows(self.rotation_block()).to_quaternion()
    }

    /// `(pitch, yaw, roll)` in radians of the rotation part, scale removed.
    pub fn rotation_angles(&self) -> (f32, f32, f32) {
        RotationMatrix3x3::from_rows(self.rotation_block()).to_euler_angles()
    }

    /// Translation, rotation and scale; the quaternion comes back with `w >= 0`.
    pub fn decompose(&self) -> (Vec3, Quaternion, Vec3) {
        (self.translation(), self.rotation(), self.scale())
    }

    pub fn decompose_into_matrices(
        &self,
    ) -> (TranslationMatrix<M>, RotationMatrix3x3, ScalingMatrix3x3) {
        (
            self.translation().into(),
            RotationMatrix3x3::from_rows(self.rotation_block()),
            self.scale().into(),
        )
    }

    pub fn determinant(&self) -> f32 {
        determinant3(&self.matrix.linear())
    }

    /// Affine inverse; `None` when the block is singular.
    pub fn try_inverse(&self) -> Option<Self> {
        let linear = inverse3(&self.matrix.linear())?;
        let translation = -row_mul3(self.translation(), &linear);
        Some(Self::from_parts(linear, translation))
    }

    /// Converts between left- and right-handed conventions.
    ///
    /// The rotation is transposed with each row's scale kept in place and the
    /// Z translation is negated. Rows with zero scale stay zero.
    pub fn switch_hand_convention(&self) -> Self {
        let l = self.matrix.linear();
        let s = self.scale().to_array();
        let mut out = l;
        for (i, row) in out.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                if i != j {
                    *v = l[j][i] * inverse_scale(s[j]) * s[i];
                }
            }
        }
        let t = self.translation();
        Self::from_parts(out, Vec3::new(t.x, t.y, -t.z))
    }

    #[inline]
    pub fn to_matrix4x4(&self) -> Matrix4x4 {
        self.matrix.to_matrix4x4()
    }
}

impl<M: AffineStorage> Default for TransformationMatrix<M> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<M: AffineStorage> From<TranslationMatrix<M>> for TransformationMatrix<M> {
    fn from(t: TranslationMatrix<M>) -> Self {
        Self { matrix: t.matrix }
    }
}

impl<M: AffineStorage> From<RotationMatrix3x3> for TransformationMatrix<M> {
    fn from(r: RotationMatrix3x3) -> Self {
        Self::from_parts(r.ij, Vec3::ZERO)
    }
}

impl<M: AffineStorage> From<ScalingMatrix3x3> for TransformationMatrix<M> {
    fn from(s: ScalingMatrix3x3) -> Self {
        Self::from_parts(s.ij, Vec3::ZERO)
    }
}

impl From<TransformationMatrix4x3> for TransformationMatrix4x4 {
    fn from(m: TransformationMatrix4x3) -> Self {
        Self {
            matrix: m.matrix.to_matrix4x4(),
        }
    }
}

impl From<TransformationMatrix4x4> for TransformationMatrix4x3 {
    fn from(m: TransformationMatrix4x4) -> Self {
        Self::from_parts(m.matrix.linear(), m.translation())
    }
}

/// Affine product: block `L1 * L2`, translation `t1 * L2 + t2`.
impl<M: AffineStorage> Mul for TransformationMatrix<M> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let l2 = rhs.matrix.linear();
        Self::from_parts(
            mul3(&self.matrix.linear(), &l2),
            row_mul3(self.translation(), &l2) + rhs.translation(),
        )
    }
}

impl<M: AffineStorage, N: AffineStorage> Mul<TranslationMatrix<N>> for TransformationMatrix<M> {
    type Output = Self;

    fn mul(self, rhs: TranslationMatrix<N>) -> Self {
        Self::from_parts(self.matrix.linear(), self.translation() + rhs.translation())
    }
}

impl<M: AffineStorage> Mul<RotationMatrix3x3> for TransformationMatrix<M> {
    type Output = Self;

    fn mul(self, rhs: RotationMatrix3x3) -> Self {
        self * Self::from(rhs)
    }
}

impl<M: AffineStorage> Mul<ScalingMatrix3x3> for TransformationMatrix<M> {
    type Output = Self;

    fn mul(self, rhs: ScalingMatrix3x3) -> Self {
        self * Self::from(rhs)
    }
}

impl<M: AffineStorage> TransformVector<Vec3> for TransformationMatrix<M> {
    fn transform(&self, v: Vec3) -> Vec3 {
        transform_point(&self.to_matrix4x4().ij, v)
    }
}

impl<M: AffineStorage> TransformVector<Vec4> for TransformationMatrix<M> {
    fn transform(&self, v: Vec4) -> Vec4 {
        transform_vec4(&self.to_matrix4x4().ij, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::{TranslationMatrix4x3, TranslationMatrix4x4};
    use crate::vector::Transformable;
    use approx::assert_abs_diff_eq;
    use quimera_core::angle::{HALF_PI, QUARTER_PI, THIRD_PI};

    fn fixture_parts() -> (Vec3, RotationMatrix3x3, ScalingMatrix3x3) {
        (
            Vec3::new(1.0, 2.0, 3.0),
            RotationMatrix3x3::from_angles(QUARTER_PI, THIRD_PI, HALF_PI),
            ScalingMatrix3x3::new(4.0, 5.0, 6.0),
        )
    }

    #[test]
    fn composition_is_scale_rotation_translation() {
        let (t, r, s) = fixture_parts();
        let all_in_one = TransformationMatrix4x4::new(t, r, s);
        let product = TransformationMatrix4x4::from(s)
            * TransformationMatrix4x4::from(r)
            * TransformationMatrix4x4::from(TranslationMatrix4x4::from(t));
        assert!(all_in_one.to_matrix4x4().abs_diff_eq(&product.to_matrix4x4(), 1e-6));

        let chained = TransformationMatrix4x3::from(s) * r * TranslationMatrix4x3::from(t);
        assert!(
            TransformationMatrix4x3::new(t, r, s)
                .to_matrix4x4()
                .abs_diff_eq(&chained.to_matrix4x4(), 1e-6)
        );
    }

    #[test]
    fn unnormalized_quaternion_fixture() {
        let m = TransformationMatrix4x3::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quaternion::new(4.0, 5.0, 6.0, 7.0),
            Vec3::new(8.0, 9.0, 10.0),
        );
        assert_eq!(
            m.matrix.ij,
            [
                [-968.0, 992.0, -176.0],
                [-396.0, -927.0, 1044.0],
                [1180.0, 40.0, -810.0],
                [1.0, 2.0, 3.0],
            ]
        );
    }

    #[test]
    fn storage_shapes_agree() {
        let (t, r, s) = fixture_parts();
        let narrow = TransformationMatrix4x3::new(TranslationMatrix4x4::from(t), r, s);
        let wide = TransformationMatrix4x4::new(TranslationMatrix4x3::from(t), r, s);
        assert_eq!(TransformationMatrix4x4::from(narrow), wide);
        assert_eq!(TransformationMatrix4x3::from(wide), narrow);
    }

    #[test]
    fn decomposition_recovers_parts() {
        let q = Quaternion::from_euler_angles(0.3, 1.1, -0.7);
        let q = if q.w < 0.0 { -q } else { q };
        let m = TransformationMatrix4x4::new(
            Vec3::new(-1.0, 5.0, 2.0),
            q,
            Vec3::new(2.0, 0.5, 3.0),
        );
        let (t, rq, s) = m.decompose();
        assert!(t.abs_diff_eq(Vec3::new(-1.0, 5.0, 2.0), 1e-6));
        assert!(s.abs_diff_eq(Vec3::new(2.0, 0.5, 3.0), 1e-5));
        assert_abs_diff_eq!(rq.dot(q), 1.0, epsilon = 1e-5);

        let (tm, rm, sm) = m.decompose_into_matrices();
        let rebuilt = TransformationMatrix4x4::compose(&tm, &rm, &sm);
        assert!(rebuilt.to_matrix4x4().abs_diff_eq(&m.to_matrix4x4(), 1e-5));
    }

    #[test]
    fn rotation_angles_ignore_scale_and_translation() {
        let m = TransformationMatrix4x3::new(
            Vec3::new(7.0, -3.0, 1.0),
            RotationMatrix3x3::from_angles(-0.8, 2.1, 0.35),
            Vec3::new(3.0, 0.25, 2.0),
        );
        let (pitch, yaw, roll) = m.rotation_angles();
        assert_abs_diff_eq!(pitch, -0.8, epsilon = 1e-5);
        assert_abs_diff_eq!(yaw, 2.1, epsilon = 1e-5);
        assert_abs_diff_eq!(roll, 0.35, epsilon = 1e-5);
    }

    #[test]
    fn inverse_undoes_transformation() {
        let (t, r, s) = fixture_parts();
        let m = TransformationMatrix4x4::new(t, r, s);
        let inv = m.try_inverse().expect("invertible");
        let p = Vec3::new(0.5, -2.0, 7.0);
        assert!(p.transformed_by(&m).transformed_by(&inv).abs_diff_eq(p, 1e-4));
        assert_abs_diff_eq!(m.determinant(), 120.0, epsilon = 1e-3);

        let flat = TransformationMatrix4x4::new(t, r, Vec3::new(1.0, 0.0, 1.0));
        assert!(flat.try_inverse().is_none());
    }

    #[test]
    fn hand_switch_transposes_rotation_and_flips_z() {
        let (_, r, s) = fixture_parts();
        let m = TransformationMatrix4x4::from(s) * r * TranslationMatrix4x4::new(1.0, 2.0, 3.0);
        let expected = TransformationMatrix4x4::from(s)
            * r.invert()
            * TranslationMatrix4x4::new(1.0, 2.0, -3.0);
        let switched = m.switch_hand_convention();
        assert!(switched.to_matrix4x4().abs_diff_eq(&expected.to_matrix4x4(), 1e-5));
        assert!(
            switched
                .switch_hand_convention()
                .to_matrix4x4()
                .abs_diff_eq(&m.to_matrix4x4(), 1e-5)
        );
    }

    #[test]
    fn transforms_points_scale_rotate_translate() {
        let m = TransformationMatrix4x4::new(
            Vec3::new(10.0, 0.0, 0.0),
            Quaternion::from_axis_angle(Vec3::Z, HALF_PI),
            Vec3::splat(2.0),
        );
        let p = Vec3::X.transformed_by(&m);
        assert!(p.abs_diff_eq(Vec3::new(10.0, 2.0, 0.0), 1e-5));
        let h = Vec4::new(1.0, 0.0, 0.0, 0.0).transformed_by(&m);
        assert!(h.abs_diff_eq(Vec4::new(0.0, 2.0, 0.0, 0.0), 1e-5));
    }
}

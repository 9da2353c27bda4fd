use std::ops::{Add, Div, Mul, Neg, Sub};

use bytemuck::{Pod, Zeroable};
use quimera_core::float::{EPSILON, are_equal, is_zero};

use crate::Vec3;
use crate::rotation::RotationMatrix3x3;

/// Rotation as `(x, y, z, w)`.
///
/// Unnormalized values are legal and are never normalized implicitly; a matrix
/// built from one carries the extra scale-like distortion.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Pitch about X, yaw about Y, roll about Z, in radians.
    ///
    /// Equivalent to `yaw * roll * pitch`: pitch is applied first, yaw last.
    pub fn from_euler_angles(pitch: f32, yaw: f32, roll: f32) -> Self {
        let (sx, cx) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();
        let (sz, cz) = (roll * 0.5).sin_cos();
        Self {
            x: cy * cz * sx + sy * cx * sz,
            y: cy * sz * sx + cx * cz * sy,
            z: cy * cx * sz - sy * cz * sx,
            w: cy * cx * cz - sy * sz * sx,
        }
    }

    /// `axis` is expected to be unit length.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Divides by the length. The zero quaternion yields NaNs; see [`Self::try_normalize`].
    #[inline]
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    pub fn try_normalize(self) -> Option<Self> {
        let len = self.length();
        (!is_zero(len)).then(|| self / len)
    }

    pub fn is_normalized(self) -> bool {
        are_equal(self.length_squared(), 1.0)
    }

    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse, valid for unnormalized input too.
    pub fn inverse(self) -> Option<Self> {
        let len_sq = self.length_squared();
        (!is_zero(len_sq)).then(|| self.conjugate() / len_sq)
    }

    /// Linear blend, renormalized. A blend that cancels to zero yields NaNs.
    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        (self * (1.0 - t) + rhs * t).normalize()
    }

    /// Spherical blend along the shorter arc. Inputs are normalized first;
    /// `None` when either of them is the zero quaternion.
    pub fn slerp(self, rhs: Self, t: f32) -> Option<Self> {
        let from = self.try_normalize()?;
        let mut to = rhs.try_normalize()?;
        let mut cos = from.dot(to);
        if cos < 0.0 {
            to = -to;
            cos = -cos;
        }
        if cos > 1.0 - EPSILON {
            return Some(from.lerp(to, t));
        }
        let theta = cos.acos();
        let sin = theta.sin();
        Some(from * (((1.0 - t) * theta).sin() / sin) + to * ((t * theta).sin() / sin))
    }

    /// Axis and angle (radians) of a normalized quaternion.
    ///
    /// A null rotation has no defined axis; X is returned.
    pub fn to_axis_angle(self) -> (Vec3, f32) {
        let angle = 2.0 * self.w.clamp(-1.0, 1.0).acos();
        let s = (angle * 0.5).sin();
        if is_zero(s) {
            return (Vec3::X, angle);
        }
        (Vec3::new(self.x, self.y, self.z) / s, angle)
    }

    /// `(pitch, yaw, roll)` in radians, the inverse of [`Self::from_euler_angles`].
    /// Expects a normalized quaternion.
    pub fn to_euler_angles(self) -> (f32, f32, f32) {
        RotationMatrix3x3::from(self).to_euler_angles()
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

/// Hamilton product: `a * b` rotates by `b` first, then by `a`.
impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self, rhs);
        Self {
            x: a.w * b.x + b.w * a.x + (a.y * b.z - a.z * b.y),
            y: a.w * b.y + a.y * b.w + (a.z * b.x - a.x * b.z),
            z: a.w * b.z + a.z * b.w + (a.x * b.y - a.y * b.x),
            w: a.w * b.w - (a.x * b.x + a.y * b.y + a.z * b.z),
        }
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl Div<f32> for Quaternion {
    type Output = Self;

    fn div(self, s: f32) -> Self {
        Self::new(self.x / s, self.y / s, self.z / s, self.w / s)
    }
}

impl From<glam::Quat> for Quaternion {
    fn from(q: glam::Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion> for glam::Quat {
    fn from(q: Quaternion) -> Self {
        glam::Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use quimera_core::angle::{HALF_PI, PI, QUARTER_PI, THIRD_PI};

    fn assert_quat_eq(a: Quaternion, b: Quaternion) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-6);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-6);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-6);
        assert_abs_diff_eq!(a.w, b.w, epsilon = 1e-6);
    }

    #[test]
    fn euler_angles_compose_yaw_roll_pitch() {
        let (pitch, yaw, roll) = (QUARTER_PI, THIRD_PI, HALF_PI);
        let composed = Quaternion::from_axis_angle(Vec3::Y, yaw)
            * Quaternion::from_axis_angle(Vec3::Z, roll)
            * Quaternion::from_axis_angle(Vec3::X, pitch);
        assert_quat_eq(Quaternion::from_euler_angles(pitch, yaw, roll), composed);
    }

    #[test]
    fn hamilton_product_matches_glam() {
        let a = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let b = Quaternion::new(-2.0, 0.5, 1.0, 3.0);
        let ours = a * b;
        let theirs = glam::Quat::from(a) * glam::Quat::from(b);
        assert_quat_eq(ours, theirs.into());
    }

    #[test]
    fn inverse_undoes_unnormalized_rotation() {
        let q = Quaternion::new(4.0, 5.0, 6.0, 7.0);
        let inv = q.inverse().expect("non-zero");
        assert_quat_eq(q * inv, Quaternion::IDENTITY);
        assert!(Quaternion::ZERO.inverse().is_none());
        assert!(Quaternion::ZERO.try_normalize().is_none());
    }

    #[test]
    fn normalization_is_explicit() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert!(!q.is_normalized());
        assert!(q.normalize().is_normalized());
        assert_eq!(q.conjugate(), Quaternion::new(-1.0, -2.0, -3.0, 4.0));
    }

    #[test]
    fn axis_angle_round_trip() {
        let axis = Vec3::new(1.0, 2.0, 2.0).normalize();
        let (a, angle) = Quaternion::from_axis_angle(axis, THIRD_PI).to_axis_angle();
        assert_abs_diff_eq!(angle, THIRD_PI, epsilon = 1e-5);
        assert!(a.abs_diff_eq(axis, 1e-5));

        let (a, angle) = Quaternion::IDENTITY.to_axis_angle();
        assert_eq!((a, angle), (Vec3::X, 0.0));

        let (a, angle) = Quaternion::from_axis_angle(Vec3::Z, PI).to_axis_angle();
        assert_abs_diff_eq!(angle, PI, epsilon = 1e-5);
        assert!(a.abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn slerp_reaches_both_ends_and_midpoint() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vec3::Y, HALF_PI);
        let half = Quaternion::from_axis_angle(Vec3::Y, QUARTER_PI);
        assert_quat_eq(a.slerp(b, 0.0).expect("non-zero"), a);
        assert_quat_eq(a.slerp(b, 1.0).expect("non-zero"), b);
        assert_quat_eq(a.slerp(b, 0.5).expect("non-zero"), half);
        // shorter arc through the negated target
        assert_quat_eq(a.slerp(-b, 0.5).expect("non-zero"), half);
        // unnormalized inputs blend as their unit counterparts
        assert_quat_eq((a * 3.0).slerp(b * 0.5, 0.5).expect("non-zero"), half);
    }

    #[test]
    fn slerp_rejects_zero_quaternion() {
        assert!(Quaternion::ZERO.slerp(Quaternion::IDENTITY, 0.5).is_none());
        assert!(Quaternion::IDENTITY.slerp(Quaternion::ZERO, 0.5).is_none());
    }

    #[test]
    fn euler_angles_round_trip() {
        let (pitch, yaw, roll) = (0.4, -1.1, 0.7);
        let (p, y, r) = Quaternion::from_euler_angles(pitch, yaw, roll).to_euler_angles();
        assert_abs_diff_eq!(p, pitch, epsilon = 1e-5);
        assert_abs_diff_eq!(y, yaw, epsilon = 1e-5);
        assert_abs_diff_eq!(r, roll, epsilon = 1e-5);
    }

    #[test]
    fn lerp_is_normalized() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vec3::X, HALF_PI);
        assert!(a.lerp(b, 0.3).is_normalized());
    }
}

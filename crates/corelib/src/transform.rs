use quimera_core::AngleNotation;

use crate::Vec3;
use crate::quaternion::Quaternion;
use crate::space_conversion::SpaceConversionMatrix;

/// Placement of a model instance: translation, rotation and (non-uniform) scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Used as-is; normalize beforehand for a pure rotation.
    pub rotation: Quaternion,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation: Quaternion, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// `angles` holds pitch, yaw and roll in `notation` units.
    pub fn from_euler(
        translation: Vec3,
        angles: Vec3,
        scale: Vec3,
        notation: AngleNotation,
    ) -> Self {
        let rotation = Quaternion::from_euler_angles(
            notation.to_radians(angles.x),
            notation.to_radians(angles.y),
            notation.to_radians(angles.z),
        );
        Self::from_trs(translation, rotation, scale)
    }

    /// Model-to-world matrix (scale, then rotate, then translate).
    #[inline]
    pub fn world_matrix(&self) -> SpaceConversionMatrix {
        SpaceConversionMatrix::world_space(self.translation, self.rotation, self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

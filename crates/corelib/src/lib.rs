//! Math types: quaternions, transform matrices, space conversion, Transform, Camera.

pub use glam::{Vec3, Vec4, vec3, vec4};
pub use quimera_core::{AngleNotation, MathError, MathResult};

pub mod camera;
pub mod matrix;
pub mod quaternion;
pub mod rotation;
pub mod scaling;
pub mod space_conversion;
pub mod transform;
pub mod transformation;
pub mod translation;
pub mod vector;

pub use matrix::{AffineStorage, Matrix4x3, Matrix4x4};
pub use quaternion::Quaternion;
pub use rotation::RotationMatrix3x3;
pub use scaling::ScalingMatrix3x3;
pub use space_conversion::{DepthRange, SpaceConversionMatrix};
pub use transformation::{TransformationMatrix, TransformationMatrix4x3, TransformationMatrix4x4};
pub use translation::{TranslationMatrix, TranslationMatrix4x3, TranslationMatrix4x4};
pub use vector::{ToVec3, TransformVector, Transformable};

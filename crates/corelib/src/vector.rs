//! Vector types and the vector-by-matrix transform seam.

pub use glam::{Vec3, Vec4, vec3, vec4};

/// Anything usable as a 3D point; 4D inputs drop `w`.
pub trait ToVec3: Copy {
    fn to_vec3(self) -> Vec3;
}

impl ToVec3 for Vec3 {
    #[inline]
    fn to_vec3(self) -> Vec3 {
        self
    }
}

impl ToVec3 for Vec4 {
    #[inline]
    fn to_vec3(self) -> Vec3 {
        self.truncate()
    }
}

/// Matrix-side transform of a row vector `v * M`.
///
/// 3D points get the affine treatment (translation applied, projective column
/// ignored); 4D vectors go through the full product.
pub trait TransformVector<V> {
    fn transform(&self, v: V) -> V;
}

/// Vector-side spelling: `v.transformed_by(&m)`.
pub trait Transformable: Sized {
    #[inline]
    fn transformed_by<M: TransformVector<Self>>(self, matrix: &M) -> Self {
        matrix.transform(self)
    }
}

impl Transformable for Vec3 {}
impl Transformable for Vec4 {}

pub(crate) fn transform_point(ij: &[[f32; 4]; 4], p: Vec3) -> Vec3 {
    Vec3::new(
        p.x * ij[0][0] + p.y * ij[1][0] + p.z * ij[2][0] + ij[3][0],
        p.x * ij[0][1] + p.y * ij[1][1] + p.z * ij[2][1] + ij[3][1],
        p.x * ij[0][2] + p.y * ij[1][2] + p.z * ij[2][2] + ij[3][2],
    )
}

pub(crate) fn transform_vec4(ij: &[[f32; 4]; 4], v: Vec4) -> Vec4 {
    let c = |j: usize| v.x * ij[0][j] + v.y * ij[1][j] + v.z * ij[2][j] + v.w * ij[3][j];
    Vec4::new(c(0), c(1), c(2), c(3))
}

impl TransformVector<Vec3> for crate::Matrix4x4 {
    fn transform(&self, v: Vec3) -> Vec3 {
        transform_point(&self.ij, v)
    }
}

impl TransformVector<Vec4> for crate::Matrix4x4 {
    fn transform(&self, v: Vec4) -> Vec4 {
        transform_vec4(&self.ij, v)
    }
}

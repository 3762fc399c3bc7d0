//! # Object Transform
//!
//! Object-to-world matrix paired with its inverse.

use crate::error::{EditMeshError, EditMeshResult};
use config::constants::EPSILON;
use glam::{DMat3, DMat4, DVec3};

/// Object-to-world transform with a cached inverse.
///
/// # Example
///
/// ```rust
/// use edit_mesh::Transform;
/// use glam::DVec3;
///
/// let t = Transform::from_translation(DVec3::new(1.0, 0.0, 0.0));
/// assert_eq!(t.transform_point(DVec3::ZERO), DVec3::X);
/// assert_eq!(t.inverse_transform_point(DVec3::X), DVec3::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: DMat4,
    inverse: DMat4,
}

impl Transform {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        matrix: DMat4::IDENTITY,
        inverse: DMat4::IDENTITY,
    };

    /// Wraps a matrix, rejecting singular ones.
    pub fn new(matrix: DMat4) -> EditMeshResult<Self> {
        let det = matrix.determinant();
        if det.abs() < EPSILON || !det.is_finite() {
            return Err(EditMeshError::SingularTransform);
        }
        Ok(Self {
            matrix,
            inverse: matrix.inverse(),
        })
    }

    /// Pure translation.
    pub fn from_translation(offset: DVec3) -> Self {
        Self {
            matrix: DMat4::from_translation(offset),
            inverse: DMat4::from_translation(-offset),
        }
    }

    /// Object-to-world matrix.
    #[inline]
    pub fn matrix(&self) -> DMat4 {
        self.matrix
    }

    /// World-to-object matrix.
    #[inline]
    pub fn inverse(&self) -> DMat4 {
        self.inverse
    }

    /// Upper 3x3 block (rotation and scale).
    #[inline]
    pub fn rotation_scale(&self) -> DMat3 {
        DMat3::from_mat4(self.matrix)
    }

    /// Translation part.
    #[inline]
    pub fn translation(&self) -> DVec3 {
        self.matrix.w_axis.truncate()
    }

    #[inline]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.matrix.transform_point3(point)
    }

    #[inline]
    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.matrix.transform_vector3(vector)
    }

    #[inline]
    pub fn inverse_transform_point(&self, point: DVec3) -> DVec3 {
        self.inverse.transform_point3(point)
    }

    #[inline]
    pub fn inverse_transform_vector(&self, vector: DVec3) -> DVec3 {
        self.inverse.transform_vector3(vector)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

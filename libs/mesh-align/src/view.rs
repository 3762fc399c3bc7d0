//! # View Axes
//!
//! Resolves which axis of a basis reads as "right" and which as "up" from
//! the current camera angle.

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Camera orientation of a 3D viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    /// View-to-world rotation
    pub rotation: DQuat,
}

impl Viewport {
    pub fn new(rotation: DQuat) -> Self {
        Self { rotation }
    }

    /// World direction of the screen's right edge.
    #[inline]
    pub fn right(&self) -> DVec3 {
        self.rotation * DVec3::X
    }

    /// World direction of the screen's top edge.
    #[inline]
    pub fn up(&self) -> DVec3 {
        self.rotation * DVec3::Y
    }
}

/// Basis axes matched to the view's right and up directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewAxes {
    /// Index (0, 1, 2) of the axis closest to view right
    pub right: usize,
    /// Index (0, 1, 2) of the axis closest to view up
    pub up: usize,
    /// The right axis points left on screen
    pub flip_right: bool,
    /// The up axis points down on screen
    pub flip_up: bool,
}

/// Picks the basis axes most aligned with `view_right` and `view_up`.
///
/// Alignment is the absolute dot product; on a tie the lower index wins.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_align::view_relative_axes;
///
/// let axes = view_relative_axes(DVec3::X, DVec3::Y, [DVec3::X, DVec3::Y, DVec3::Z]);
/// assert_eq!((axes.right, axes.up), (0, 1));
/// assert!(!axes.flip_right && !axes.flip_up);
/// ```
pub fn view_relative_axes(view_right: DVec3, view_up: DVec3, basis: [DVec3; 3]) -> ViewAxes {
    let (right, right_dot) = best_axis(view_right, &basis);
    let (up, up_dot) = best_axis(view_up, &basis);
    ViewAxes {
        right,
        up,
        flip_right: right_dot < 0.0,
        flip_up: up_dot < 0.0,
    }
}

/// [`view_relative_axes`] for the columns of `matrix`'s 3x3 part.
pub fn right_and_up_axes(viewport: &Viewport, matrix: &DMat4) -> ViewAxes {
    let basis = [
        matrix.transform_vector3(DVec3::X),
        matrix.transform_vector3(DVec3::Y),
        matrix.transform_vector3(DVec3::Z),
    ];
    view_relative_axes(viewport.right(), viewport.up(), basis)
}

fn best_axis(direction: DVec3, basis: &[DVec3; 3]) -> (usize, f64) {
    let mut best = (0, direction.dot(basis[0]));
    for (index, axis) in basis.iter().enumerate().skip(1) {
        let dot = direction.dot(*axis);
        if dot.abs() > best.1.abs() {
            best = (index, dot);
        }
    }
    best
}

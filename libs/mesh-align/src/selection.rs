//! # Selection Geometry
//!
//! Bounding boxes, averages and interpolated centres of point sets.

use crate::error::{AlignError, AlignResult};
use glam::DVec3;

/// Axis-aligned bounds of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBounds {
    /// Corners: the four at min z counter-clockwise from (min, min), then
    /// the same four at max z
    pub corners: [DVec3; 8],
    /// Per-axis midpoint of min and max
    pub center: DVec3,
    pub min: DVec3,
    pub max: DVec3,
}

/// Bounding box corners and centre of `points`.
///
/// The centre is the middle of the box, not the mean of the points.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_align::bounding_box_and_center;
///
/// let bounds = bounding_box_and_center(&[DVec3::ZERO, DVec3::splat(2.0)]).unwrap();
/// assert_eq!(bounds.center, DVec3::ONE);
/// assert_eq!(bounds.corners[6], DVec3::splat(2.0));
/// ```
pub fn bounding_box_and_center(points: &[DVec3]) -> AlignResult<SelectionBounds> {
    let (first, rest) = points
        .split_first()
        .ok_or_else(|| AlignError::empty("bounding box"))?;
    let (min, max) = rest
        .iter()
        .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));

    let corners = [
        DVec3::new(min.x, min.y, min.z),
        DVec3::new(max.x, min.y, min.z),
        DVec3::new(max.x, max.y, min.z),
        DVec3::new(min.x, max.y, min.z),
        DVec3::new(min.x, min.y, max.z),
        DVec3::new(max.x, min.y, max.z),
        DVec3::new(max.x, max.y, max.z),
        DVec3::new(min.x, max.y, max.z),
    ];

    Ok(SelectionBounds {
        corners,
        center: center_between(min, max, 0.5),
        min,
        max,
    })
}

/// Arithmetic mean of `points`.
pub fn average(points: &[DVec3]) -> AlignResult<DVec3> {
    if points.is_empty() {
        return Err(AlignError::empty("average"));
    }
    Ok(points.iter().sum::<DVec3>() / points.len() as f64)
}

/// Point at fraction `t` of the way from `a` to `b`.
#[inline]
pub fn center_between(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a + (b - a) * t
}

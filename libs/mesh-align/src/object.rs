//! # Object Alignment
//!
//! New world matrices that line an object up with an edge or a vertex of
//! another object.

use crate::error::{AlignError, AlignResult};
use crate::frame::rotation_difference_matrix4;
use crate::selection::center_between;
use config::constants::EPSILON;
use edit_mesh::{EdgeId, Mesh, Transform, VertexId};
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// Edge of a mesh placed in the world by an object transform.
#[derive(Debug, Clone, Copy)]
pub struct PlacedEdge<'a> {
    pub mesh: &'a Mesh,
    pub transform: &'a Transform,
    pub edge: EdgeId,
}

/// Vertex of a mesh placed in the world by an object transform.
#[derive(Debug, Clone, Copy)]
pub struct PlacedVertex<'a> {
    pub mesh: &'a Mesh,
    pub transform: &'a Transform,
    pub vertex: VertexId,
}

/// Translation applied after rotating onto an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeSnap {
    /// Rotate only
    #[default]
    None,
    /// Move the object edge's midpoint onto the target edge line
    Proximity,
    /// Move the object edge's midpoint onto the target edge's midpoint
    Midpoint,
}

/// Rotates (and optionally snaps) an object so its edge runs parallel to a
/// target edge.
///
/// The object turns about its own location by the smallest angle, picking
/// whichever of the two edge directions is closer to the target's. Returns
/// the object's new transform.
pub fn align_object_to_edge(object: PlacedEdge<'_>, target: PlacedEdge<'_>, snap: EdgeSnap) -> AlignResult<Transform> {
    let [o0, o1] = edge_points(&object)?;
    let [t0, t1] = edge_points(&target)?;

    let mut v_object = object
        .transform
        .transform_vector(o0 - o1)
        .try_normalize()
        .ok_or_else(|| AlignError::degenerate("object edge has zero length"))?;
    let v_target = target
        .transform
        .transform_vector(t0 - t1)
        .try_normalize()
        .ok_or_else(|| AlignError::degenerate("target edge has zero length"))?;
    if v_object.dot(v_target) < 0.0 {
        v_object = -v_object;
    }

    let mid = center_between(o0, o1, 0.5);
    let coords = [
        target.transform.transform_point(t0),
        target.transform.transform_point(t1),
    ];

    let location = object.transform.translation();
    let mut matrix = DMat4::from_translation(location)
        * rotation_difference_matrix4(v_object, v_target)
        * DMat4::from_translation(-location)
        * object.transform.matrix();

    if snap != EdgeSnap::None {
        let mid_world = matrix.transform_point3(mid);
        let (closest, _) = closest_point_on_line(mid_world, coords[0], coords[1]);
        matrix = DMat4::from_translation(closest - mid_world) * matrix;

        if snap == EdgeSnap::Midpoint {
            let mid_target = center_between(coords[0], coords[1], 0.5);
            let mid_object = matrix.transform_point3(mid);
            matrix = DMat4::from_translation(mid_target - mid_object) * matrix;
        }
    }

    Ok(Transform::new(matrix)?)
}

/// Translates an object so its vertex lands on a target vertex.
pub fn align_object_to_vertex(object: PlacedVertex<'_>, target: PlacedVertex<'_>) -> AlignResult<Transform> {
    let from = object
        .transform
        .transform_point(object.mesh.position(object.vertex)?);
    let to = target
        .transform
        .transform_point(target.mesh.position(target.vertex)?);
    Ok(Transform::new(
        DMat4::from_translation(to - from) * object.transform.matrix(),
    )?)
}

/// Projection of `point` onto the infinite line through `a` and `b`.
///
/// Returns the projected point and its line parameter (0 at `a`, 1 at `b`).
/// A zero-length line projects everything onto `a`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_align::closest_point_on_line;
///
/// let (p, t) = closest_point_on_line(DVec3::new(1.0, 5.0, 0.0), DVec3::ZERO, DVec3::X * 2.0);
/// assert_eq!(p, DVec3::X);
/// assert_eq!(t, 0.5);
/// ```
pub fn closest_point_on_line(point: DVec3, a: DVec3, b: DVec3) -> (DVec3, f64) {
    let line = b - a;
    let length_squared = line.length_squared();
    if length_squared < EPSILON * EPSILON {
        return (a, 0.0);
    }
    let t = (point - a).dot(line) / length_squared;
    (a + line * t, t)
}

fn edge_points(placed: &PlacedEdge<'_>) -> AlignResult<[DVec3; 2]> {
    let [a, b] = placed.mesh.edge(placed.edge)?.verts;
    Ok([placed.mesh.position(a)?, placed.mesh.position(b)?])
}

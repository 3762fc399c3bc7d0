//! # Local Frames
//!
//! World-space orthonormal frames built from a single mesh element.
//!
//! A frame maps local X, Y and Z onto the element's tangent, binormal and
//! normal. Elements without enough neighbouring topology fall back to the
//! object's up axis (or its right axis when up is parallel to the element).

#[cfg(test)]
mod tests;

use crate::error::{AlignError, AlignResult};
use config::constants::{is_parallel, EPSILON, PARALLEL_DECIMALS};
use edit_mesh::{EdgeId, FaceId, Mesh, Transform, VertexId};
use glam::{DMat3, DMat4, DQuat, DVec3};

/// Orthonormal tangent / binormal / normal triple in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Maps to local X
    pub tangent: DVec3,
    /// Maps to local Y
    pub binormal: DVec3,
    /// Maps to local Z
    pub normal: DVec3,
}

impl Frame {
    /// Matrix whose rows are tangent, binormal and normal.
    ///
    /// This is the world-to-frame rotation.
    pub fn rows(&self) -> DMat3 {
        self.basis().transpose()
    }

    /// Matrix whose columns are tangent, binormal and normal.
    ///
    /// This is the frame-to-world rotation, i.e. the transposed rows matrix.
    pub fn basis(&self) -> DMat3 {
        DMat3::from_cols(self.tangent, self.binormal, self.normal)
    }

    /// [`Frame::basis`] as a 4x4 rotation.
    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_mat3(self.basis())
    }

    /// True if all three axes are unit length and mutually perpendicular.
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let axes = [self.tangent, self.binormal, self.normal];
        let unit = axes.iter().all(|a| (a.length() - 1.0).abs() <= tolerance);
        let perpendicular = self.tangent.dot(self.binormal).abs() <= tolerance
            && self.binormal.dot(self.normal).abs() <= tolerance
            && self.normal.dot(self.tangent).abs() <= tolerance;
        unit && perpendicular
    }

    /// True if tangent x binormal points along normal.
    pub fn is_right_handed(&self) -> bool {
        self.tangent.cross(self.binormal).dot(self.normal) > 0.0
    }
}

/// Frame at a vertex.
///
/// The normal is the world-space vertex normal. With linked edges the
/// binormal points along the longest linked edge, away from the vertex.
/// Loose vertices (or an edge parallel to the normal) orient the frame
/// from the object's up axis.
///
/// # Example
///
/// ```rust
/// use edit_mesh::{Mesh, Transform};
/// use glam::DVec3;
/// use mesh_align::create_frame_from_vertex;
///
/// let mut mesh = Mesh::new();
/// let v = mesh.add_vertex_with_normal(DVec3::ZERO, DVec3::Z);
/// let frame = create_frame_from_vertex(&mesh, &Transform::IDENTITY, v).unwrap();
/// assert!(frame.is_orthonormal(1e-9));
/// ```
pub fn create_frame_from_vertex(mesh: &Mesh, transform: &Transform, vertex: VertexId) -> AlignResult<Frame> {
    let basis = transform.rotation_scale();
    let normal = unit(basis * mesh.vertex(vertex)?.normal, "vertex normal")?;
    let origin = mesh.position(vertex)?;

    let mut longest: Option<(f64, DVec3)> = None;
    for e in mesh.vertex_edges(vertex)? {
        let edge = mesh.edge(e)?;
        let Some(other) = edge.other_vert(vertex) else {
            continue;
        };
        let direction = mesh.position(other)? - origin;
        let length = direction.length();
        if longest.map_or(true, |(best, _)| length > best) {
            longest = Some((length, direction));
        }
    }

    if let Some((_, direction)) = longest {
        let binormal = (basis * direction).normalize_or_zero();
        if let Some(tangent) = binormal.cross(normal).try_normalize() {
            let binormal = normal.cross(tangent).normalize();
            return Ok(Frame {
                tangent,
                binormal,
                normal,
            });
        }
        log::warn!("longest edge at {vertex:?} is parallel to its normal, using object up");
    }

    let up = reference_up(&basis, normal)?;
    let tangent = unit(normal.cross(up), "vertex tangent")?;
    let binormal = normal.cross(tangent).normalize();
    Ok(Frame {
        tangent,
        binormal,
        normal,
    })
}

/// Frame along an edge.
///
/// The binormal runs from the edge's first to its second vertex. The normal
/// is the averaged normal of the linked faces, made perpendicular to the
/// binormal. Loose edges orient the frame from the object's up axis.
pub fn create_frame_from_edge(mesh: &Mesh, transform: &Transform, edge: EdgeId) -> AlignResult<Frame> {
    let basis = transform.rotation_scale();
    let binormal = unit(basis * mesh.edge_vector(edge)?, "edge direction")?;

    let face_normal: DVec3 = mesh
        .edge_faces(edge)?
        .into_iter()
        .map(|f| mesh.face(f).map(|face| face.normal()))
        .sum::<Result<DVec3, _>>()?;

    if let Some(average) = face_normal.try_normalize() {
        let normal = (basis * average).normalize_or_zero();
        if let Some(tangent) = binormal.cross(normal).try_normalize() {
            let normal = tangent.cross(binormal).normalize();
            return Ok(Frame {
                tangent,
                binormal,
                normal,
            });
        }
        log::warn!("linked faces of {edge:?} do not give a usable normal, using object up");
    }

    let up = reference_up(&basis, binormal)?;
    let tangent = unit(binormal.cross(up), "edge tangent")?;
    let normal = tangent.cross(binormal).normalize();
    Ok(Frame {
        tangent,
        binormal,
        normal,
    })
}

/// Frame on a face.
///
/// The normal is the face normal and the tangent follows the face's
/// tangent edge (see [`Mesh::face_tangent`]).
pub fn create_frame_from_face(mesh: &Mesh, transform: &Transform, face: FaceId) -> AlignResult<Frame> {
    let basis = transform.rotation_scale();
    let normal = unit(basis * mesh.face(face)?.normal(), "face normal")?;
    let tangent = basis * mesh.face_tangent(face)?;
    let tangent = unit(tangent - normal * tangent.dot(normal), "face tangent")?;
    let binormal = normal.cross(tangent);
    Ok(Frame {
        tangent,
        binormal,
        normal,
    })
}

/// Shortest-arc rotation taking the direction of `from` onto `to`.
///
/// Equal directions give the identity. Opposite directions give a half turn
/// about a fixed perpendicular of `from`. Zero-length input gives the
/// identity.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_align::rotation_difference_matrix;
///
/// let m = rotation_difference_matrix(DVec3::X, DVec3::Y);
/// assert!((m * DVec3::X - DVec3::Y).length() < 1e-12);
/// ```
pub fn rotation_difference_matrix(from: DVec3, to: DVec3) -> DMat3 {
    DMat3::from_quat(rotation_difference(from, to))
}

/// [`rotation_difference_matrix`] as a 4x4 matrix.
pub fn rotation_difference_matrix4(from: DVec3, to: DVec3) -> DMat4 {
    DMat4::from_quat(rotation_difference(from, to))
}

/// Shortest-arc rotation as a quaternion.
pub fn rotation_difference(from: DVec3, to: DVec3) -> DQuat {
    match (from.try_normalize(), to.try_normalize()) {
        (Some(a), Some(b)) => DQuat::from_rotation_arc(a, b),
        _ => DQuat::IDENTITY,
    }
}

/// Object up axis in world space, or the object right axis when up is
/// parallel to `direction`.
fn reference_up(basis: &DMat3, direction: DVec3) -> AlignResult<DVec3> {
    let up = unit(*basis * DVec3::Z, "object up axis")?;
    if is_parallel(direction.dot(up), PARALLEL_DECIMALS) {
        return unit(*basis * DVec3::X, "object right axis");
    }
    Ok(up)
}

fn unit(v: DVec3, what: &str) -> AlignResult<DVec3> {
    if v.length_squared() < EPSILON * EPSILON {
        return Err(AlignError::degenerate(format!("{what} has zero length")));
    }
    Ok(v.normalize())
}

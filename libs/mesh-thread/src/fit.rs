//! # Thread Fitting
//!
//! Replaces a cylindrical band of selected faces with a thread.
//!
//! ## Protocol
//!
//! 1. The selected faces must be bounded by exactly two closed loops of
//!    equal length. Anything else cancels before the mesh is touched.
//! 2. Loop centres and the mean loop radius size the canonical thread.
//! 3. The thread is appended, placed between the loops and welded to them.
//! 4. The selected faces are deleted and the new faces get consistent,
//!    outward winding.

use crate::error::{ThreadError, ThreadResult};
use crate::generate::{generate_thread, ThreadSurface};
use crate::profile::ThreadProfile;
use config::constants::{GeometryConfig, EPSILON, MIN_THREAD_SEGMENTS};
use edit_mesh::{boundary_edges, vertex_sequences, EditMeshError, FaceId, Mesh, VertexId};
use glam::{DMat4, DQuat, DVec3};
use mesh_align::{average, rotation_difference};
use serde::{Deserialize, Serialize};

/// Thread parameters plus the tolerances used while stitching.
///
/// `profile.radius` and `profile.segments` are ignored; both come from the
/// selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    pub profile: ThreadProfile,
    #[serde(skip)]
    pub geometry: GeometryConfig,
}

/// Outcome of a successful fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    /// Vertices per loop, used as segments per turn
    pub segments: u32,
    pub radius: f64,
    /// Distance between the two loop centres
    pub height: f64,
    /// Loop vertex the thread start was turned onto (post-weld id)
    pub seam: VertexId,
    /// Thread vertices welded away
    pub merged: usize,
    /// Thread faces (post-weld, post-delete ids)
    pub new_faces: Vec<FaceId>,
}

/// Everything measured on the selection before the mesh is edited.
struct Selection {
    faces: Vec<FaceId>,
    first: Vec<VertexId>,
    second: Vec<VertexId>,
    start: DVec3,
    end: DVec3,
    radius: f64,
    seam: VertexId,
    smooth: bool,
}

/// Fits a thread into the selected faces of `mesh`.
///
/// # Errors
///
/// [`ThreadError::Cancelled`] when the selection does not describe a
/// cylindrical band, [`ThreadError::Config`] or
/// [`ThreadError::InvalidProfile`] for bad options. In all of these cases
/// the mesh is left exactly as it was. Mesh errors during the edit
/// propagate unchanged.
pub fn fit_thread(mesh: &mut Mesh, options: &FitOptions) -> ThreadResult<FitReport> {
    options.geometry.validate()?;
    let selection = inspect_selection(mesh)?;
    let profile = ThreadProfile {
        radius: selection.radius,
        segments: selection.first.len() as u32,
        ..options.profile
    };
    let surface = generate_thread(&profile)?;
    let placement = placement_matrix(
        &surface,
        selection.start,
        selection.end,
        mesh.position(selection.seam)?,
    );
    log::debug!(
        "fit_thread: {} segments, radius {:.6}, height {:.6}, seam {:?}",
        profile.segments,
        profile.radius,
        selection.start.distance(selection.end),
        selection.seam
    );

    mesh.deselect_all();
    let (new_verts, new_faces) = append_surface(mesh, &surface, selection.smooth)?;
    mesh.transform_vertices(&new_verts, &placement)?;

    let mut weld = new_verts;
    weld.extend_from_slice(&selection.first);
    weld.extend_from_slice(&selection.second);
    let report = mesh.merge_by_distance(&weld, options.geometry.merge_distance)?;
    let remap = |faces: &[FaceId], map: &[Option<FaceId>]| -> Vec<FaceId> {
        faces.iter().filter_map(|f| map[f.index()]).collect()
    };
    let doomed = remap(&selection.faces, &report.face_map);
    let new_faces = remap(&new_faces, &report.face_map);

    let deleted = mesh.delete_faces(&doomed)?;
    let new_faces = remap(&new_faces, &deleted);
    mesh.recalc_face_normals(&new_faces)?;
    mesh.normal_update();

    Ok(FitReport {
        segments: profile.segments,
        radius: profile.radius,
        height: selection.start.distance(selection.end),
        seam: report.vertex_map[selection.seam.index()],
        merged: report.merged,
        new_faces,
    })
}

fn inspect_selection(mesh: &Mesh) -> ThreadResult<Selection> {
    let faces = mesh.selected_faces();
    if faces.is_empty() {
        return Err(cancel("no faces selected"));
    }

    let edges = boundary_edges(mesh, &faces)?;
    let sequences = match vertex_sequences(mesh, &edges) {
        Ok(sequences) => sequences,
        Err(EditMeshError::BranchingSequence(v)) => {
            return Err(cancel(format!("selection boundary branches at {v:?}")))
        }
        Err(err) => return Err(err.into()),
    };
    let [first, second] = match <[_; 2]>::try_from(sequences) {
        Ok(pair) => pair,
        Err(found) => {
            return Err(cancel(format!(
                "selection needs exactly two boundary loops, found {}",
                found.len()
            )))
        }
    };
    if !first.cyclic || !second.cyclic {
        return Err(cancel("selection boundary is not closed"));
    }
    if first.len() != second.len() {
        return Err(cancel(format!(
            "boundary loops differ in length: {} and {}",
            first.len(),
            second.len()
        )));
    }
    if first.len() < MIN_THREAD_SEGMENTS as usize {
        return Err(cancel(format!(
            "boundary loops need at least {MIN_THREAD_SEGMENTS} vertices, found {}",
            first.len()
        )));
    }

    let start = average(&mesh.positions(&first.verts)?)?;
    let end = average(&mesh.positions(&second.verts)?)?;
    if start.distance(end) < EPSILON {
        return Err(cancel("boundary loops share their centre"));
    }
    let radius = (start.distance(mesh.position(first.verts[0])?)
        + end.distance(mesh.position(second.verts[0])?))
        / 2.0;

    let seam = seam_vertex(mesh, &faces, &first.verts)
        .ok_or_else(|| cancel("boundary loop is empty"))?;
    let smooth = mesh.face(faces[0])?.smooth;
    Ok(Selection {
        faces,
        first: first.verts,
        second: second.verts,
        start,
        end,
        radius,
        seam,
        smooth,
    })
}

fn cancel(reason: impl Into<String>) -> ThreadError {
    let err = ThreadError::cancelled(reason);
    log::warn!("{err}");
    err
}

/// Loop vertex the thread start is turned onto.
///
/// Taken from the active face when it is part of the selection: of its
/// vertices on `first`, the second one when the two are consecutive in the
/// face, else the first one. Falls back to the first loop vertex; `None`
/// only for an empty loop.
pub fn seam_vertex(mesh: &Mesh, selected: &[FaceId], first: &[VertexId]) -> Option<VertexId> {
    let fallback = first.first().copied();
    let Some(active) = mesh.active_face().filter(|f| selected.contains(f)) else {
        return fallback;
    };
    let Ok(face) = mesh.face(active) else {
        return fallback;
    };

    let verts = face.verts();
    let on_loop: Vec<usize> = (0..verts.len()).filter(|&i| first.contains(&verts[i])).collect();
    match on_loop.as_slice() {
        [] => fallback,
        [only] => Some(verts[*only]),
        [a, b, ..] => {
            if verts[(a + 1) % verts.len()] == verts[*b] {
                Some(verts[*b])
            } else {
                Some(verts[*a])
            }
        }
    }
}

/// World placement of the canonical thread: scale to the loop distance,
/// stand it on `start` pointing at `end`, then turn its first vertex onto
/// `seam`.
pub fn placement_matrix(surface: &ThreadSurface, start: DVec3, end: DVec3, seam: DVec3) -> DMat4 {
    let axis = end - start;
    let scale = DMat4::from_scale(DVec3::new(1.0, 1.0, axis.length() / surface.height));
    let stand = rotation_difference(DVec3::Z, axis);
    let first = surface.band.points.first().copied().unwrap_or(DVec3::X);
    let twist = twist_about(axis, stand * first, seam - start);
    DMat4::from_translation(start) * DMat4::from_quat(twist * stand) * scale
}

/// Rotation about `axis` taking the direction of `from` onto `to`, both
/// measured perpendicular to the axis.
fn twist_about(axis: DVec3, from: DVec3, to: DVec3) -> DQuat {
    let Some(axis) = axis.try_normalize() else {
        return DQuat::IDENTITY;
    };
    let a = from.reject_from_normalized(axis);
    let b = to.reject_from_normalized(axis);
    if a.length_squared() < EPSILON || b.length_squared() < EPSILON {
        return DQuat::IDENTITY;
    }
    let angle = axis.dot(a.cross(b)).atan2(a.dot(b));
    DQuat::from_axis_angle(axis, angle)
}

/// Adds every part of the surface as fresh vertices and faces.
fn append_surface(
    mesh: &mut Mesh,
    surface: &ThreadSurface,
    smooth: bool,
) -> ThreadResult<(Vec<VertexId>, Vec<FaceId>)> {
    let mut verts = Vec::with_capacity(surface.point_count());
    let mut faces = Vec::with_capacity(surface.face_count());
    for part in surface.parts() {
        let ids: Vec<VertexId> = part.points.iter().map(|&p| mesh.add_vertex(p)).collect();
        for face in &part.faces {
            let loop_ids: Vec<VertexId> = face.iter().map(|&i| ids[i]).collect();
            let id = mesh.add_face(&loop_ids)?;
            mesh.set_face_smooth(id, smooth)?;
            faces.push(id);
        }
        if smooth {
            for &[a, b] in &part.sharp_edges {
                if let Some(edge) = mesh.find_edge(ids[a], ids[b]) {
                    mesh.set_edge_smooth(edge, false)?;
                }
            }
        }
        verts.extend(ids);
    }
    if smooth {
        mesh.set_auto_smooth(true);
    }
    Ok((verts, faces))
}

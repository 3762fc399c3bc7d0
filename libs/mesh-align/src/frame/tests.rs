//! Tests for frame construction and rotation differences.

use super::*;
use approx::assert_relative_eq;
use edit_mesh::Mesh;
use glam::{DMat4, DQuat, DVec3};

const TOL: f64 = 1e-9;

fn assert_valid(frame: &Frame) {
    assert!(frame.is_orthonormal(TOL), "not orthonormal: {frame:?}");
    assert!(frame.is_right_handed(), "left handed: {frame:?}");
}

/// Quad in the XY plane, 2 wide and 1 tall, facing +Z.
fn plate() -> (Mesh, [VertexId; 4], FaceId) {
    let mut mesh = Mesh::new();
    let v = [
        mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0)),
        mesh.add_vertex(DVec3::new(2.0, 0.0, 0.0)),
        mesh.add_vertex(DVec3::new(2.0, 1.0, 0.0)),
        mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0)),
    ];
    let f = mesh.add_face(&v).unwrap();
    mesh.normal_update();
    (mesh, v, f)
}

// =============================================================================
// VERTEX FRAMES
// =============================================================================

#[test]
fn test_loose_vertex_falls_back_to_right_axis() {
    let mut mesh = Mesh::new();
    let v = mesh.add_vertex_with_normal(DVec3::new(3.0, 1.0, 0.0), DVec3::Z);
    let frame = create_frame_from_vertex(&mesh, &Transform::IDENTITY, v).unwrap();
    assert_valid(&frame);
    assert_relative_eq!(frame.normal, DVec3::Z, epsilon = TOL);
    // tangent = normal x right
    assert_relative_eq!(frame.tangent, DVec3::Y, epsilon = TOL);
    assert_relative_eq!(frame.binormal, -DVec3::X, epsilon = TOL);
}

#[test]
fn test_loose_vertex_uses_object_up() {
    let mut mesh = Mesh::new();
    let v = mesh.add_vertex_with_normal(DVec3::ZERO, DVec3::X);
    let frame = create_frame_from_vertex(&mesh, &Transform::IDENTITY, v).unwrap();
    assert_valid(&frame);
    assert_relative_eq!(frame.tangent, DVec3::X.cross(DVec3::Z), epsilon = TOL);
}

#[test]
fn test_vertex_binormal_follows_longest_edge() {
    let (mesh, v, _) = plate();
    let frame = create_frame_from_vertex(&mesh, &Transform::IDENTITY, v[0]).unwrap();
    assert_valid(&frame);
    assert_relative_eq!(frame.normal, DVec3::Z, epsilon = TOL);
    assert_relative_eq!(frame.binormal, DVec3::X, epsilon = TOL);
}

#[test]
fn test_vertex_frame_is_world_space() {
    let (mesh, v, _) = plate();
    let rotation = DQuat::from_rotation_x(std::f64::consts::FRAC_PI_2);
    let transform = Transform::new(DMat4::from_rotation_translation(rotation, DVec3::splat(4.0))).unwrap();
    let frame = create_frame_from_vertex(&mesh, &transform, v[0]).unwrap();
    assert_valid(&frame);
    assert_relative_eq!(frame.normal, rotation * DVec3::Z, epsilon = TOL);
}

// =============================================================================
// EDGE FRAMES
// =============================================================================

#[test]
fn test_edge_frame_uses_face_normal() {
    let (mesh, v, _) = plate();
    let e = mesh.find_edge(v[0], v[1]).unwrap();
    let frame = create_frame_from_edge(&mesh, &Transform::IDENTITY, e).unwrap();
    assert_valid(&frame);
    assert_relative_eq!(frame.binormal, DVec3::X, epsilon = TOL);
    assert_relative_eq!(frame.normal, DVec3::Z, epsilon = TOL);
}

#[test]
fn test_loose_edge_along_up_uses_right() {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(DVec3::ZERO);
    let b = mesh.add_vertex(DVec3::new(0.0, 0.0, 5.0));
    let e = mesh.add_edge(a, b).unwrap();
    let frame = create_frame_from_edge(&mesh, &Transform::IDENTITY, e).unwrap();
    assert_valid(&frame);
    assert_relative_eq!(frame.binormal, DVec3::Z, epsilon = TOL);
    assert_relative_eq!(frame.tangent, DVec3::Z.cross(DVec3::X), epsilon = TOL);
}

#[test]
fn test_zero_length_edge_is_degenerate() {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(DVec3::ONE);
    let b = mesh.add_vertex(DVec3::ONE);
    let e = mesh.add_edge(a, b).unwrap();
    let err = create_frame_from_edge(&mesh, &Transform::IDENTITY, e).unwrap_err();
    assert!(matches!(err, AlignError::DegenerateGeometry { .. }));
}

// =============================================================================
// FACE FRAMES
// =============================================================================

#[test]
fn test_face_frame() {
    let (mesh, _, f) = plate();
    let frame = create_frame_from_face(&mesh, &Transform::IDENTITY, f).unwrap();
    assert_valid(&frame);
    assert_relative_eq!(frame.normal, DVec3::Z, epsilon = TOL);
    assert_relative_eq!(frame.tangent, DVec3::X, epsilon = TOL);
}

#[test]
fn test_rows_and_basis_are_transposes() {
    let (mesh, _, f) = plate();
    let frame = create_frame_from_face(&mesh, &Transform::IDENTITY, f).unwrap();
    assert_eq!(frame.rows().transpose(), frame.basis());
    assert_relative_eq!(frame.rows() * frame.normal, DVec3::Z, epsilon = TOL);
    assert_relative_eq!(frame.basis() * DVec3::X, frame.tangent, epsilon = TOL);
}

#[test]
fn test_invalid_ids_propagate() {
    let (mesh, _, _) = plate();
    let err = create_frame_from_face(&mesh, &Transform::IDENTITY, FaceId(4)).unwrap_err();
    assert_eq!(err, AlignError::Mesh(edit_mesh::EditMeshError::InvalidFace(FaceId(4))));
}

// =============================================================================
// ROTATION DIFFERENCE
// =============================================================================

#[test]
fn test_rotation_difference_identity() {
    for v in [DVec3::X, DVec3::new(1.0, 2.0, 3.0).normalize(), -DVec3::Z] {
        let m = rotation_difference_matrix(v, v);
        assert_relative_eq!(m, DMat3::IDENTITY, epsilon = TOL);
    }
}

#[test]
fn test_rotation_difference_antiparallel() {
    for v in [DVec3::X, DVec3::Z, DVec3::new(-1.0, 4.0, 0.5).normalize()] {
        let m = rotation_difference_matrix(v, -v);
        assert_relative_eq!(m * v, -v, epsilon = TOL);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = TOL);
        assert_relative_eq!(m * m.transpose(), DMat3::IDENTITY, epsilon = TOL);
    }
}

#[test]
fn test_rotation_difference_general() {
    let a = DVec3::new(1.0, 1.0, 0.0);
    let b = DVec3::new(0.0, 0.0, 3.0);
    let m = rotation_difference_matrix(a, b);
    assert_relative_eq!(m * a.normalize(), DVec3::Z, epsilon = TOL);
    // axis of the shortest arc is left alone
    let axis = a.cross(b).normalize();
    assert_relative_eq!(m * axis, axis, epsilon = TOL);

    let m4 = rotation_difference_matrix4(a, b);
    assert_relative_eq!(m4.transform_vector3(a.normalize()), DVec3::Z, epsilon = TOL);
}

#[test]
fn test_rotation_difference_zero_input() {
    assert_eq!(rotation_difference_matrix(DVec3::ZERO, DVec3::X), DMat3::IDENTITY);
}

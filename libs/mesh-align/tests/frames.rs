use approx::assert_relative_eq;
use edit_mesh::{Mesh, Transform, VertexId};
use glam::{DMat4, DQuat, DVec3};
use mesh_align::{
    bounding_box_and_center, create_frame_from_edge, create_frame_from_face,
    create_frame_from_vertex, rotation_difference_matrix, Frame,
};

/// Closed box spanning `min`..`max`, wound outward.
fn cuboid(min: DVec3, max: DVec3) -> Mesh {
    let mut mesh = Mesh::new();
    let v: Vec<VertexId> = (0..8)
        .map(|i| {
            mesh.add_vertex(DVec3::new(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            ))
        })
        .collect();
    for l in [
        [0, 2, 3, 1],
        [4, 5, 7, 6],
        [0, 1, 5, 4],
        [2, 6, 7, 3],
        [0, 4, 6, 2],
        [1, 3, 7, 5],
    ] {
        mesh.add_face(&l.map(|i| v[i])).unwrap();
    }
    mesh.normal_update();
    mesh
}

fn check(frame: Frame) {
    assert!(frame.is_orthonormal(1e-9));
    assert!(frame.is_right_handed());
    assert_relative_eq!(frame.basis().determinant(), 1.0, epsilon = 1e-9);
}

#[test]
fn every_element_of_a_rotated_box_gives_a_valid_frame() {
    let mesh = cuboid(DVec3::new(-1.0, -0.5, 0.0), DVec3::new(2.0, 0.5, 0.25));
    let transform = Transform::new(DMat4::from_rotation_translation(
        DQuat::from_euler(glam::EulerRot::XYZ, 0.3, -1.1, 2.0),
        DVec3::new(4.0, -2.0, 7.0),
    ))
    .unwrap();

    for v in mesh.vertex_ids() {
        check(create_frame_from_vertex(&mesh, &transform, v).unwrap());
    }
    for e in mesh.edge_ids() {
        check(create_frame_from_edge(&mesh, &transform, e).unwrap());
    }
    for f in mesh.face_ids() {
        let frame = create_frame_from_face(&mesh, &transform, f).unwrap();
        check(frame);
        let expected = transform.transform_vector(mesh.face(f).unwrap().normal());
        assert_relative_eq!(frame.normal, expected, epsilon = 1e-9);
    }
}

#[test]
fn face_frame_maps_local_z_onto_face_normal() {
    let mesh = cuboid(DVec3::ZERO, DVec3::ONE);
    for f in mesh.face_ids() {
        let frame = create_frame_from_face(&mesh, &Transform::IDENTITY, f).unwrap();
        let normal = mesh.face(f).unwrap().normal();
        assert_relative_eq!(frame.basis() * DVec3::Z, normal, epsilon = 1e-12);
        let undo = rotation_difference_matrix(normal, DVec3::Z);
        assert_relative_eq!(undo * normal, DVec3::Z, epsilon = 1e-12);
    }
}

#[test]
fn scaled_height_round_trips_through_bounds() {
    let mut mesh = cuboid(DVec3::ZERO, DVec3::new(1.0, 1.0, 3.0));
    let all: Vec<VertexId> = mesh.vertex_ids().collect();
    let before = bounding_box_and_center(&mesh.positions(&all).unwrap()).unwrap();

    let k = 2.5;
    mesh.scale(&all, DVec3::new(1.0, 1.0, k)).unwrap();
    let after = bounding_box_and_center(&mesh.positions(&all).unwrap()).unwrap();

    let height = |b: &mesh_align::SelectionBounds| b.max.z - b.min.z;
    assert_relative_eq!(height(&after), height(&before) * k, epsilon = 1e-12);
}

use approx::assert_relative_eq;
use edit_mesh::{boundary_edges, FaceId, Mesh, VertexId};
use glam::DVec3;
use config::constants::{ConfigError, GeometryConfig};
use mesh_thread::{fit_thread, FitOptions, ThreadError, ThreadProfile};
use std::f64::consts::TAU;

struct Cylinder {
    mesh: Mesh,
    middle: Vec<VertexId>,
    top: Vec<VertexId>,
    selected: Vec<FaceId>,
}

/// Tube wall with rings at z = -1, 0 and 2; the upper band is selected.
fn cylinder(segments: usize, smooth: bool) -> Cylinder {
    let mut mesh = Mesh::new();
    let mut ring = |z: f64| -> Vec<VertexId> {
        (0..segments)
            .map(|k| {
                let angle = TAU * k as f64 / segments as f64;
                mesh.add_vertex(DVec3::new(angle.cos(), angle.sin(), z))
            })
            .collect()
    };
    let bottom = ring(-1.0);
    let middle = ring(0.0);
    let top = ring(2.0);

    let band = |mesh: &mut Mesh, lower: &[VertexId], upper: &[VertexId]| -> Vec<FaceId> {
        (0..segments)
            .map(|k| {
                let n = (k + 1) % segments;
                let f = mesh.add_face(&[lower[k], lower[n], upper[n], upper[k]]).unwrap();
                mesh.set_face_smooth(f, smooth).unwrap();
                f
            })
            .collect()
    };
    band(&mut mesh, &bottom, &middle);
    let selected = band(&mut mesh, &middle, &top);
    for &f in &selected {
        mesh.select_face(f, true).unwrap();
    }
    mesh.normal_update();

    Cylinder {
        mesh,
        middle,
        top,
        selected,
    }
}

fn options(loops: u32) -> FitOptions {
    FitOptions {
        profile: ThreadProfile {
            loops,
            ..ThreadProfile::default()
        },
        ..FitOptions::default()
    }
}

#[test]
fn thread_replaces_selected_band() {
    let Cylinder { mut mesh, .. } = cylinder(12, false);
    let report = fit_thread(&mut mesh, &options(3)).unwrap();

    assert_eq!(report.segments, 12);
    assert_relative_eq!(report.radius, 1.0, epsilon = 1e-9);
    assert_relative_eq!(report.height, 2.0, epsilon = 1e-9);
    assert!(report.merged > 0);
    assert!(mesh.validate());

    // only the outer rings stay open: the thread is welded all round
    let all: Vec<FaceId> = mesh.face_ids().collect();
    assert_eq!(boundary_edges(&mesh, &all).unwrap().len(), 24);
    assert_eq!(mesh.face_count(), 12 + report.new_faces.len());
    assert!(mesh.selected_faces().is_empty());

    let (min, max) = mesh.bounding_box().unwrap();
    assert_relative_eq!(min.z, -1.0, epsilon = 1e-9);
    assert_relative_eq!(max.z, 2.0, epsilon = 1e-9);
}

#[test]
fn new_faces_point_away_from_the_axis() {
    let Cylinder { mut mesh, .. } = cylinder(10, false);
    let report = fit_thread(&mut mesh, &options(2)).unwrap();
    for &f in &report.new_faces {
        let center = mesh.face_center(f).unwrap();
        let radial = DVec3::new(center.x, center.y, 0.0);
        assert!(
            mesh.face(f).unwrap().normal().dot(radial) > 0.0,
            "face {f:?} points inward"
        );
    }
}

#[test]
fn smooth_selection_gives_smooth_thread_with_sharp_helix() {
    let Cylinder { mut mesh, .. } = cylinder(8, true);
    let report = fit_thread(&mut mesh, &options(1)).unwrap();

    assert!(mesh.auto_smooth());
    assert!(report
        .new_faces
        .iter()
        .all(|&f| mesh.face(f).unwrap().smooth));
    assert!(mesh.edges().iter().any(|e| !e.smooth));
}

#[test]
fn flat_selection_marks_no_sharp_edges() {
    let Cylinder { mut mesh, .. } = cylinder(8, false);
    fit_thread(&mut mesh, &options(1)).unwrap();
    assert!(!mesh.auto_smooth());
    assert!(mesh.edges().iter().all(|e| e.smooth));
}

#[test]
fn active_face_picks_the_seam() {
    let Cylinder {
        mut mesh,
        middle,
        selected,
        ..
    } = cylinder(8, false);
    mesh.set_active_face(Some(selected[0])).unwrap();

    let report = fit_thread(&mut mesh, &options(2)).unwrap();
    assert_eq!(report.seam, middle[1]);
    // the seam keeps its place; the thread started there
    assert_relative_eq!(
        mesh.position(report.seam).unwrap(),
        DVec3::new((TAU / 8.0).cos(), (TAU / 8.0).sin(), 0.0),
        epsilon = 1e-12
    );
}

#[test]
fn uneven_loops_cancel_without_touching_the_mesh() {
    let Cylinder {
        mut mesh,
        top,
        selected,
        ..
    } = cylinder(8, false);
    // an extra face on the top loop splits it off the selection boundary
    let apex = mesh.add_vertex(DVec3::new(0.0, 0.0, 3.0));
    let cap = mesh.add_face(&[top[0], top[1], apex]).unwrap();
    mesh.select_face(cap, true).unwrap();
    let before = mesh.clone();

    let err = fit_thread(&mut mesh, &options(2)).unwrap_err();
    assert!(err.is_cancellation(), "{err}");
    assert_eq!(mesh, before);
    assert_eq!(mesh.selected_faces().len(), selected.len() + 1);
}

#[test]
fn bad_weld_distance_fails_before_any_edit() {
    let Cylinder { mut mesh, .. } = cylinder(8, false);
    let before = mesh.clone();

    for distance in [0.0, -1e-5, f64::NAN] {
        let options = FitOptions {
            geometry: GeometryConfig {
                merge_distance: distance,
            },
            ..options(2)
        };
        let err = fit_thread(&mut mesh, &options).unwrap_err();
        assert!(
            matches!(err, ThreadError::Config(ConfigError::InvalidMergeDistance(_))),
            "{err}"
        );
        assert_eq!(mesh, before);
    }
}

#[test]
fn oversized_profile_fails_before_any_edit() {
    let Cylinder { mut mesh, .. } = cylinder(8, false);
    let before = mesh.clone();

    let err = fit_thread(&mut mesh, &options(u32::MAX)).unwrap_err();
    assert!(matches!(err, ThreadError::InvalidProfile { .. }), "{err}");
    assert_eq!(mesh, before);
}

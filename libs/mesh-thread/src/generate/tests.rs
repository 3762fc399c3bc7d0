use super::*;
use approx::assert_relative_eq;

fn small() -> ThreadProfile {
    ThreadProfile {
        segments: 8,
        loops: 2,
        ..ThreadProfile::default()
    }
}

fn z_extent(surface: &ThreadSurface) -> (f64, f64) {
    surface
        .parts()
        .iter()
        .flat_map(|p| p.points.iter())
        .fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.z), hi.max(p.z)))
}

#[test]
fn test_band_point_count() {
    for (segments, loops) in [(5, 1), (8, 2), (32, 4)] {
        let profile = ThreadProfile {
            segments,
            loops,
            ..ThreadProfile::default()
        };
        let surface = generate_thread(&profile).unwrap();
        let cs = profile.cross_section().len();
        assert_eq!(surface.band.points.len(), (segments * loops + 1) as usize * cs);
        assert_eq!(surface.band.faces.len(), (segments * loops) as usize * (cs - 1));
    }
}

#[test]
fn test_height_and_extent() {
    let profile = small();
    let surface = generate_thread(&profile).unwrap();
    assert!(surface.height > 0.0);
    assert_relative_eq!(surface.height, 3.0 * profile.pitch(), epsilon = 1e-12);

    let (lo, hi) = z_extent(&surface);
    assert_eq!(lo, 0.0);
    assert_relative_eq!(hi, surface.height, epsilon = 1e-12);
}

#[test]
fn test_zero_depth_is_plain_cylinder() {
    let profile = ThreadProfile {
        depth: 0.0,
        ..small()
    };
    let surface = generate_thread(&profile).unwrap();
    for part in surface.parts() {
        for p in &part.points {
            assert_relative_eq!(p.truncate().length(), profile.radius, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_crest_fades_in_and_out() {
    let profile = small();
    let surface = generate_thread(&profile).unwrap();
    let cs = profile.cross_section().len();
    let radial = |ring: usize, j: usize| surface.band.points[ring * cs + j].truncate().length();

    let rings = (profile.segments * profile.loops) as usize;
    assert_relative_eq!(radial(0, 1), profile.radius, epsilon = 1e-12);
    assert_relative_eq!(radial(rings, 1), profile.radius, epsilon = 1e-12);
    assert_relative_eq!(
        radial(rings / 2, 1),
        profile.radius + profile.crest_offset(),
        epsilon = 1e-12
    );
}

#[test]
fn test_generation_is_deterministic() {
    let profile = ThreadProfile::default();
    assert_eq!(generate_thread(&profile).unwrap(), generate_thread(&profile).unwrap());
}

#[test]
fn test_minimal_cross_section() {
    let profile = ThreadProfile {
        h2: 0.0,
        h4: 0.0,
        ..small()
    };
    let surface = generate_thread(&profile).unwrap();
    assert_eq!(surface.band.points.len(), 17 * 3);
    // seam polygons still pick up the single crest point of the column
    assert_eq!(surface.bottom.faces.last().unwrap().len(), 5);
    assert_eq!(surface.top.faces[0].len(), 5);
}

#[test]
fn test_face_indices_are_valid_loops() {
    let surface = generate_thread(&small()).unwrap();
    for part in surface.parts() {
        for face in &part.faces {
            assert!(face.len() >= 3);
            assert!(face.iter().all(|&i| i < part.points.len()));
            let mut sorted = face.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), face.len(), "repeated index in {face:?}");
        }
        for edge in &part.sharp_edges {
            assert!(edge.iter().all(|&i| i < part.points.len()));
        }
    }
}

#[test]
fn test_caps_have_one_triangle_and_one_seam_polygon() {
    let profile = small();
    let surface = generate_thread(&profile).unwrap();
    let cs = profile.cross_section().len();
    let s = profile.segments as usize;

    for cap in [&surface.bottom, &surface.top] {
        assert_eq!(cap.faces.len(), s);
        assert_eq!(cap.faces.iter().filter(|f| f.len() == 3).count(), 1);
        assert_eq!(cap.faces.iter().filter(|f| f.len() == 4).count(), s - 2);
        assert_eq!(cap.faces.iter().filter(|f| f.len() == 4 + cs - 2).count(), 1);
        assert_eq!(cap.sharp_edges.len(), s);
    }
}

#[test]
fn test_caps_reuse_band_points_exactly() {
    let profile = small();
    let surface = generate_thread(&profile).unwrap();
    let band = &surface.band.points;
    let cs = profile.cross_section().len();
    let s = profile.segments as usize;
    let rings = s * profile.loops as usize;

    let bottom = &surface.bottom.points;
    assert_eq!(bottom[0], band[0]);
    for k in 1..=s {
        assert_eq!(bottom[s + k - 1], band[k * cs]);
    }

    let top = &surface.top.points;
    for m in 0..s {
        assert_eq!(top[m], band[(rings - s + m) * cs + cs - 1]);
    }
    assert_eq!(top[s], band[rings * cs + cs - 1]);
}

#[test]
fn test_faces_point_outward() {
    let surface = generate_thread(&small()).unwrap();
    for part in surface.parts() {
        for face in &part.faces {
            let points: Vec<DVec3> = face.iter().map(|&i| part.points[i]).collect();
            let center = points.iter().sum::<DVec3>() / points.len() as f64;
            let normal = (0..points.len()).fold(DVec3::ZERO, |n, i| {
                n + points[i].cross(points[(i + 1) % points.len()])
            });
            let radial = DVec3::new(center.x, center.y, 0.0);
            assert!(normal.dot(radial) > 0.0, "inward face {face:?}");
        }
    }
}

#[test]
fn test_axial_scale_matches_height() {
    let mut surface = generate_thread(&small()).unwrap();
    let k = 0.8;
    for part in [&mut surface.band, &mut surface.bottom, &mut surface.top] {
        for p in &mut part.points {
            *p *= DVec3::new(1.0, 1.0, k);
        }
    }
    let (lo, hi) = z_extent(&surface);
    assert_relative_eq!(hi - lo, surface.height * k, epsilon = 1e-12);
}

#[test]
fn test_invalid_profile_is_rejected() {
    let profile = ThreadProfile {
        segments: 3,
        ..ThreadProfile::default()
    };
    assert!(generate_thread(&profile).is_err());
}

#[test]
fn test_ring_overflow_is_rejected() {
    let profile = ThreadProfile {
        segments: 1 << 20,
        loops: 1 << 20,
        ..ThreadProfile::default()
    };
    assert!(matches!(
        generate_thread(&profile),
        Err(crate::ThreadError::InvalidProfile { .. })
    ));
}

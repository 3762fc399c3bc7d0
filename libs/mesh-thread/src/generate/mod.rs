//! # Thread Surface Generator
//!
//! Builds the canonical thread around the +Z axis, starting at the origin.
//!
//! ## Layout
//!
//! ```text
//! z = H      ┌──────── top cap (last turn → flat ring)
//!            │╲╲╲╲╲╲╲╲
//!            │╲╲╲╲╲╲╲╲ band (helical strip, `loops` turns)
//!            │╲╲╲╲╲╲╲╲
//! z = 0      └──────── bottom cap (flat ring → first turn)
//! ```
//!
//! The band sweeps the cross-section along the helix: `segments × loops`
//! steps plus a closing ring. Consecutive turns touch (the top of ring
//! `i` lies on the bottom of ring `i + segments`), the caller welds them.
//!
//! Each cap is a strip on the cylinder wall between a flat ring and the
//! exposed helix edge. Where the strip reaches a full pitch in height it is
//! closed by one polygon that runs along the band's first (or last)
//! cross-section column, so the caps share every band vertex they touch.
//! Cap points on the band are copied from the band, never recomputed, so
//! welds are exact.

use crate::error::ThreadResult;
use crate::profile::ThreadProfile;
use glam::DVec3;
use std::f64::consts::TAU;

/// One piece of generated geometry with its own point indexing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfacePart {
    pub points: Vec<DVec3>,
    /// Vertex loops indexing `points`, wound outward
    pub faces: Vec<Vec<usize>>,
    /// Point index pairs to mark sharp on smooth geometry
    pub sharp_edges: Vec<[usize; 2]>,
}

impl SurfacePart {
    fn with_capacity(points: usize, faces: usize) -> Self {
        Self {
            points: Vec::with_capacity(points),
            faces: Vec::with_capacity(faces),
            sharp_edges: Vec::new(),
        }
    }
}

/// Canonical thread surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadSurface {
    pub band: SurfacePart,
    pub bottom: SurfacePart,
    pub top: SurfacePart,
    /// Natural height, `(loops + 1) × pitch`
    pub height: f64,
}

impl ThreadSurface {
    /// Band, bottom cap and top cap in that order.
    pub fn parts(&self) -> [&SurfacePart; 3] {
        [&self.band, &self.bottom, &self.top]
    }

    /// Points over all parts, counting shared points once per part.
    pub fn point_count(&self) -> usize {
        self.parts().iter().map(|p| p.points.len()).sum()
    }

    pub fn face_count(&self) -> usize {
        self.parts().iter().map(|p| p.faces.len()).sum()
    }
}

/// Generates the canonical thread for `profile`.
///
/// # Errors
///
/// Returns [`crate::ThreadError::InvalidProfile`] when a parameter is out
/// of range. Nothing is generated in that case.
///
/// # Example
///
/// ```rust
/// use mesh_thread::{generate_thread, ThreadProfile};
///
/// let profile = ThreadProfile { segments: 8, loops: 2, ..ThreadProfile::default() };
/// let surface = generate_thread(&profile).unwrap();
/// let section = profile.cross_section().len();
/// assert_eq!(surface.band.points.len(), (8 * 2 + 1) * section);
/// ```
pub fn generate_thread(profile: &ThreadProfile) -> ThreadResult<ThreadSurface> {
    profile.validate()?;

    let band = build_band(profile);
    let bottom = build_bottom_cap(profile, &band);
    let top = build_top_cap(profile, &band);
    let surface = ThreadSurface {
        band,
        bottom,
        top,
        height: profile.height(),
    };

    log::debug!(
        "generate_thread: {} segments x {} loops, {} points, {} faces, height {}",
        profile.segments,
        profile.loops,
        surface.point_count(),
        surface.face_count(),
        surface.height
    );
    Ok(surface)
}

/// Angle of ring `ring`. Taken modulo one turn so rings a turn apart get
/// bit-identical directions.
fn ring_angle(ring: u32, segments: u32) -> f64 {
    TAU * (ring % segments) as f64 / segments as f64
}

fn build_band(profile: &ThreadProfile) -> SurfacePart {
    let section = profile.cross_section();
    let cs = section.len();
    let s = profile.segments;
    let rings = s * profile.loops;
    let pitch = profile.pitch();
    let crest = profile.crest_offset();

    let mut band = SurfacePart::with_capacity((rings as usize + 1) * cs, rings as usize * (cs - 1));

    for i in 0..=rings {
        let angle = ring_angle(i, s);
        let (sin, cos) = angle.sin_cos();
        let rise = pitch * i as f64 / s as f64;
        let fade = profile.fade_factor(i, rings);
        for point in &section {
            let radius = if point.crest {
                profile.radius + crest * fade
            } else {
                profile.radius
            };
            band.points.push(DVec3::new(radius * cos, radius * sin, rise + point.z));
        }
    }

    for i in 0..rings as usize {
        for j in 0..cs - 1 {
            band.faces.push(vec![
                i * cs + j,
                (i + 1) * cs + j,
                (i + 1) * cs + j + 1,
                i * cs + j + 1,
            ]);
        }
        for j in 0..cs {
            band.sharp_edges.push([i * cs + j, (i + 1) * cs + j]);
        }
    }

    band
}

/// Strip from the flat ring at z = 0 up to the lower edge of the first turn.
///
/// Point layout: flat ring `0..s`, lower edge (rings `1..=s`) at `s..2s`,
/// then the inner points of ring 0's cross-section column.
fn build_bottom_cap(profile: &ThreadProfile, band: &SurfacePart) -> SurfacePart {
    let s = profile.segments as usize;
    let cs = band.points.len() / (s * profile.loops as usize + 1);
    let mut cap = SurfacePart::with_capacity(2 * s + cs - 2, s);

    let flat = |k: usize| k;
    let lower = |k: usize| if k == 0 { flat(0) } else { s + k - 1 };
    let column = |j: usize| 2 * s + j - 1;

    cap.points.push(band.points[0]);
    for k in 1..s {
        let (sin, cos) = ring_angle(k as u32, s as u32).sin_cos();
        cap.points.push(DVec3::new(profile.radius * cos, profile.radius * sin, 0.0));
    }
    for k in 1..=s {
        cap.points.push(band.points[k * cs]);
    }
    cap.points.extend_from_slice(&band.points[1..cs - 1]);

    cap.faces.push(vec![flat(0), flat(1), lower(1)]);
    for k in 1..s - 1 {
        cap.faces.push(vec![flat(k), flat(k + 1), lower(k + 1), lower(k)]);
    }
    let mut seam = vec![flat(s - 1), flat(0)];
    seam.extend((1..cs - 1).map(column));
    seam.extend([lower(s), lower(s - 1)]);
    cap.faces.push(seam);

    cap.sharp_edges = (0..s).map(|k| [lower(k), lower(k + 1)]).collect();
    cap
}

/// Strip from the upper edge of the last turn up to the flat ring at the
/// natural height.
///
/// Point layout: upper edge (rings `N - s..N`) at `0..s`, flat ring at
/// `s..2s`, then the inner points of ring N's cross-section column.
fn build_top_cap(profile: &ThreadProfile, band: &SurfacePart) -> SurfacePart {
    let s = profile.segments as usize;
    let rings = s * profile.loops as usize;
    let cs = band.points.len() / (rings + 1);
    let height = profile.height();
    let mut cap = SurfacePart::with_capacity(2 * s + cs - 2, s);

    let upper = |m: usize| m;
    let flat = |m: usize| s + m;
    let column = |j: usize| 2 * s + j - 1;
    let last = |ring: usize| band.points[ring * cs + cs - 1];

    for m in 0..s {
        cap.points.push(last(rings - s + m));
    }
    cap.points.push(last(rings));
    for m in 1..s {
        let (sin, cos) = ring_angle(m as u32, s as u32).sin_cos();
        cap.points.push(DVec3::new(profile.radius * cos, profile.radius * sin, height));
    }
    cap.points.extend_from_slice(&band.points[rings * cs + 1..rings * cs + cs - 1]);

    let mut seam = vec![upper(0), upper(1), flat(1), flat(0)];
    seam.extend((1..cs - 1).rev().map(column));
    cap.faces.push(seam);
    for m in 1..s - 1 {
        cap.faces.push(vec![upper(m), upper(m + 1), flat(m + 1), flat(m)]);
    }
    cap.faces.push(vec![upper(s - 1), flat(0), flat(s - 1)]);

    cap.sharp_edges = (0..s - 1).map(|m| [upper(m), upper(m + 1)]).collect();
    cap.sharp_edges.push([upper(s - 1), flat(0)]);
    cap
}

#[cfg(test)]
mod tests;

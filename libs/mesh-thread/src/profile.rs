//! # Thread Profile
//!
//! Parameters of a screw thread and its cross-section.
//!
//! ## Cross-section
//!
//! In the (radial, axial) plane, with pitch `p = h1 + h2 + h3 + h4` and
//! crest offset `d = radius * depth`:
//!
//! ```text
//! (r, 0) → (r + d, h1) → (r + d, h1 + h2) → (r, h1 + h2 + h3) → (r, p)
//! ```
//!
//! The crest-top vertex is dropped when `h2` is zero and the gap vertex
//! when `h4` is zero.

use crate::error::{ThreadError, ThreadResult};
use config::constants::{
    DEFAULT_THREAD_DEPTH, DEFAULT_THREAD_FADE, DEFAULT_THREAD_H1, DEFAULT_THREAD_H2,
    DEFAULT_THREAD_H3, DEFAULT_THREAD_H4, DEFAULT_THREAD_LOOPS, DEFAULT_THREAD_RADIUS,
    DEFAULT_THREAD_SEGMENTS, MAX_THREAD_FADE, MIN_THREAD_FADE, MIN_THREAD_LOOPS,
    MIN_THREAD_SEGMENTS,
};
use serde::{Deserialize, Serialize};

/// Screw thread parameters.
///
/// # Example
///
/// ```rust
/// use mesh_thread::ThreadProfile;
///
/// let profile = ThreadProfile { loops: 2, ..ThreadProfile::default() };
/// profile.validate().unwrap();
/// assert!(profile.height() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadProfile {
    /// Minor radius (the unthreaded cylinder)
    pub radius: f64,
    /// Segments per turn
    pub segments: u32,
    /// Number of turns
    pub loops: u32,
    /// Crest height as a fraction of the radius, 0..=1
    pub depth: f64,
    /// Fraction of a turn over which the crest fades in and out
    pub fade: f64,
    /// Under side height
    pub h1: f64,
    /// Crest width
    pub h2: f64,
    /// Upper side height
    pub h3: f64,
    /// Gap between turns
    pub h4: f64,
}

impl Default for ThreadProfile {
    fn default() -> Self {
        Self {
            radius: DEFAULT_THREAD_RADIUS,
            segments: DEFAULT_THREAD_SEGMENTS,
            loops: DEFAULT_THREAD_LOOPS,
            depth: DEFAULT_THREAD_DEPTH,
            fade: DEFAULT_THREAD_FADE,
            h1: DEFAULT_THREAD_H1,
            h2: DEFAULT_THREAD_H2,
            h3: DEFAULT_THREAD_H3,
            h4: DEFAULT_THREAD_H4,
        }
    }
}

/// One vertex of the cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPoint {
    /// Sits on the crest (pushed out by the faded depth)
    pub crest: bool,
    /// Axial offset within one turn
    pub z: f64,
}

impl ThreadProfile {
    /// Checks every parameter.
    ///
    /// The fade fraction is not checked beyond being a number; it is
    /// clamped when used.
    pub fn validate(&self) -> ThreadResult<()> {
        if !(self.radius > 0.0) || !self.radius.is_finite() {
            return Err(ThreadError::invalid_profile(format!(
                "radius must be positive: {}",
                self.radius
            )));
        }
        if self.segments < MIN_THREAD_SEGMENTS {
            return Err(ThreadError::invalid_profile(format!(
                "segments must be at least {MIN_THREAD_SEGMENTS}: {}",
                self.segments
            )));
        }
        if self.loops < MIN_THREAD_LOOPS {
            return Err(ThreadError::invalid_profile(format!(
                "loops must be at least {MIN_THREAD_LOOPS}: {}",
                self.loops
            )));
        }
        // rings x section points (at most 5) must be addressable
        let rings = self
            .segments
            .checked_mul(self.loops)
            .and_then(|n| n.checked_add(1))
            .and_then(|n| usize::try_from(n).ok())
            .and_then(|n| n.checked_mul(5));
        if rings.is_none() {
            return Err(ThreadError::invalid_profile(format!(
                "{} segments x {} loops is too many rings",
                self.segments, self.loops
            )));
        }
        if !(0.0..=1.0).contains(&self.depth) {
            return Err(ThreadError::invalid_profile(format!(
                "depth must be within 0..=1: {}",
                self.depth
            )));
        }
        if self.fade.is_nan() {
            return Err(ThreadError::invalid_profile("fade is not a number"));
        }
        for (name, value) in [("h1", self.h1), ("h3", self.h3)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ThreadError::invalid_profile(format!(
                    "{name} must be positive: {value}"
                )));
            }
        }
        for (name, value) in [("h2", self.h2), ("h4", self.h4)] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ThreadError::invalid_profile(format!(
                    "{name} must not be negative: {value}"
                )));
            }
        }
        Ok(())
    }

    /// Axial advance per turn.
    #[inline]
    pub fn pitch(&self) -> f64 {
        self.h1 + self.h2 + self.h3 + self.h4
    }

    /// Radial offset of the crest at full depth.
    #[inline]
    pub fn crest_offset(&self) -> f64 {
        self.radius * self.depth
    }

    /// Fade fraction clamped into its usable range.
    #[inline]
    pub fn clamped_fade(&self) -> f64 {
        self.fade.clamp(MIN_THREAD_FADE, MAX_THREAD_FADE)
    }

    /// Number of rings the crest needs to grow to full depth (at least 1).
    pub fn fade_rings(&self) -> u32 {
        let rings = (self.segments as f64 * self.clamped_fade()).ceil() as u32;
        rings.max(1)
    }

    /// Crest scale of ring `ring` out of `total`: 0 at both ends, 1 in the
    /// middle, linear in between.
    pub fn fade_factor(&self, ring: u32, total: u32) -> f64 {
        let fade = self.fade_rings() as f64;
        let from_start = ring as f64 / fade;
        let from_end = total.saturating_sub(ring) as f64 / fade;
        from_start.min(from_end).min(1.0)
    }

    /// Height of the canonical surface: one extra pitch on top of the turns.
    #[inline]
    pub fn height(&self) -> f64 {
        (self.loops as f64 + 1.0) * self.pitch()
    }

    /// Cross-section vertices from bottom to top.
    pub fn cross_section(&self) -> Vec<SectionPoint> {
        let mut section = Vec::with_capacity(5);
        section.push(SectionPoint {
            crest: false,
            z: 0.0,
        });
        section.push(SectionPoint {
            crest: true,
            z: self.h1,
        });
        if self.h2 > 0.0 {
            section.push(SectionPoint {
                crest: true,
                z: self.h1 + self.h2,
            });
        }
        section.push(SectionPoint {
            crest: false,
            z: self.h1 + self.h2 + self.h3,
        });
        if self.h4 > 0.0 {
            section.push(SectionPoint {
                crest: false,
                z: self.pitch(),
            });
        }
        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let profile = ThreadProfile::default();
        profile.validate().unwrap();
        assert_eq!(profile.cross_section().len(), 5);
        assert!((profile.pitch() - 0.5).abs() < 1e-12);
        assert!((profile.height() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_widths_drop_section_points() {
        let profile = ThreadProfile {
            h2: 0.0,
            h4: 0.0,
            ..ThreadProfile::default()
        };
        let section = profile.cross_section();
        assert_eq!(section.len(), 3);
        assert_eq!(section.last().unwrap().z, profile.pitch());
    }

    #[test]
    fn test_invalid_parameters() {
        let base = ThreadProfile::default();
        let cases = [
            ThreadProfile { segments: 4, ..base },
            ThreadProfile { loops: 0, ..base },
            ThreadProfile { radius: 0.0, ..base },
            ThreadProfile { depth: 1.5, ..base },
            ThreadProfile { h1: 0.0, ..base },
            ThreadProfile { h3: -1.0, ..base },
            ThreadProfile { h4: -0.1, ..base },
            ThreadProfile { fade: f64::NAN, ..base },
            ThreadProfile { loops: u32::MAX, ..base },
            ThreadProfile {
                segments: 1 << 16,
                loops: 1 << 16,
                ..base
            },
        ];
        for profile in cases {
            assert!(
                matches!(profile.validate(), Err(ThreadError::InvalidProfile { .. })),
                "accepted {profile:?}"
            );
        }
    }

    #[test]
    fn test_fade_clamping() {
        let wide = ThreadProfile {
            fade: 0.9,
            segments: 10,
            ..ThreadProfile::default()
        };
        assert_eq!(wide.clamped_fade(), 0.5);
        assert_eq!(wide.fade_rings(), 5);

        let narrow = ThreadProfile {
            fade: 0.0,
            ..ThreadProfile::default()
        };
        assert_eq!(narrow.fade_rings(), 1);
    }

    #[test]
    fn test_fade_factor_ramps() {
        let profile = ThreadProfile {
            segments: 10,
            fade: 0.2,
            ..ThreadProfile::default()
        };
        assert_eq!(profile.fade_rings(), 2);
        assert_eq!(profile.fade_factor(0, 40), 0.0);
        assert_eq!(profile.fade_factor(1, 40), 0.5);
        assert_eq!(profile.fade_factor(20, 40), 1.0);
        assert_eq!(profile.fade_factor(39, 40), 0.5);
        assert_eq!(profile.fade_factor(40, 40), 0.0);
    }
}

//! # Configuration Constants
//!
//! Centralized constants for the mesh toolkit. All tolerance values, rounding
//! policies and thread-generator defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Welding**: Distance used to merge stitched geometry
//! - **Thread**: Default profile values and their bounds

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used to decide whether lengths and dot products are "zero" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Number of decimal places a dot product is rounded to before testing
/// whether two unit vectors are parallel.
///
/// A reference "up" vector is swapped for "right" when
/// `|round(dot, PARALLEL_DECIMALS)| == 1`.
///
/// # Example
///
/// ```rust
/// use config::constants::{round_to, PARALLEL_DECIMALS};
///
/// assert_eq!(round_to(0.999_999_6, PARALLEL_DECIMALS), 1.0);
/// ```
pub const PARALLEL_DECIMALS: i32 = 6;

// =============================================================================
// WELDING CONSTANTS
// =============================================================================

/// Distance below which stitched vertices are merged.
///
/// Expressed in the host's linear units. Generated geometry is welded onto
/// the boundary loops it was fitted to using this tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::MERGE_DISTANCE;
///
/// let a = [0.0_f64, 0.0, 0.0];
/// let b = [0.000_001_f64, 0.0, 0.0];
/// assert!((b[0] - a[0]).abs() < MERGE_DISTANCE);
/// ```
pub const MERGE_DISTANCE: f64 = 1e-5;

// =============================================================================
// THREAD CONSTANTS
// =============================================================================

/// Minimum number of segments per thread turn.
pub const MIN_THREAD_SEGMENTS: u32 = 5;

/// Minimum number of thread turns.
pub const MIN_THREAD_LOOPS: u32 = 1;

/// Upper bound of the fade fraction.
///
/// The fade zones at both ends of the helix may never cover more than half a
/// turn each, so they cannot overlap.
pub const MAX_THREAD_FADE: f64 = 0.5;

/// Smallest fade fraction accepted after clamping.
pub const MIN_THREAD_FADE: f64 = 0.01;

/// Default thread radius.
pub const DEFAULT_THREAD_RADIUS: f64 = 1.0;

/// Default number of segments per turn.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_THREAD_SEGMENTS, MIN_THREAD_SEGMENTS};
///
/// assert!(DEFAULT_THREAD_SEGMENTS >= MIN_THREAD_SEGMENTS);
/// ```
pub const DEFAULT_THREAD_SEGMENTS: u32 = 32;

/// Default number of turns.
pub const DEFAULT_THREAD_LOOPS: u32 = 4;

/// Default crest depth as a fraction of the radius (5 %).
pub const DEFAULT_THREAD_DEPTH: f64 = 0.05;

/// Default fade fraction of a turn (15 %).
pub const DEFAULT_THREAD_FADE: f64 = 0.15;

/// Default height of the thread's under side.
pub const DEFAULT_THREAD_H1: f64 = 0.2;

/// Default crest width.
pub const DEFAULT_THREAD_H2: f64 = 0.05;

/// Default height of the thread's upper side.
pub const DEFAULT_THREAD_H3: f64 = 0.2;

/// Default gap between two turns.
pub const DEFAULT_THREAD_H4: f64 = 0.05;

// =============================================================================
// GEOMETRY CONFIG
// =============================================================================

/// Tolerances used while stitching generated geometry.
///
/// The field is public for struct-update syntax; consumers call
/// [`GeometryConfig::validate`] before acting on a value they did not build
/// through [`GeometryConfig::new`].
///
/// # Examples
/// ```
/// use config::constants::GeometryConfig;
/// let config = GeometryConfig::default();
/// assert!(config.merge_distance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Weld distance for stitched vertices.
    pub merge_distance: f64,
}

impl GeometryConfig {
    /// Builds a validated configuration.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeometryConfig;
    /// let cfg = GeometryConfig::new(1.0e-4).expect("valid config");
    /// assert_eq!(cfg.merge_distance, 1.0e-4);
    /// assert!(GeometryConfig::new(-1.0).is_err());
    /// ```
    pub fn new(merge_distance: f64) -> Result<Self, ConfigError> {
        let config = Self { merge_distance };
        config.validate()?;
        Ok(config)
    }

    /// Checks that the merge distance is positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.merge_distance > 0.0) || !self.merge_distance.is_finite() {
            return Err(ConfigError::InvalidMergeDistance(self.merge_distance));
        }
        Ok(())
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            merge_distance: MERGE_DISTANCE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the merge distance is zero, negative, infinite or NaN.
    InvalidMergeDistance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMergeDistance(value) => {
                write!(f, "merge distance must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Rounds `value` to `decimals` decimal places (half away from zero).
///
/// # Example
///
/// ```rust
/// use config::constants::round_to;
///
/// assert_eq!(round_to(1.234_567_89, 3), 1.235);
/// ```
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Returns true when a dot product of two unit vectors, rounded to
/// `decimals` places, has magnitude one.
///
/// # Example
///
/// ```rust
/// use config::constants::{is_parallel, PARALLEL_DECIMALS};
///
/// assert!(is_parallel(-1.0, PARALLEL_DECIMALS));
/// assert!(!is_parallel(0.5, PARALLEL_DECIMALS));
/// ```
#[inline]
pub fn is_parallel(dot: f64, decimals: i32) -> bool {
    round_to(dot, decimals).abs() == 1.0
}

//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants
//! and helper functions.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_merge_distance_larger_than_epsilon() {
    assert!(
        MERGE_DISTANCE >= EPSILON,
        "MERGE_DISTANCE should be >= EPSILON"
    );
}

// =============================================================================
// THREAD DEFAULT TESTS
// =============================================================================

#[test]
fn test_thread_defaults_within_bounds() {
    assert!(DEFAULT_THREAD_SEGMENTS >= MIN_THREAD_SEGMENTS);
    assert!(DEFAULT_THREAD_LOOPS >= MIN_THREAD_LOOPS);
    assert!(DEFAULT_THREAD_FADE > 0.0 && DEFAULT_THREAD_FADE <= MAX_THREAD_FADE);
    assert!((0.0..=1.0).contains(&DEFAULT_THREAD_DEPTH));
}

#[test]
fn test_thread_default_sides_positive() {
    assert!(DEFAULT_THREAD_H1 > 0.0);
    assert!(DEFAULT_THREAD_H3 > 0.0);
}

// =============================================================================
// ROUNDING TESTS
// =============================================================================

#[test]
fn test_round_to_six_places() {
    assert_eq!(round_to(0.123_456_4, 6), 0.123_456);
    assert_eq!(round_to(-0.999_999_7, 6), -1.0);
}

#[test]
fn test_is_parallel_detects_both_directions() {
    assert!(is_parallel(1.0, PARALLEL_DECIMALS));
    assert!(is_parallel(-0.999_999_9, PARALLEL_DECIMALS));
}

#[test]
fn test_is_parallel_rejects_near_parallel() {
    // 0.99999 rounds to itself at six places
    assert!(!is_parallel(0.999_99, PARALLEL_DECIMALS));
    assert!(!is_parallel(0.0, PARALLEL_DECIMALS));
}

// =============================================================================
// GEOMETRY CONFIG TESTS
// =============================================================================

#[test]
fn test_geometry_config_default() {
    let cfg = GeometryConfig::default();
    assert_eq!(cfg.merge_distance, MERGE_DISTANCE);
    assert_eq!(cfg.validate(), Ok(()));
}

#[test]
fn test_geometry_config_validates_inputs() {
    assert_eq!(
        GeometryConfig::new(0.0).unwrap_err(),
        ConfigError::InvalidMergeDistance(0.0)
    );
    assert!(GeometryConfig::new(f64::NAN).is_err());
    assert!(GeometryConfig::new(f64::INFINITY).is_err());
    assert!(GeometryConfig::new(1e-5).is_ok());
}

#[test]
fn test_validate_catches_literal_values() {
    let cfg = GeometryConfig {
        merge_distance: -1e-5,
    };
    assert_eq!(cfg.validate(), Err(ConfigError::InvalidMergeDistance(-1e-5)));
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidMergeDistance(-2.0);
    assert!(err.to_string().contains("-2"));
}

//! # Config Crate
//!
//! Centralized configuration constants for the mesh alignment and thread
//! toolkit. Tolerances, rounding policies and thread defaults are defined
//! here so the geometry crates never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{is_parallel, MERGE_DISTANCE, PARALLEL_DECIMALS};
//!
//! // Vectors whose rounded dot product is +-1 are treated as parallel
//! assert!(is_parallel(0.999_999_9, PARALLEL_DECIMALS));
//! assert!(!is_parallel(0.99, PARALLEL_DECIMALS));
//!
//! // Weld distance used when stitching generated geometry
//! assert!(MERGE_DISTANCE < 1e-3);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Host Agnostic**: Values are expressed in the host's linear units
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;

//! # Mesh Thread
//!
//! Helical screw threads for editable meshes.
//!
//! ## Architecture
//!
//! ```text
//! ThreadProfile → generate_thread → ThreadSurface (band + caps)
//!                                        │
//! Mesh (two selected loops) → fit_thread ┘→ placed, welded, old band deleted
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use mesh_thread::{generate_thread, ThreadProfile};
//!
//! let surface = generate_thread(&ThreadProfile::default()).unwrap();
//! assert_eq!(surface.bottom.faces.len(), 32);
//! ```

pub mod error;
pub mod fit;
pub mod generate;
pub mod profile;

pub use error::{ThreadError, ThreadResult};
pub use fit::{fit_thread, placement_matrix, seam_vertex, FitOptions, FitReport};
pub use generate::{generate_thread, SurfacePart, ThreadSurface};
pub use profile::{SectionPoint, ThreadProfile};

//! # Edit Mesh
//!
//! Editable polygon mesh used by the alignment and thread crates.
//!
//! The mesh is an index-based vertex/edge/face store. Callers borrow it for
//! the duration of a single operation; nothing in the workspace caches mesh
//! state between calls.
//!
//! ## Usage
//!
//! ```rust
//! use edit_mesh::Mesh;
//! use glam::DVec3;
//!
//! let mut mesh = Mesh::new();
//! let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
//! let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
//! let c = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
//! let face = mesh.add_face(&[a, b, c]).unwrap();
//! assert_eq!(mesh.edge_count(), 3);
//! assert!(mesh.face(face).unwrap().normal().z > 0.0);
//! ```

pub mod error;
pub mod mesh;
pub mod selection;
pub mod transform;

pub use error::{EditMeshError, EditMeshResult};
pub use mesh::{Edge, EdgeId, Face, FaceId, MergeReport, Mesh, Vertex, VertexId};
pub use selection::{boundary_edges, vertex_sequences, VertexSequence};
pub use transform::Transform;

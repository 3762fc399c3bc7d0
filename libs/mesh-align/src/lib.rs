//! # Mesh Align
//!
//! Frame, selection and alignment math on top of [`edit_mesh`].
//!
//! ## Architecture
//!
//! ```text
//! edit-mesh (Mesh, Transform) → mesh-align (Frame, bounds, view axes, operators)
//! ```
//!
//! Every function borrows the mesh for one call and keeps nothing.
//!
//! ## Usage
//!
//! ```rust
//! use edit_mesh::{Mesh, Transform};
//! use glam::DVec3;
//! use mesh_align::create_frame_from_face;
//!
//! let mut mesh = Mesh::new();
//! let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
//! let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
//! let c = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
//! let face = mesh.add_face(&[a, b, c]).unwrap();
//!
//! let frame = create_frame_from_face(&mesh, &Transform::IDENTITY, face).unwrap();
//! assert!((frame.normal - DVec3::Z).length() < 1e-12);
//! ```

pub mod align;
pub mod error;
pub mod frame;
pub mod object;
pub mod selection;
pub mod straighten;
pub mod view;

pub use align::{
    align_vertices, center_vertices, AlignContext, AlignDirection, AlignMode, AlignRequest,
    AlignType, Axis, CenterRequest, Orientation,
};
pub use error::{AlignError, AlignResult};
pub use frame::{
    create_frame_from_edge, create_frame_from_face, create_frame_from_vertex, rotation_difference,
    rotation_difference_matrix, rotation_difference_matrix4, Frame,
};
pub use object::{
    align_object_to_edge, align_object_to_vertex, closest_point_on_line, EdgeSnap, PlacedEdge,
    PlacedVertex,
};
pub use selection::{average, bounding_box_and_center, center_between, SelectionBounds};
pub use straighten::{farthest_pair, straighten, straighten_selection};
pub use view::{right_and_up_axes, view_relative_axes, ViewAxes, Viewport};

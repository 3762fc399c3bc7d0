//! # Edit Mesh Errors
//!
//! Error types for mesh queries and edits. Every failure is reported before
//! the mesh is touched, so a returned error always means "nothing changed".

use crate::mesh::{EdgeId, FaceId, VertexId};
use thiserror::Error;

/// Errors that can occur while querying or editing a [`crate::Mesh`].
#[derive(Debug, Error, PartialEq)]
pub enum EditMeshError {
    /// Vertex id does not exist in the mesh
    #[error("Invalid vertex reference: {0:?}")]
    InvalidVertex(VertexId),

    /// Edge id does not exist in the mesh
    #[error("Invalid edge reference: {0:?}")]
    InvalidEdge(EdgeId),

    /// Face id does not exist in the mesh
    #[error("Invalid face reference: {0:?}")]
    InvalidFace(FaceId),

    /// Face construction rejected
    #[error("Degenerate face: {message}")]
    DegenerateFace { message: String },

    /// Edge construction rejected
    #[error("Degenerate edge between {0:?} and itself")]
    DegenerateEdge(VertexId),

    /// A walked edge set forks at this vertex
    #[error("Edge selection branches at {0:?}")]
    BranchingSequence(VertexId),

    /// Matrix has no inverse
    #[error("Transform matrix is singular")]
    SingularTransform,

    /// Merge distance must be positive and finite
    #[error("Invalid merge distance: {0}")]
    InvalidDistance(f64),
}

impl EditMeshError {
    /// Creates a degenerate face error.
    pub fn degenerate_face(message: impl Into<String>) -> Self {
        Self::DegenerateFace {
            message: message.into(),
        }
    }
}

/// Result type alias for mesh operations.
pub type EditMeshResult<T> = Result<T, EditMeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EditMeshError::InvalidVertex(VertexId(7));
        assert!(err.to_string().contains("VertexId(7)"));

        let err = EditMeshError::degenerate_face("needs 3 vertices");
        assert!(err.to_string().contains("needs 3 vertices"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EditMeshError>();
    }
}

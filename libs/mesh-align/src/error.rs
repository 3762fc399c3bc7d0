//! # Alignment Errors
//!
//! Error types for frame construction and alignment operators.

use edit_mesh::EditMeshError;
use thiserror::Error;

/// Errors that can occur while computing frames or aligning geometry.
#[derive(Debug, Error, PartialEq)]
pub enum AlignError {
    /// Mesh query or edit failed
    #[error("Mesh error: {0}")]
    Mesh(#[from] EditMeshError),

    /// Aggregate over nothing
    #[error("Empty input: {what} needs at least one point")]
    EmptyInput { what: &'static str },

    /// Selection does not fit the operator
    #[error("Invalid selection: {message}")]
    InvalidSelection { message: String },

    /// Geometry too degenerate to orient
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },
}

impl AlignError {
    /// Creates an empty input error.
    pub fn empty(what: &'static str) -> Self {
        Self::EmptyInput { what }
    }

    /// Creates an invalid selection error.
    pub fn invalid_selection(message: impl Into<String>) -> Self {
        Self::InvalidSelection {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }
}

/// Result type alias for alignment operations.
pub type AlignResult<T> = Result<T, AlignError>;

#[cfg(test)]
mod tests {
    use super::*;
    use edit_mesh::VertexId;

    #[test]
    fn test_mesh_error_converts() {
        let err: AlignError = EditMeshError::InvalidVertex(VertexId(3)).into();
        assert!(matches!(err, AlignError::Mesh(_)));
        assert!(err.to_string().contains("VertexId(3)"));
    }

    #[test]
    fn test_empty_display() {
        let err = AlignError::empty("average");
        assert_eq!(err.to_string(), "Empty input: average needs at least one point");
    }
}

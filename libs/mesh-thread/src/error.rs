//! # Thread Errors

use config::constants::ConfigError;
use edit_mesh::EditMeshError;
use mesh_align::AlignError;
use thiserror::Error;

/// Errors that can occur while generating or fitting a thread.
#[derive(Debug, Error, PartialEq)]
pub enum ThreadError {
    /// Profile parameter out of range
    #[error("Invalid thread profile: {message}")]
    InvalidProfile { message: String },

    /// Selection unsuitable; the mesh was not touched
    #[error("Thread cancelled: {reason}")]
    Cancelled { reason: String },

    /// Stitching tolerances out of range
    #[error("Invalid geometry config: {0}")]
    Config(#[from] ConfigError),

    /// Mesh query or edit failed
    #[error("Mesh error: {0}")]
    Mesh(#[from] EditMeshError),

    /// Alignment math failed
    #[error("Alignment error: {0}")]
    Align(#[from] AlignError),
}

impl ThreadError {
    /// Creates an invalid profile error.
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::InvalidProfile {
            message: message.into(),
        }
    }

    /// Creates a cancellation.
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled {
            reason: reason.into(),
        }
    }

    /// True for precondition failures that left the mesh untouched.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Result type alias for thread operations.
pub type ThreadResult<T> = Result<T, ThreadError>;

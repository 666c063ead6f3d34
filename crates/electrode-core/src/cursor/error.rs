//! Cursor controller error types

use thiserror::Error;

use crate::transform::TransformError;

/// Errors that can occur while navigating volumes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CursorError {
    /// A coordinate could not be mapped back to voxel space
    #[error("Cannot map cursor: {0}")]
    Transform(#[from] TransformError),

    /// No volume with this name has been loaded
    #[error("Volume not loaded: {0}")]
    UnknownVolume(String),
}

/// Result type for cursor operations
pub type CursorResult<T> = Result<T, CursorError>;

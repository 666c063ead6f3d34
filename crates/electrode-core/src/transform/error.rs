//! Coordinate transform error types

use thiserror::Error;

/// Errors that can occur while mapping between coordinate spaces
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The affine has no inverse (degenerate volume geometry)
    #[error("Affine transform is singular (determinant {determinant:e}); volume geometry is degenerate")]
    Singular { determinant: f64 },
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;

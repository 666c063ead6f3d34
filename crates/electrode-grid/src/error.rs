//! Grid operation error types

use thiserror::Error;

use crate::record::GridCoordinate;
use crate::registry::RecordId;

/// Errors from grid record operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Record id not present in the registry
    #[error("Unknown electrode record: {0}")]
    UnknownRecord(RecordId),

    /// Interpolation needs the target's place in the grid
    #[error("Electrode '{label}' has no grid coordinate; assign one before interpolating")]
    MissingGridCoordinate { label: String },

    /// No neighbors along either axis form a usable line
    #[error("No adjacent contacts of '{label}' form a usable line for interpolation")]
    NoInterpolationPath { label: String },

    /// Another record of the same grid already occupies the coordinate
    #[error("Grid '{grid_name}' already has a contact at {coordinate}")]
    DuplicateGridCoordinate {
        grid_name: String,
        coordinate: GridCoordinate,
    },
}

/// Result type for grid operations
pub type GridResult<T> = Result<T, GridError>;

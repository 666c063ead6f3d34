//! Automatic labeling error types

use thiserror::Error;

use crate::error::GridError;

/// Errors that stop automatic labeling before any record changes
#[derive(Error, Debug)]
pub enum LabelingError {
    /// A corner is tagged on more than one record, or a record has several
    #[error("Ambiguous corner assignment: {0}")]
    AmbiguousCornerAssignment(String),

    /// A corner is untagged or its record has no location
    #[error("Incomplete corner assignment: {0}")]
    IncompleteCornerAssignment(String),

    /// Grid naming needs explicit dimensions
    #[error("Grid '{grid_name}' has a user-defined geometry; specify its dimensions first")]
    GeometryUnspecified { grid_name: String },

    /// The geometry fit itself failed
    #[error("Grid fit failed: {0}")]
    FitFailed(#[from] anyhow::Error),

    /// The fitted coordinates break the grid's invariants
    #[error("Fitted grid rejected: {0}")]
    Grid(#[from] GridError),
}

/// Result type for labeling operations
pub type LabelingResult<T> = Result<T, LabelingError>;

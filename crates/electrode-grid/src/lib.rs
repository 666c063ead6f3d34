//! Electrode Grid - contact records and grid-aware operations
//!
//! This crate provides:
//! - [`GridRegistry`]: the owned, passed-by-reference collection of contacts
//! - Nearest-neighbor search along grid axes
//! - Linear interpolation / edge extrapolation of missing contact locations
//! - Automatic grid labeling through an injected [`GridGeometryFitter`]
//!
//! # Architecture
//!
//! ```text
//! table edits ─► GridRegistry ─► interpolate / swap / label_automatically
//!                     ▲                                │
//!                     └──────── updated records ◄──────┘
//! ```

mod error;
mod interpolate;
mod neighbor;
mod record;
mod registry;

pub mod labeling;

pub use error::{GridError, GridResult};
pub use labeling::{
    label_automatically, CornerLocations, GridGeometry, GridGeometryFitter, LabelingConfig,
    LabelingError, LabelingResult, LineFitParams, NamingConvention,
};
pub use neighbor::{Direction, GridAxis};
pub use record::{Corner, ElectrodeRecord, GridCoordinate, DEFAULT_GRID_NAME};
pub use registry::{GridRegistry, RecordId};

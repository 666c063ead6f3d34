//! Electrode Core - Shared library for electrode localization on imaging volumes
//!
//! Provides the volume-navigation half of the localization tool:
//!
//! - Affine mapping between voxel, RAS and tkr coordinate spaces
//! - Orthogonal slicing of loaded volumes and slice-aware pins
//! - A cursor controller that keeps all three spaces in sync
//! - Shared YAML configuration helpers

pub mod config;
pub mod cursor;
pub mod transform;
pub mod types;
pub mod volume;

pub use types::*;

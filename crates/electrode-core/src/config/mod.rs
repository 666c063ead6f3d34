//! Shared configuration utilities for electrode localization
//!
//! This module provides configuration infrastructure shared between the
//! volume viewer and the grid tools, including:
//!
//! - Generic YAML config loading/saving
//! - Config directory utilities
//! - Viewer (cursor and pin) configuration
//!
//! # Usage
//!
//! ```ignore
//! use electrode_core::config::{load_config, save_config, default_config_path, ViewerConfig};
//!
//! let path = default_config_path("viewer.yaml");
//! let config: ViewerConfig = load_config(&path);
//!
//! save_config(&config, &path)?;
//! ```

mod io;
mod paths;
mod viewer;

pub use io::{load_config, read_config, save_config};
pub use paths::{default_config_dir, default_config_path};
pub use viewer::ViewerConfig;

//! Automatic labeling configuration
//!
//! Stored as YAML next to the viewer config.
//! Default location: ~/.config/electrode-locate/labeling.yaml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use electrode_core::config::{default_config_path, load_config};

use super::fitter::LineFitParams;

/// How contacts are numbered after fitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// Plane fit, numbered along the short axis first
    #[default]
    Grid,
    /// Plane fit, numbered along the long axis first
    ReverseGrid,
    /// Line fit (strips and depths), numbered along y
    Line,
}

/// Automatic labeling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Prefix of every generated channel name (e.g. "LTG")
    pub name_stem: String,

    /// Numbering scheme
    pub naming_convention: NamingConvention,

    /// Parameters handed to the line fit
    pub line_fit: LineFitParams,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            name_stem: String::new(),
            naming_convention: NamingConvention::default(),
            line_fit: LineFitParams::default(),
        }
    }
}

/// Default labeling config path
pub fn default_labeling_config_path() -> PathBuf {
    default_config_path("labeling.yaml")
}

/// Load the labeling config, falling back to defaults
pub fn load_labeling_config(path: &Path) -> LabelingConfig {
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use electrode_core::config::save_config;

    #[test]
    fn test_convention_yaml_names() {
        let config: LabelingConfig =
            serde_yaml::from_str("name_stem: LTG\nnaming_convention: reverse_grid\n").unwrap();
        assert_eq!(config.name_stem, "LTG");
        assert_eq!(config.naming_convention, NamingConvention::ReverseGrid);
        assert_eq!(config.line_fit, LineFitParams::default());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labeling.yaml");
        let config = LabelingConfig {
            name_stem: "RAD".to_string(),
            naming_convention: NamingConvention::Line,
            line_fit: LineFitParams { delta: 0.5, rho_loose: 30.0 },
        };

        save_config(&config, &path).unwrap();
        assert_eq!(load_labeling_config(&path), config);
        assert!(default_labeling_config_path().ends_with("labeling.yaml"));
    }
}

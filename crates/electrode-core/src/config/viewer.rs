//! Volume viewer configuration
//!
//! Controls pin visibility and how volumes are oriented on load.

use serde::{Deserialize, Serialize};

/// Volume viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Distance (in voxels) from a slice within which a pin is shown on it
    /// Default: 7.5
    pub pin_tolerance: f64,

    /// Name used for pins dropped without an explicit name
    /// Default: "pin"
    pub current_pin: String,

    /// Reorient loaded volumes from scanner-orig to standard orientation
    /// Default: false
    pub reorient_to_std: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pin_tolerance: 7.5,
            current_pin: "pin".to_string(),
            reorient_to_std: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ViewerConfig::default();
        assert_eq!(config.pin_tolerance, 7.5);
        assert_eq!(config.current_pin, "pin");
        assert!(!config.reorient_to_std);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ViewerConfig = serde_yaml::from_str("pin_tolerance: 3.0").unwrap();
        assert_eq!(config.pin_tolerance, 3.0);
        assert_eq!(config.current_pin, "pin");
    }
}

//! Path utilities for electrode localization configuration files

use std::path::PathBuf;

/// Get the default configuration directory
///
/// Returns: `~/.config/electrode-locate` (platform config dir, `.` if unknown)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("electrode-locate")
}

/// Get the default config file path for a given component
///
/// # Arguments
/// * `filename` - Config file name (e.g., "viewer.yaml", "labeling.yaml")
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_ends_with_app_name() {
        assert!(default_config_dir().ends_with("electrode-locate"));
    }

    #[test]
    fn test_config_path_includes_filename() {
        let path = default_config_path("viewer.yaml");
        assert!(path.ends_with("viewer.yaml"));
        assert!(path.parent().unwrap().ends_with("electrode-locate"));
    }
}

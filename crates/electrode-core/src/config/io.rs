//! YAML persistence for viewer and labeling settings
//!
//! [`read_config`] reports every failure; [`load_config`] is the lenient
//! form used at startup, where a broken file must not stop the viewer.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read a settings file, `Ok(None)` when it does not exist
pub fn read_config<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("Cannot read settings {:?}", path)),
    };
    let config = serde_yaml::from_str(&contents).with_context(|| format!("Invalid settings in {:?}", path))?;
    Ok(Some(config))
}

/// Read a settings file, falling back to defaults
///
/// A missing file is silent; an unreadable or malformed one is logged.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match read_config(path) {
        Ok(Some(config)) => {
            log::info!("load_config: settings read from {:?}", path);
            config
        }
        Ok(None) => {
            log::info!("load_config: no settings at {:?}, using defaults", path);
            T::default()
        }
        Err(e) => {
            log::warn!("load_config: {:#}, using defaults", e);
            T::default()
        }
    }
}

/// Write a settings file, creating its directory as needed
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(config).context("Cannot encode settings as YAML")?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Cannot create settings directory {:?}", dir))?;
    }
    std::fs::write(path, yaml).with_context(|| format!("Cannot write settings {:?}", path))?;

    log::debug!("save_config: settings written to {:?}", path);
    Ok(())
}

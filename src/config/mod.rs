//! Sensor configuration files. A config names the kernel input device a
//! sensor registers under and may override the raw-unit conversion scale
//! per axis.

#[cfg(test)]
pub mod config_test;

use std::{
    fs::DirEntry,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represents all possible errors loading a [SensorConfig]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct SensorConfig {
    pub version: u32,
    pub kind: String,
    pub name: String,
    pub input_name: Option<String>,
    pub scale: Option<ScaleConfig>,
}

/// Per-axis overrides for the raw-unit conversion factors.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub struct ScaleConfig {
    pub azimuth: Option<f32>,
    pub pitch: Option<f32>,
    pub roll: Option<f32>,
}

impl SensorConfig {
    /// Load a [SensorConfig] from the given YAML string
    pub fn from_yaml(content: &str) -> Result<SensorConfig, LoadError> {
        let config: SensorConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load a [SensorConfig] from the given YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<SensorConfig, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: SensorConfig = serde_yaml::from_reader(file)?;
        Ok(config)
    }
}

/// Returns a list of directories in load order to find sensor configurations.
/// E.g. ["/etc/sensorplumber/sensors.d", "/usr/share/sensorplumber/sensors"]
pub fn get_sensors_paths() -> Vec<PathBuf> {
    vec![
        PathBuf::from("./rootfs/usr/share/sensorplumber/sensors"),
        PathBuf::from("/etc/sensorplumber/sensors.d"),
        PathBuf::from("/usr/share/sensorplumber/sensors"),
    ]
}

/// Load the first sensor config of the given kind found in the default
/// search paths.
pub fn load_sensor_config(kind: &str) -> Option<SensorConfig> {
    load_sensor_config_from(&get_sensors_paths(), kind)
}

/// Load the first sensor config of the given kind found in the given
/// directories. Unreadable directories and files that fail to parse are
/// skipped.
pub fn load_sensor_config_from(paths: &[PathBuf], kind: &str) -> Option<SensorConfig> {
    for path in paths {
        let entries = match std::fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Unable to read directory: {path:?}: {e}");
                continue;
            }
        };

        let mut files: Vec<DirEntry> = entries.filter_map(|entry| entry.ok()).collect();
        files.sort_by_key(|entry| entry.file_name());

        for entry in files {
            let file = entry.path();
            let extension = file.extension().and_then(|ext| ext.to_str());
            if !matches!(extension, Some("yaml") | Some("yml")) {
                continue;
            }
            let config = match SensorConfig::from_yaml_file(&file) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Skipping invalid sensor config {file:?}: {e}");
                    continue;
                }
            };
            if config.kind == kind {
                log::debug!("Loaded sensor config from {file:?}");
                return Some(config);
            }
        }
    }

    None
}

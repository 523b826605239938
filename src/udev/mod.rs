//! Discovery of sensor input devices through the udev input subsystem.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use udev::Enumerator;

use crate::constants::{ENABLE_ATTRIBUTE, INPUT_CLASS_PATH};

/// Represents all possible errors resolving a sensor device
#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("udev enumeration failed: {0}")]
    Io(#[from] io::Error),
    #[error("no input device named '{0}' found")]
    NotFound(String),
}

/// A resolved sensor input device. The sysname (e.g. "event3") doubles as
/// the device's directory name under the sysfs input class.
#[derive(Debug, Clone, Default)]
pub struct SensorDevice {
    devnode: String,
    sysname: String,
    name: String,
}

impl SensorDevice {
    /// Returns a SensorDevice object from the given base path and name.
    /// e.g. SensorDevice::from_devnode("/dev/input", "event3");
    pub fn from_devnode(base_path: &str, sysname: &str) -> Self {
        Self {
            devnode: format!("{base_path}/{sysname}"),
            sysname: sysname.to_string(),
            name: String::new(),
        }
    }

    pub fn devnode(&self) -> &str {
        self.devnode.as_str()
    }

    pub fn sysname(&self) -> &str {
        self.sysname.as_str()
    }

    /// Kernel device name as reported by the evdev interface.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Open the raw event stream of this device.
    pub fn open(&self) -> io::Result<File> {
        File::open(&self.devnode)
    }

    /// Returns the sysfs attribute path used to toggle the kernel driver.
    pub fn control_path(&self) -> PathBuf {
        Path::new(INPUT_CLASS_PATH)
            .join(&self.sysname)
            .join(ENABLE_ATTRIBUTE)
    }
}

/// Returns a list of devices in the given subsystem that have a devnode property.
pub fn discover_devices(subsystem: &str) -> Result<Vec<udev::Device>, DiscoverError> {
    let mut enumerator = Enumerator::new()?;
    enumerator.match_subsystem(subsystem)?;

    log::debug!("Started udev {subsystem} enumerator.");

    Ok(enumerator
        .scan_devices()?
        .filter(|device| device.devnode().is_some())
        .collect())
}

/// Find the event device whose kernel name matches the given sensor name.
/// Every event node is probed through the evdev interface, mirroring how
/// the kernel names are assigned in the first place.
pub fn find_device_by_name(name: &str) -> Result<SensorDevice, DiscoverError> {
    for device in discover_devices("input")? {
        let sysname = device.sysname().to_string_lossy().to_string();
        if !sysname.starts_with("event") {
            continue;
        }
        let Some(devnode) = device.devnode() else {
            continue;
        };

        let evdev_device = match evdev::Device::open(devnode) {
            Ok(device) => device,
            Err(e) => {
                log::debug!("Unable to probe input device {devnode:?}: {e}");
                continue;
            }
        };
        let Some(device_name) = evdev_device.name() else {
            continue;
        };
        if device_name != name {
            continue;
        }

        log::debug!("Found input device '{name}' at {devnode:?}");
        return Ok(SensorDevice {
            devnode: devnode.to_string_lossy().to_string(),
            sysname,
            name: device_name.to_string(),
        });
    }

    Err(DiscoverError::NotFound(name.to_string()))
}

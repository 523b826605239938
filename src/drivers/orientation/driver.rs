use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    os::fd::{AsFd, BorrowedFd},
    path::PathBuf,
};

use evdev::{EventType, RelativeAxisType};

use crate::{
    config::SensorConfig,
    constants::{ID_ORIENTATION, SENSOR_TYPE_ORIENTATION},
    input::{
        event::{timestamp_now, SensorEvent},
        reader::EventReader,
        Sensor, SensorError,
    },
    udev::SensorDevice,
};

use super::{EVENT_BUFFER_EVENTS, SCALE_AZIMUTH, SCALE_PITCH, SCALE_ROLL};

/// Conversion factors from raw axis units to degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub azimuth: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Default for AxisScale {
    fn default() -> Self {
        Self {
            azimuth: SCALE_AZIMUTH,
            pitch: SCALE_PITCH,
            roll: SCALE_ROLL,
        }
    }
}

impl AxisScale {
    /// Build the scale table, applying any per-axis overrides from the
    /// given sensor config.
    pub fn from_config(conf: Option<&SensorConfig>) -> Self {
        let mut scale = AxisScale::default();
        let Some(overrides) = conf.and_then(|c| c.scale.as_ref()) else {
            return scale;
        };
        if let Some(azimuth) = overrides.azimuth {
            scale.azimuth = azimuth;
        }
        if let Some(pitch) = overrides.pitch {
            scale.pitch = pitch;
        }
        if let Some(roll) = overrides.roll {
            scale.roll = roll;
        }
        scale
    }
}

/// Driver for a single orientation sensor exposed as a kernel event
/// device. Raw axis events accumulate into one pending sample that is
/// emitted whenever a synchronization event arrives while the sensor is
/// enabled.
///
/// The driver performs blocking reads and holds no locks; a caller is
/// expected to serialize access and to poll the device handle for
/// readiness before reading events.
pub struct OrientationDriver {
    device: Option<File>,
    reader: EventReader,
    control_path: PathBuf,
    scale: AxisScale,
    enabled: bool,
    has_pending_event: bool,
    pending: SensorEvent,
}

impl OrientationDriver {
    /// Create a driver for the given resolved device. Failure to open the
    /// event stream degrades reads later on but does not fail construction.
    pub fn new(device: &SensorDevice, conf: Option<&SensorConfig>) -> Self {
        let handle = match device.open() {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("Unable to open {:?}: {e}", device.devnode());
                None
            }
        };
        Self::from_device(handle, device.control_path(), AxisScale::from_config(conf))
    }

    /// Create a driver from an already-open event stream and control file
    /// path. When a device handle is present the kernel driver is forced
    /// into the disabled state so the stored flag and the control file
    /// agree from the start.
    pub fn from_device(device: Option<File>, control_path: PathBuf, scale: AxisScale) -> Self {
        let driver = Self {
            device,
            reader: EventReader::new(EVENT_BUFFER_EVENTS),
            control_path,
            scale,
            enabled: false,
            has_pending_event: false,
            pending: SensorEvent::new(ID_ORIENTATION, SENSOR_TYPE_ORIENTATION),
        };

        if driver.device.is_some() {
            if let Err(e) = driver.write_control(false) {
                log::debug!("Unable to disable sensor at {:?}: {e}", driver.control_path);
            }
        }

        driver
    }

    /// Returns the raw device handle for readiness polling.
    pub fn fd(&self) -> Option<BorrowedFd> {
        self.device.as_ref().map(|device| device.as_fd())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Write the given state to the sysfs control file. The attribute
    /// expects a two byte write: an ASCII digit and a NUL.
    fn write_control(&self, enabled: bool) -> io::Result<()> {
        let mut control = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.control_path)?;
        let buf: [u8; 2] = if enabled { *b"1\0" } else { *b"0\0" };
        if let Err(e) = control.write_all(&buf) {
            log::warn!("Short write to {:?}: {e}", self.control_path);
        }
        Ok(())
    }
}

impl Sensor for OrientationDriver {
    /// Toggle the kernel driver. A no-op when the requested state already
    /// matches; an open failure leaves the stored state untouched.
    fn enable(&mut self, _handle: i32, enabled: bool) -> Result<(), SensorError> {
        log::debug!("Setting orientation sensor enabled: {enabled}");
        if enabled == self.enabled {
            return Ok(());
        }
        self.write_control(enabled)?;
        self.enabled = enabled;
        Ok(())
    }

    /// The kernel driver has no way to change its sampling interval, so
    /// delay requests are accepted and ignored.
    fn set_delay(&mut self, _handle: i32, _interval_ns: i64) -> Result<(), SensorError> {
        Ok(())
    }

    // FIXME: this should likely report `self.enabled`; the flag is never
    // set anywhere, so it always reads false.
    fn has_pending_events(&self) -> bool {
        self.has_pending_event
    }

    fn read_events(&mut self, events: &mut [SensorEvent]) -> Result<usize, SensorError> {
        if events.is_empty() {
            return Err(SensorError::InvalidArgument(
                "output buffer must hold at least one event",
            ));
        }

        if self.has_pending_event {
            self.has_pending_event = false;
            self.pending.timestamp = timestamp_now();
            events[0] = self.pending;
            return Ok(if self.enabled { 1 } else { 0 });
        }

        let Some(device) = self.device.as_ref() else {
            return Err(SensorError::NoDevice);
        };
        self.reader.fill(device)?;

        let mut received = 0;
        while received < events.len() {
            let Some(event) = self.reader.next() else {
                break;
            };
            if event.kind == EventType::RELATIVE.0 {
                let value = event.value as f32;
                if event.code == RelativeAxisType::REL_RX.0 {
                    self.pending.orientation.azimuth = value * self.scale.azimuth;
                } else if event.code == RelativeAxisType::REL_RY.0 {
                    self.pending.orientation.pitch = value * self.scale.pitch;
                } else if event.code == RelativeAxisType::REL_RZ.0 {
                    self.pending.orientation.roll = value * self.scale.roll;
                }
            } else if event.kind == EventType::SYNCHRONIZATION.0 {
                self.pending.timestamp = event.timestamp_ns();
                // A disabled sensor must not leak samples mid-decode
                if self.enabled {
                    events[received] = self.pending;
                    received += 1;
                }
            } else {
                log::warn!(
                    "Unknown orientation event (type={}, code={})",
                    event.kind,
                    event.code
                );
            }
        }

        Ok(received)
    }
}

impl Drop for OrientationDriver {
    /// Leave the kernel driver disabled on teardown. Best-effort only.
    fn drop(&mut self) {
        if self.enabled {
            if let Err(e) = self.enable(ID_ORIENTATION, false) {
                log::warn!("Unable to disable orientation sensor on teardown: {e}");
            }
        }
    }
}

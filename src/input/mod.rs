pub mod event;
pub mod reader;


use std::io;

use thiserror::Error;

use event::SensorEvent;

/// Possible errors raised by a [Sensor] operation
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("device i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("no input device handle available")]
    NoDevice,
}

/// A [Sensor] is any hardware sensor driver that can be toggled on or off
/// and polled for decoded sensor events. Callers are expected to serialize
/// access to a sensor and to wait for readiness (e.g. with poll) on its
/// device handle before reading events.
pub trait Sensor {
    /// Enable or disable the underlying kernel driver. The handle argument
    /// identifies the sensor for drivers that back more than one.
    fn enable(&mut self, handle: i32, enabled: bool) -> Result<(), SensorError>;

    /// Request a sampling interval in nanoseconds for the given sensor.
    fn set_delay(&mut self, handle: i32, interval_ns: i64) -> Result<(), SensorError>;

    /// Returns true if the driver has an event queued that can be read
    /// without touching the device.
    fn has_pending_events(&self) -> bool {
        false
    }

    /// Read decoded events into the given buffer and return how many were
    /// written. The buffer must hold at least one event.
    fn read_events(&mut self, events: &mut [SensorEvent]) -> Result<usize, SensorError>;
}

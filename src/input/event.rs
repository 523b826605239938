use std::mem;

use nix::time::{clock_gettime, ClockId};

/// A single kernel input event as read from an event device node. Mirrors
/// the wire layout of `struct input_event` on 64-bit targets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawEvent {
    pub time_sec: i64,
    pub time_usec: i64,
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    /// Size of one encoded event on the wire.
    pub const WIRE_SIZE: usize = 24;

    /// Decode an event from its native-endian wire representation.
    pub fn from_ne_bytes(buf: [u8; Self::WIRE_SIZE]) -> Self {
        // 64-bit timeval followed by type, code and value
        Self {
            time_sec: i64::from_ne_bytes(buf[0..8].try_into().unwrap_or_default()),
            time_usec: i64::from_ne_bytes(buf[8..16].try_into().unwrap_or_default()),
            kind: u16::from_ne_bytes(buf[16..18].try_into().unwrap_or_default()),
            code: u16::from_ne_bytes(buf[18..20].try_into().unwrap_or_default()),
            value: i32::from_ne_bytes(buf[20..24].try_into().unwrap_or_default()),
        }
    }

    /// Returns the kernel timestamp of the event in nanoseconds.
    pub fn timestamp_ns(&self) -> i64 {
        self.time_sec * 1_000_000_000 + self.time_usec * 1_000
    }
}

/// Orientation payload of a sensor event in degrees.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationData {
    pub azimuth: f32,
    pub pitch: f32,
    pub roll: f32,
}

/// [SensorEvent] is the fixed-size record handed to event consumers. The
/// version field carries the record size so consumers can reject records
/// from a different schema.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SensorEvent {
    pub version: i32,
    pub sensor: i32,
    pub sensor_type: i32,
    pub orientation: OrientationData,
    pub timestamp: i64,
}

impl SensorEvent {
    /// Create a zeroed event record tagged with the given sensor identity.
    pub fn new(sensor: i32, sensor_type: i32) -> Self {
        Self {
            version: mem::size_of::<SensorEvent>() as i32,
            sensor,
            sensor_type,
            orientation: OrientationData::default(),
            timestamp: 0,
        }
    }
}

/// Returns the current monotonic clock reading in nanoseconds.
pub fn timestamp_now() -> i64 {
    clock_gettime(ClockId::CLOCK_MONOTONIC)
        .map(|ts| ts.tv_sec() * 1_000_000_000 + ts.tv_nsec())
        .unwrap_or(0)
}

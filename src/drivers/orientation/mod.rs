//! Driver for orientation sensors fed through the kernel input subsystem.
//! The kernel driver reports azimuth, pitch and roll as relative axis
//! events and closes each sample with a synchronization event.

pub mod driver;


/// Raw device units per degree on each axis (the kernel driver reports
/// 1/64 degree increments).
pub const SCALE_AZIMUTH: f32 = 1.0 / 64.0;
pub const SCALE_PITCH: f32 = 1.0 / 64.0;
pub const SCALE_ROLL: f32 = 1.0 / 64.0;

/// Number of raw events buffered between reads.
pub const EVENT_BUFFER_EVENTS: usize = 4;

use std::{
    collections::VecDeque,
    fs::File,
    io::{self, Read},
};

use super::event::RawEvent;

/// [EventReader] buffers raw events read from a kernel event device node.
/// The buffer has a fixed capacity; events that are not consumed stay
/// buffered across calls to [EventReader::fill].
#[derive(Debug)]
pub struct EventReader {
    events: VecDeque<RawEvent>,
    capacity: usize,
}

impl EventReader {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Read as many whole events from the device as there is free space in
    /// the buffer and return how many were added. Read errors propagate to
    /// the caller; nothing is consumed from the device in that case.
    pub fn fill(&mut self, device: &File) -> io::Result<usize> {
        let free = self.capacity - self.events.len();
        if free == 0 {
            return Ok(0);
        }

        let mut buf = vec![0u8; free * RawEvent::WIRE_SIZE];
        let mut handle = device;
        let bytes_read = handle.read(&mut buf)?;

        // The kernel only returns whole events. A trailing fragment means
        // the handle is not an event device; drop it rather than desync.
        let remainder = bytes_read % RawEvent::WIRE_SIZE;
        if remainder != 0 {
            log::warn!("Discarding {remainder} trailing bytes of a partial input event");
        }

        let whole = bytes_read / RawEvent::WIRE_SIZE;
        for chunk in buf[..whole * RawEvent::WIRE_SIZE].chunks_exact(RawEvent::WIRE_SIZE) {
            let Ok(bytes) = chunk.try_into() else {
                continue;
            };
            self.events.push_back(RawEvent::from_ne_bytes(bytes));
        }

        Ok(whole)
    }

    /// Pop the oldest buffered event.
    pub fn next(&mut self) -> Option<RawEvent> {
        self.events.pop_front()
    }

    /// Returns the number of events currently buffered.
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

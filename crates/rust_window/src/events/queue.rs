//! Fixed-capacity event FIFO
//!
//! The buffer is allocated once when the context is created; pushing and
//! popping never allocate, so native listener callbacks can enqueue
//! freely.
//!
//! Overflow policy is drop-all: pushing into a full queue discards every
//! queued event *and* the event being pushed. Callers that depend on
//! queued input should drain every poll pass.

use crate::window::WindowId;

use super::Event;

/// Result of [`EventQueue::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The event was appended
    Queued,
    /// Queueing is disabled; the event was not stored
    Disabled,
    /// The queue was full and has been flushed
    Overflowed {
        /// Events discarded, including the one being pushed
        dropped: usize,
    },
}

/// Circular FIFO of [`Event`]s
#[derive(Debug)]
pub struct EventQueue {
    buffer: Box<[Option<Event>]>,
    head: usize,
    len: usize,
    enabled: bool,
}

impl EventQueue {
    /// Create a queue holding at most `capacity` events (minimum 1)
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![None; capacity.max(1)].into_boxed_slice(),
            head: 0,
            len: 0,
            enabled: true,
        }
    }

    /// Maximum number of queued events
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of queued events
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the queue holds no events
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether pushes are stored
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable queueing; already queued events stay queued
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Append an event
    pub fn push(&mut self, event: Event) -> PushOutcome {
        if !self.enabled {
            return PushOutcome::Disabled;
        }

        if self.len == self.capacity() {
            let dropped = self.len + 1;
            self.flush();
            return PushOutcome::Overflowed { dropped };
        }

        self.write_tail(event);
        PushOutcome::Queued
    }

    /// Remove the oldest event if a caller polling for `window` may receive it
    ///
    /// When the oldest event targets a different window it is moved to the
    /// back of the queue and `None` is returned, so each window still sees
    /// its own events in arrival order.
    pub fn pop(&mut self, window: Option<WindowId>) -> Option<Event> {
        let event = self.pop_front()?;
        if event.is_for(window) {
            Some(event)
        } else {
            self.write_tail(event);
            None
        }
    }

    /// Remove the oldest event regardless of its target
    pub fn pop_front(&mut self) -> Option<Event> {
        if self.len == 0 {
            return None;
        }
        let event = self.buffer[self.head].take();
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;
        event
    }

    /// Discard every queued event
    pub fn flush(&mut self) {
        self.buffer.fill(None);
        self.head = 0;
        self.len = 0;
    }

    /// Discard every event targeting `window`, keeping the rest in order
    pub fn purge(&mut self, window: WindowId) -> usize {
        let mut removed = 0;
        for _ in 0..self.len {
            if let Some(event) = self.pop_front() {
                if event.window == Some(window) {
                    removed += 1;
                } else {
                    self.write_tail(event);
                }
            }
        }
        removed
    }

    /// Queued events from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        (0..self.len).filter_map(move |i| self.buffer[(self.head + i) % self.capacity()].as_ref())
    }

    // Caller guarantees there is room.
    fn write_tail(&mut self, event: Event) {
        let tail = (self.head + self.len) % self.capacity();
        self.buffer[tail] = Some(event);
        self.len += 1;
    }
}

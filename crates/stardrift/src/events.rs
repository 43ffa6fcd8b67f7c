//! # Page Event Queue
//!
//! Bounded FIFO between the page shell and the engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │ Page shell  │─────>│   Event     │─────>│   Engine    │
//! │ (producer)  │      │   Channel   │      │   ::tick    │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! The shell pushes events as they happen; the engine drains the whole
//! queue exactly once per tick. The channel is bounded - a stalled engine
//! drops events rather than growing memory, and a dropped event is safe
//! because every event is a notification, not a command: the adapter
//! holds the authoritative scroll and layout state.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use stardrift_motion::{ClickTarget, ElementId};

/// Default channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Events the page shell reports to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The scroll offset changed. The new offset is read from the page
    /// adapter at drain time, so coalesced or dropped scroll events never
    /// desynchronize anything.
    Scroll,

    /// The viewport or layout changed; resolved marker offsets are stale.
    Resize,

    /// An observed section's intersection ratio changed.
    Intersection {
        /// The observed section element.
        section: ElementId,
        /// Intersection ratio in `[0, 1]`.
        ratio: f32,
    },

    /// The user activated an element.
    Click {
        /// What was activated.
        target: ClickTarget,
    },
}

/// Event channel between shell and engine.
pub struct EventBus {
    sender: Sender<PageEvent>,
    receiver: Receiver<PageEvent>,
}

impl EventBus {
    /// Creates a bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a paired sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// Handle for pushing events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<PageEvent>,
}

impl EventSender {
    /// Pushes an event without blocking.
    ///
    /// Returns `false` if the queue is full or the engine is gone; the
    /// event is dropped either way.
    #[inline]
    pub fn send(&self, event: PageEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(?dropped, "event queue full; dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for draining events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<PageEvent>,
}

impl EventReceiver {
    /// Drains all pending events without blocking.
    #[inline]
    pub fn drain(&self) -> Vec<PageEvent> {
        let mut events = Vec::with_capacity(self.receiver.len());
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Receives one event without blocking.
    #[inline]
    pub fn try_recv(&self) -> Option<PageEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// True if events are waiting.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_receive() {
        let bus = EventBus::new(16);
        let sender = bus.sender();
        let receiver = bus.receiver();

        assert!(sender.send(PageEvent::Intersection {
            section: ElementId::from_raw(3),
            ratio: 0.4,
        }));
        assert!(receiver.has_events());

        match receiver.try_recv() {
            Some(PageEvent::Intersection { section, ratio }) => {
                assert_eq!(section, ElementId::from_raw(3));
                assert!((ratio - 0.4).abs() < 1e-6);
            }
            other => panic!("wrong event: {other:?}"),
        }
    }

    #[test]
    fn test_drain_preserves_fifo_order() {
        let (sender, receiver) = EventBus::create_pair(16);

        sender.send(PageEvent::Scroll);
        sender.send(PageEvent::Resize);
        sender.send(PageEvent::Scroll);

        let events = receiver.drain();
        assert_eq!(
            events,
            vec![PageEvent::Scroll, PageEvent::Resize, PageEvent::Scroll]
        );
        assert!(!receiver.has_events());
    }

    #[test]
    fn test_full_queue_drops() {
        let (sender, receiver) = EventBus::create_pair(2);

        assert!(sender.send(PageEvent::Scroll));
        assert!(sender.send(PageEvent::Scroll));
        assert!(!sender.send(PageEvent::Scroll));
        assert_eq!(receiver.pending_count(), 2);
    }
}

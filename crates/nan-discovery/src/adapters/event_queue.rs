use std::collections::VecDeque;

use crate::events::DiscoveryEvent;
use crate::ports::EventSink;

/// FIFO of pending events for one device
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<DiscoveryEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pop(&mut self) -> Option<DiscoveryEvent> {
        self.events.pop_front()
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<DiscoveryEvent> {
        self.events.drain(..).collect()
    }

    pub fn peek(&self) -> impl Iterator<Item = &DiscoveryEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for EventQueue {
    fn emit(&mut self, event: DiscoveryEvent) {
        self.events.push_back(event);
    }
}

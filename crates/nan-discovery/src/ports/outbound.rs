//! Outbound Ports (Driven Ports)
//!
//! The session manager pushes every event into an [`EventSink`]; it never
//! calls back into application code directly.

use crate::events::DiscoveryEvent;

/// Receiver of a device's discovery events
///
/// Events arrive in the order the device produced them.
pub trait EventSink {
    fn emit(&mut self, event: DiscoveryEvent);
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: DiscoveryEvent) {
        (**self).emit(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: DiscoveryEvent) {
        (**self).emit(event);
    }
}
